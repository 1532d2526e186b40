//! # Actions
//!
//! Everything that can happen in PyBuddy becomes an `Action`.
//! User presses Enter in the chat box? That's `Action::SendMessage(text)`.
//! The endpoint answers? That's `Action::ReplyReceived { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing the I/O the shell should
//! perform next. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every network effect carries the session `generation` it was issued
//! under. Starting a new session bumps the generation, so a reply that
//! settles afterwards is dropped instead of leaking into the fresh session.

use log::{debug, info, warn};

use crate::core::state::{
    ASSIGNMENT_FAILED, ASSIGNMENT_MALFORMED, MISSING_CREDENTIAL, Message,
    NOT_ENOUGH_DISCUSSION, Pending, Phase, REPLY_FAILED, REPLY_MALFORMED, Tutor, greeting,
};
use crate::inference::CompletionError;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CredentialChanged(String),
    ClearCredential,
    StartSession,
    SendMessage(String),
    ReplyReceived {
        generation: u64,
        outcome: Result<String, CompletionError>,
    },
    EndSession,
    AssignmentReceived {
        generation: u64,
        outcome: Result<String, CompletionError>,
    },
    StartNewSession,
    DismissAlert,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SaveCredential(String),
    ForgetCredential,
    RequestReply {
        generation: u64,
        prompt: String,
        credential: String,
    },
    RequestAssignment {
        generation: u64,
        prompt: String,
        credential: String,
    },
    /// Abort whatever request is still in flight.
    CancelRequests,
}

const STILL_WAITING: &str = "Still waiting for the tutor...";

/// Builds the assignment prompt, or `None` when there is too little
/// conversation to base one on.
pub fn assignment_prompt(tutor: &Tutor) -> Option<String> {
    if tutor.messages.len() < 2 {
        return None;
    }
    Some(format!(
        "Based on our discussion about {}, here's a practice assignment for you to work on. \
         The assignment should test your understanding of the concepts we discussed.\
         \n\nOur discussion:\n{}",
        tutor.topic,
        tutor.transcript()
    ))
}

pub fn update(tutor: &mut Tutor, action: Action) -> Effect {
    match action {
        Action::CredentialChanged(text) => {
            tutor.credential = text.clone();
            Effect::SaveCredential(text)
        }
        Action::ClearCredential => {
            tutor.credential.clear();
            tutor.status_message = String::from("API key cleared");
            Effect::ForgetCredential
        }
        Action::StartSession => start_session(tutor),
        Action::SendMessage(text) => send_message(tutor, text),
        Action::ReplyReceived {
            generation,
            outcome,
        } => {
            if generation != tutor.generation {
                info!(
                    "Discarding stale reply (generation {} != {})",
                    generation, tutor.generation
                );
                return Effect::None;
            }
            tutor.pending = None;
            let content = match outcome {
                Ok(text) => {
                    tutor.status_message = String::new();
                    text
                }
                Err(e) => {
                    warn!("Reply failed: {}", e);
                    tutor.status_message = String::from("The tutor could not answer");
                    if e.is_malformed() {
                        REPLY_MALFORMED.to_string()
                    } else {
                        REPLY_FAILED.to_string()
                    }
                }
            };
            tutor.messages.push(Message::assistant(content));
            Effect::None
        }
        Action::EndSession => end_session(tutor),
        Action::AssignmentReceived {
            generation,
            outcome,
        } => {
            if generation != tutor.generation {
                info!(
                    "Discarding stale assignment (generation {} != {})",
                    generation, tutor.generation
                );
                return Effect::None;
            }
            tutor.pending = None;
            tutor.assignment_text = match outcome {
                Ok(text) => text,
                Err(e) => {
                    warn!("Assignment generation failed: {}", e);
                    if e.is_malformed() {
                        ASSIGNMENT_MALFORMED.to_string()
                    } else {
                        ASSIGNMENT_FAILED.to_string()
                    }
                }
            };
            show_assignment(tutor);
            Effect::None
        }
        Action::StartNewSession => {
            let had_pending = tutor.pending.take().is_some();
            tutor.messages.clear();
            tutor.assignment_text.clear();
            tutor.active = false;
            tutor.assignment_visible = false;
            tutor.generation += 1;
            tutor.status_message = String::from("Ready for a new session");
            info!("New session (generation {})", tutor.generation);
            if had_pending {
                Effect::CancelRequests
            } else {
                Effect::None
            }
        }
        Action::DismissAlert => {
            tutor.alert = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_session(tutor: &mut Tutor) -> Effect {
    if tutor.phase() != Phase::Idle {
        debug!("StartSession ignored in phase {:?}", tutor.phase());
        return Effect::None;
    }
    if !tutor.has_credential() {
        warn!("StartSession without an API key");
        tutor.alert = Some(MISSING_CREDENTIAL.to_string());
        return Effect::None;
    }
    tutor.active = true;
    tutor.messages = vec![Message::assistant(greeting(&tutor.topic))];
    tutor.status_message = String::from("Session started");
    info!("Session started (generation {})", tutor.generation);
    Effect::None
}

fn send_message(tutor: &mut Tutor, text: String) -> Effect {
    if !tutor.active {
        debug!("SendMessage ignored outside an active session");
        return Effect::None;
    }
    if text.trim().is_empty() {
        return Effect::None;
    }
    if !tutor.has_credential() {
        tutor.status_message = String::from("Enter your API key to keep chatting");
        return Effect::None;
    }
    if tutor.pending.is_some() {
        tutor.status_message = STILL_WAITING.to_string();
        return Effect::None;
    }

    tutor.messages.push(Message::user(text.clone()));
    tutor.pending = Some(Pending::Reply);
    tutor.status_message = String::from("Thinking...");
    Effect::RequestReply {
        generation: tutor.generation,
        prompt: text,
        credential: tutor.credential.clone(),
    }
}

fn end_session(tutor: &mut Tutor) -> Effect {
    if !tutor.active {
        debug!("EndSession ignored outside an active session");
        return Effect::None;
    }
    if tutor.pending.is_some() {
        tutor.status_message = STILL_WAITING.to_string();
        return Effect::None;
    }

    match assignment_prompt(tutor) {
        None => {
            tutor.assignment_text = NOT_ENOUGH_DISCUSSION.to_string();
            show_assignment(tutor);
            Effect::None
        }
        Some(prompt) => {
            tutor.pending = Some(Pending::Assignment);
            tutor.status_message = String::from("Generating your assignment...");
            Effect::RequestAssignment {
                generation: tutor.generation,
                prompt,
                credential: tutor.credential.clone(),
            }
        }
    }
}

fn show_assignment(tutor: &mut Tutor) {
    tutor.active = false;
    tutor.assignment_visible = true;
    tutor.status_message = String::from("Session ended");
    info!("Assignment shown ({} messages)", tutor.messages.len());
}
