//! # Application State
//!
//! Core business state for PyBuddy. Domain logic only, no TUI-specific
//! types. Presentation state lives in the `tui` module.
//!
//! ```text
//! Tutor
//! ├── messages: Vec<Message>        // chat turns, append-only per session
//! ├── active: bool                  // a learning session is live
//! ├── assignment_visible: bool      // the assignment panel is shown
//! ├── assignment_text: String       // generated (or fallback) assignment
//! ├── credential: String            // API key as typed in the field
//! ├── topic: String                 // subject the tutor teaches
//! ├── generation: u64               // bumped on every session reset
//! ├── pending: Option<Pending>      // the one request in flight, if any
//! ├── status_message: String        // status bar text
//! └── alert: Option<String>         // blocking popup text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use serde::{Deserialize, Serialize};

/// Opening assistant message; `{topic}` is "Python" unless configured.
pub fn greeting(topic: &str) -> String {
    format!("Welcome to your {topic} learning session! 🎉 What would you like to learn today?")
}
pub const MISSING_CREDENTIAL: &str = "Please enter your API key first!";
pub const NOT_ENOUGH_DISCUSSION: &str =
    "Not enough discussion to generate an assignment. Please ask more questions first!";
pub const REPLY_MALFORMED: &str =
    "I couldn't generate a response. Please make sure your API key is valid.";
pub const REPLY_FAILED: &str =
    "An error occurred while fetching the response. Please check your API key and try again.";
pub const ASSIGNMENT_MALFORMED: &str =
    "Sorry, I couldn't generate an assignment at this time. Please try again.";
pub const ASSIGNMENT_FAILED: &str = "Error generating assignment. Please try again.";

pub const DEFAULT_TOPIC: &str = "Python";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One chat turn. Never mutated once pushed onto the transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Where the session currently stands, derived from the two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    AssignmentShown,
}

/// The request currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Reply,
    Assignment,
}

pub struct Tutor {
    pub messages: Vec<Message>,
    pub active: bool,
    pub assignment_visible: bool,
    pub assignment_text: String,
    pub credential: String,
    pub topic: String,
    pub generation: u64,
    pub pending: Option<Pending>,
    pub status_message: String,
    pub alert: Option<String>,
}

impl Default for Tutor {
    fn default() -> Self {
        Self::new(None, DEFAULT_TOPIC.to_string())
    }
}

impl Tutor {
    pub fn new(credential: Option<String>, topic: String) -> Self {
        Self {
            messages: Vec::new(),
            active: false,
            assignment_visible: false,
            assignment_text: String::new(),
            credential: credential.unwrap_or_default(),
            topic,
            generation: 0,
            pending: None,
            status_message: String::from("Welcome to PyBuddy!"),
            alert: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.active {
            Phase::Active
        } else if self.assignment_visible {
            Phase::AssignmentShown
        } else {
            Phase::Idle
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Renders the conversation as `role: content` lines for the assignment prompt.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
