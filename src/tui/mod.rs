//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner keeps turning.
//! - **Otherwise**: sleeps up to 500ms and only redraws on events, resize,
//!   or a finished request.
//!
//! ## Background Work
//!
//! Requests run on tokio tasks. Each task sends its outcome back as an
//! `Action` over a std `mpsc` channel, drained once per loop iteration.
//! Abort handles are kept so a new session (or quitting) can drop
//! in-flight requests; the reducer's generation check covers any reply
//! that slips through.

mod blocks;
mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::credential::CredentialStore;
use crate::core::runner::{apply_storage_effect, run_effect};
use crate::core::state::{Phase, Tutor};
use crate::inference::{CompletionClient, GeminiClient};
use crate::tui::component::EventHandler;
use crate::tui::components::{AssignmentState, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which text field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Credential,
    Chat,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub assignment: AssignmentState,
    pub input_box: InputBox,
    pub credential_box: InputBox,
    pub focus: Focus,
    pub model_name: String,
    /// Session generation the scroll states belong to
    generation: u64,
}

impl TuiState {
    pub fn new(model_name: String, credential: &str) -> Self {
        let mut credential_box = InputBox::new(" 🔑 Gemini API key ", "Paste your API key here")
            .masked()
            .keep_on_submit();
        credential_box.set_text(credential);
        Self {
            message_list: MessageListState::new(),
            assignment: AssignmentState::default(),
            input_box: InputBox::new(" 💬 Ask your tutor ", "Ask a question and press Enter"),
            credential_box,
            // Without a key the user has to type one first
            focus: if credential.is_empty() {
                Focus::Credential
            } else {
                Focus::Chat
            },
            model_name,
            generation: 0,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Credential => Focus::Chat,
            Focus::Chat => Focus::Credential,
        };
    }

    /// Drop scroll positions left over from a previous session.
    fn sync_generation(&mut self, generation: u64) {
        if self.generation != generation {
            self.generation = generation;
            self.message_list = MessageListState::new();
            self.assignment = AssignmentState::default();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Owns the I/O side of the loop: where effects go.
struct Shell {
    client: Arc<dyn CompletionClient>,
    store: CredentialStore,
    tx: mpsc::Sender<Action>,
    in_flight: Vec<AbortHandle>,
}

impl Shell {
    /// Performs an effect. Returns `true` when the app should quit.
    fn perform(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::SaveCredential(_) | Effect::ForgetCredential => {
                apply_storage_effect(&self.store, &effect);
            }
            Effect::RequestReply { .. } | Effect::RequestAssignment { .. } => {
                self.in_flight.retain(|handle| !handle.is_finished());
                self.in_flight.push(spawn_request(self.client.clone(), effect, self.tx.clone()));
            }
            Effect::CancelRequests => self.cancel_all(),
        }
        false
    }

    fn cancel_all(&mut self) {
        if !self.in_flight.is_empty() {
            info!("Aborting {} in-flight request(s)", self.in_flight.len());
        }
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }
}

pub fn build_client(config: &ResolvedConfig) -> Arc<dyn CompletionClient> {
    Arc::new(GeminiClient::new(config.base_url.clone(), config.model.clone()))
}

pub fn run(config: ResolvedConfig, store: CredentialStore) -> std::io::Result<()> {
    let credential = store.load();
    info!(
        "Starting with topic '{}', model '{}', stored key: {}",
        config.topic,
        config.model,
        if credential.is_some() { "yes" } else { "no" }
    );

    let mut tutor = Tutor::new(credential, config.topic.clone());
    let mut tui = TuiState::new(config.model.clone(), &tutor.credential);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut shell = Shell {
        client: build_client(&config),
        store,
        tx,
        in_flight: Vec::new(),
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync_generation(tutor.generation);

        let animating = tutor.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &tutor, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in translate_event(&event, &tutor, &mut tui) {
                debug!("Dispatching {:?}", redact(&action));
                let effect = update(&mut tutor, action);
                if shell.perform(effect) {
                    break 'main;
                }
            }
            // Keep the field in step when the key was cleared elsewhere
            tui.credential_box.set_text(&tutor.credential);
        }

        // Handle finished background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut tutor, action);
            if shell.perform(effect) {
                break 'main;
            }
        }
    }

    shell.cancel_all();
    ratatui::restore();
    info!("Shut down cleanly");
    Ok(())
}

/// Maps a terminal event to the actions it triggers, updating
/// presentation-only state (focus, scroll, text fields) along the way.
fn translate_event(event: &TuiEvent, tutor: &Tutor, tui: &mut TuiState) -> Vec<Action> {
    // Ctrl+C always quits
    if matches!(event, TuiEvent::ForceQuit) {
        return vec![Action::Quit];
    }

    // The alert is modal
    if tutor.alert.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::Escape => vec![Action::DismissAlert],
            _ => Vec::new(),
        };
    }

    let phase = tutor.phase();
    match event {
        TuiEvent::Resize => Vec::new(),
        TuiEvent::ToggleFocus => {
            tui.toggle_focus();
            Vec::new()
        }
        TuiEvent::ClearCredential => vec![Action::ClearCredential],
        TuiEvent::EndSession => vec![Action::EndSession],
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            match phase {
                Phase::Active => {
                    tui.message_list.handle_event(event);
                }
                Phase::AssignmentShown => {
                    tui.assignment.handle_event(event);
                }
                Phase::Idle => {}
            }
            Vec::new()
        }
        _ if tui.focus == Focus::Credential => match tui.credential_box.handle_event(event) {
            Some(InputEvent::Changed(text)) => vec![Action::CredentialChanged(text)],
            // Enter confirms the key and hands focus to the chat
            Some(InputEvent::Submit(_)) => {
                tui.focus = Focus::Chat;
                submit_for_phase(phase, tui)
            }
            None => Vec::new(),
        },
        _ => match phase {
            Phase::Idle | Phase::AssignmentShown => match event {
                TuiEvent::Submit => submit_for_phase(phase, tui),
                _ => Vec::new(),
            },
            Phase::Active => {
                // Keep the draft while a reply is pending; the reducer
                // reports why it was not sent.
                if matches!(event, TuiEvent::Submit) && tutor.is_loading() {
                    return vec![Action::SendMessage(tui.input_box.buffer.clone())];
                }
                match tui.input_box.handle_event(event) {
                    Some(InputEvent::Submit(text)) => vec![Action::SendMessage(text)],
                    _ => Vec::new(),
                }
            }
        },
    }
}

/// Enter outside the chat box.
fn submit_for_phase(phase: Phase, tui: &mut TuiState) -> Vec<Action> {
    match phase {
        Phase::Idle => vec![Action::StartSession],
        Phase::AssignmentShown => {
            tui.input_box.set_text("");
            vec![Action::StartNewSession]
        }
        Phase::Active => Vec::new(),
    }
}

/// The credential must never reach the log.
fn redact(action: &Action) -> Action {
    match action {
        Action::CredentialChanged(_) => Action::CredentialChanged(String::from("<redacted>")),
        other => other.clone(),
    }
}

fn spawn_request(
    client: Arc<dyn CompletionClient>,
    effect: Effect,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning API request");
    tokio::spawn(async move {
        let started = Instant::now();
        if let Some(action) = run_effect(client.as_ref(), effect).await {
            debug!("Request finished in {}ms", started.elapsed().as_millis());
            if tx.send(action).is_err() {
                warn!("Failed to deliver request outcome: receiver dropped");
            }
        }
    })
    .abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Message, Pending};

    fn ready_tutor() -> Tutor {
        Tutor::new(Some("key".into()), "Python".into())
    }

    #[test]
    fn test_initial_focus_depends_on_credential() {
        assert_eq!(TuiState::new("m".into(), "").focus, Focus::Credential);
        assert_eq!(TuiState::new("m".into(), "key").focus, Focus::Chat);
    }

    #[test]
    fn test_enter_in_idle_starts_session() {
        let tutor = ready_tutor();
        let mut tui = TuiState::new("m".into(), "key");
        assert_eq!(
            translate_event(&TuiEvent::Submit, &tutor, &mut tui),
            vec![Action::StartSession]
        );
    }

    #[test]
    fn test_credential_keystrokes_dispatch_changes() {
        let tutor = Tutor::new(None, "Python".into());
        let mut tui = TuiState::new("m".into(), "");
        assert_eq!(
            translate_event(&TuiEvent::InputChar('k'), &tutor, &mut tui),
            vec![Action::CredentialChanged("k".into())]
        );
        assert_eq!(
            translate_event(&TuiEvent::Submit, &tutor, &mut tui),
            vec![Action::StartSession]
        );
        assert_eq!(tui.focus, Focus::Chat);
    }

    #[test]
    fn test_chat_submit_sends_message() {
        let mut tutor = ready_tutor();
        tutor.active = true;
        let mut tui = TuiState::new("m".into(), "key");
        for c in "hi".chars() {
            translate_event(&TuiEvent::InputChar(c), &tutor, &mut tui);
        }
        assert_eq!(
            translate_event(&TuiEvent::Submit, &tutor, &mut tui),
            vec![Action::SendMessage("hi".into())]
        );
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn test_submit_while_loading_keeps_draft() {
        let mut tutor = ready_tutor();
        tutor.active = true;
        tutor.pending = Some(Pending::Reply);
        tutor.messages.push(Message::user("first"));
        let mut tui = TuiState::new("m".into(), "key");
        tui.input_box.set_text("second");
        assert_eq!(
            translate_event(&TuiEvent::Submit, &tutor, &mut tui),
            vec![Action::SendMessage("second".into())]
        );
        assert_eq!(tui.input_box.buffer, "second");
    }

    #[test]
    fn test_alert_is_modal() {
        let mut tutor = Tutor::new(None, "Python".into());
        tutor.alert = Some("oops".into());
        let mut tui = TuiState::new("m".into(), "");
        assert!(translate_event(&TuiEvent::InputChar('a'), &tutor, &mut tui).is_empty());
        assert!(tui.credential_box.buffer.is_empty());
        assert_eq!(
            translate_event(&TuiEvent::Escape, &tutor, &mut tui),
            vec![Action::DismissAlert]
        );
        assert_eq!(
            translate_event(&TuiEvent::ForceQuit, &tutor, &mut tui),
            vec![Action::Quit]
        );
    }

    #[test]
    fn test_enter_on_assignment_starts_new_session() {
        let mut tutor = ready_tutor();
        tutor.assignment_visible = true;
        let mut tui = TuiState::new("m".into(), "key");
        assert_eq!(
            translate_event(&TuiEvent::Submit, &tutor, &mut tui),
            vec![Action::StartNewSession]
        );
    }

    #[test]
    fn test_shortcuts() {
        let tutor = ready_tutor();
        let mut tui = TuiState::new("m".into(), "key");
        assert_eq!(
            translate_event(&TuiEvent::EndSession, &tutor, &mut tui),
            vec![Action::EndSession]
        );
        assert_eq!(
            translate_event(&TuiEvent::ClearCredential, &tutor, &mut tui),
            vec![Action::ClearCredential]
        );
        translate_event(&TuiEvent::ToggleFocus, &tutor, &mut tui);
        assert_eq!(tui.focus, Focus::Credential);
    }

    #[test]
    fn test_generation_change_resets_scroll_state() {
        let mut tui = TuiState::new("m".into(), "key");
        tui.message_list.stick_to_bottom = false;
        tui.assignment.scroll = 4;
        tui.sync_generation(1);
        assert!(tui.message_list.stick_to_bottom);
        assert_eq!(tui.assignment.scroll, 0);
    }

    #[test]
    fn test_redact_hides_credential() {
        let shown = format!("{:?}", redact(&Action::CredentialChanged("sekrit".into())));
        assert!(!shown.contains("sekrit"));
    }
}
