//! # Effect Runner
//!
//! The I/O half of the state machine. `update()` decides *what* should
//! happen; this module performs it and turns the result back into an
//! `Action`.
//!
//! The TUI calls [`run_effect`] from a spawned task so the event loop keeps
//! drawing while a request is in flight. [`dispatch`] drives an action all
//! the way to a settled state in one call, which is what tests and
//! non-interactive callers want.

use log::{info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::credential::CredentialStore;
use crate::core::state::Tutor;
use crate::inference::CompletionClient;

/// Performs a network effect and returns the action carrying its outcome.
/// Non-network effects yield `None`.
pub async fn run_effect(client: &dyn CompletionClient, effect: Effect) -> Option<Action> {
    match effect {
        Effect::RequestReply {
            generation,
            prompt,
            credential,
        } => {
            info!("Requesting reply from {} (generation {})", client.name(), generation);
            let outcome = client.complete(&prompt, &credential).await;
            Some(Action::ReplyReceived {
                generation,
                outcome,
            })
        }
        Effect::RequestAssignment {
            generation,
            prompt,
            credential,
        } => {
            info!(
                "Requesting assignment from {} (generation {})",
                client.name(),
                generation
            );
            let outcome = client.complete(&prompt, &credential).await;
            Some(Action::AssignmentReceived {
                generation,
                outcome,
            })
        }
        _ => None,
    }
}

/// Applies a credential effect to the store. Returns `true` if the effect
/// was a storage effect. Failures are logged, never surfaced.
pub fn apply_storage_effect(store: &CredentialStore, effect: &Effect) -> bool {
    match effect {
        Effect::SaveCredential(key) => {
            if let Err(e) = store.set(key) {
                warn!("Failed to persist API key: {}", e);
            }
            true
        }
        Effect::ForgetCredential => {
            if let Err(e) = store.clear() {
                warn!("Failed to remove API key: {}", e);
            }
            true
        }
        _ => false,
    }
}

/// Runs `action` through `update()` and awaits any request it triggers,
/// feeding the outcome back in. Returns the last effect that is not a
/// network request (for example `SaveCredential` or `Quit`) so the caller
/// can finish it.
pub async fn dispatch(tutor: &mut Tutor, action: Action, client: &dyn CompletionClient) -> Effect {
    let mut effect = update(tutor, action);
    while let Some(follow_up) = run_effect(client, effect.clone()).await {
        effect = update(tutor, follow_up);
    }
    effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Message, NOT_ENOUGH_DISCUSSION, Phase, REPLY_FAILED, REPLY_MALFORMED};
    use crate::inference::CompletionError;
    use crate::test_support::ScriptedClient;

    fn keyed() -> Tutor {
        Tutor::new(Some("K".to_string()), "Python".to_string())
    }

    #[tokio::test]
    async fn end_to_end_lesson_and_assignment() {
        let client = ScriptedClient::new(vec![
            Ok("A list is...".to_string()),
            Ok("Write a function...".to_string()),
        ]);
        let mut tutor = keyed();

        dispatch(&mut tutor, Action::StartSession, &client).await;
        assert_eq!(tutor.messages.len(), 1);
        assert!(tutor.messages[0].content.starts_with("Welcome"));

        dispatch(&mut tutor, Action::SendMessage("What is a list?".into()), &client).await;
        assert_eq!(tutor.messages.len(), 3);
        assert_eq!(tutor.messages[2], Message::assistant("A list is..."));

        dispatch(&mut tutor, Action::EndSession, &client).await;
        assert!(tutor.assignment_visible);
        assert!(!tutor.active);
        assert_eq!(tutor.assignment_text, "Write a function...");

        let prompts = client.prompts();
        assert_eq!(prompts[0], ("What is a list?".to_string(), "K".to_string()));
        assert!(prompts[1].0.contains("user: What is a list?"));
    }

    #[tokio::test]
    async fn request_failure_becomes_fallback_message() {
        let client = ScriptedClient::new(vec![Err(CompletionError::Request(
            "connection refused".into(),
        ))]);
        let mut tutor = keyed();
        dispatch(&mut tutor, Action::StartSession, &client).await;
        dispatch(&mut tutor, Action::SendMessage("hi".into()), &client).await;

        assert_eq!(tutor.messages.last(), Some(&Message::assistant(REPLY_FAILED)));
        assert_eq!(tutor.phase(), Phase::Active);
        assert!(!tutor.is_loading());
    }

    #[tokio::test]
    async fn malformed_response_becomes_fallback_message() {
        let client = ScriptedClient::new(vec![Err(CompletionError::Empty)]);
        let mut tutor = keyed();
        dispatch(&mut tutor, Action::StartSession, &client).await;
        dispatch(&mut tutor, Action::SendMessage("hi".into()), &client).await;
        assert_eq!(tutor.messages.last(), Some(&Message::assistant(REPLY_MALFORMED)));
    }

    #[tokio::test]
    async fn short_session_never_calls_client() {
        let client = ScriptedClient::new(vec![]);
        let mut tutor = keyed();
        dispatch(&mut tutor, Action::StartSession, &client).await;
        dispatch(&mut tutor, Action::EndSession, &client).await;
        assert_eq!(tutor.assignment_text, NOT_ENOUGH_DISCUSSION);
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn dispatch_returns_storage_effect() {
        let client = ScriptedClient::new(vec![]);
        let mut tutor = Tutor::default();
        let effect = dispatch(&mut tutor, Action::CredentialChanged("K".into()), &client).await;
        assert_eq!(effect, Effect::SaveCredential("K".into()));
    }

    #[test]
    fn storage_effects_hit_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("api_key"));

        assert!(apply_storage_effect(&store, &Effect::SaveCredential("K".into())));
        assert_eq!(store.load().as_deref(), Some("K"));

        assert!(apply_storage_effect(&store, &Effect::ForgetCredential));
        assert_eq!(store.load(), None);

        assert!(!apply_storage_effect(&store, &Effect::Quit));
    }

    #[test]
    fn non_network_effects_yield_nothing() {
        let client = ScriptedClient::new(vec![]);
        let follow_up = tokio_test::block_on(run_effect(&client, Effect::CancelRequests));
        assert!(follow_up.is_none());
    }
}
