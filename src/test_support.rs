//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::inference::{CompletionClient, CompletionError};

/// A client that plays back canned outcomes in order and records every
/// `(prompt, credential)` pair it was called with. Runs dry as `Empty`.
pub struct ScriptedClient {
    outcomes: Mutex<VecDeque<Result<String, CompletionError>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedClient {
    pub fn new(outcomes: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), credential.to_string()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::Empty))
    }
}
