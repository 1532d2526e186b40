pub mod client;
pub mod gemini;
pub mod types;

pub use client::{CompletionClient, CompletionError};
pub use gemini::GeminiClient;
