use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while asking the completion endpoint for text.
///
/// Callers only care about two outcomes: the request went through but the
/// payload was unusable ([`CompletionError::is_malformed`]), or it didn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// Transport-level failure (DNS, connection refused, body not JSON).
    Request(String),
    /// Endpoint answered with a non-2xx status.
    Status { status: u16, body: String },
    /// Response parsed but carried no candidate text.
    Empty,
}

impl CompletionError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, CompletionError::Empty)
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Request(msg) => write!(f, "request failed: {msg}"),
            CompletionError::Status { status, body } => {
                write!(f, "API error (HTTP {status}): {body}")
            }
            CompletionError::Empty => write!(f, "empty or malformed response"),
        }
    }
}

impl std::error::Error for CompletionError {}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the name of the backing service, for logs.
    fn name(&self) -> &str;

    /// Sends `prompt` to the completion endpoint and returns the first candidate's text.
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_is_malformed() {
        assert!(CompletionError::Empty.is_malformed());
        assert!(!CompletionError::Request("dns".into()).is_malformed());
        assert!(
            !CompletionError::Status {
                status: 500,
                body: String::new()
            }
            .is_malformed()
        );
    }

    #[test]
    fn display_includes_status() {
        let err = CompletionError::Status {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 403): forbidden");
    }
}
