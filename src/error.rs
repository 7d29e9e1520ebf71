//! Errors raised by outbound service calls

use thiserror::Error;

/// Failure of a call to one of the external services.
///
/// The `Display` output is what ends up on the status line, so variants
/// carry enough text to be readable on their own.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} error ({status}): {body}")]
    Api {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{0} returned no content")]
    EmptyResponse(&'static str),

    /// The worker task behind a channel is gone. Carries no message of its
    /// own, so the status line shows the action's generic failure text.
    #[error("")]
    WorkerUnavailable,
}

impl RemoteError {
    /// Build an API error from a non-success response, consuming its body
    pub(crate) async fn from_response(service: &'static str, response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::Api {
            service,
            status,
            body: body.trim().to_string(),
        }
    }
}

/// Text shown on the status line for a failed action.
///
/// Uses the error's own message, or `fallback` when the error has nothing to say.
pub fn status_text(error: &impl std::fmt::Display, fallback: &str) -> String {
    let text = error.to_string();
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
