//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures (network or non-2xx) and application failures
//! (`success: false` inside a 2xx envelope) are distinct variants so callers
//! can decide between a re-login prompt, inline text, or a retry button.
//! Authentication failures are plain `Status { status: 401, .. }` values.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message the backend sends from `/pet/suggest` until the quiz is done.
pub const QUIZ_REQUIRED_MESSAGE: &str = "please complete personality question first";

/// Error returned by every [`ApiClient`](crate::ApiClient) operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx with `success: false`.
    #[error("{message}")]
    Application { message: String, code: Option<i64> },

    /// The response body did not match the expected envelope or payload shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),
}

impl ApiError {
    /// HTTP status for transport-level failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for a 401 response.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// `true` for `success: false` envelopes.
    #[must_use]
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// `true` when suggestions are unavailable because the personality quiz
    /// has not been completed yet.
    ///
    /// The backend only signals this through its message text.
    #[must_use]
    pub fn needs_personality_quiz(&self) -> bool {
        match self {
            Self::Application { message, .. } => message.contains(QUIZ_REQUIRED_MESSAGE),
            _ => false,
        }
    }

    /// Text suitable for inline display next to a form or list.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Application { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Application { .. } => "The request was rejected.".to_owned(),
            Self::Status { status: 401, .. } => "Please sign in again.".to_owned(),
            Self::Status { status, .. } => format!("Server error ({status})."),
            Self::Network(_) => "Could not reach the server.".to_owned(),
            Self::Decode(_) | Self::Encode(_) => "Unexpected response from the server.".to_owned(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Failure while asking the identity provider for its session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The session lookup request could not be sent.
    #[error("identity session lookup failed: {0}")]
    Lookup(String),

    /// The session payload could not be parsed.
    #[error("identity session payload invalid: {0}")]
    InvalidSession(String),
}
