//! Backend response envelope and its single normalizer.
//!
//! Every backend response is `{success, data?, message?, code?}`. Decoding
//! happens once, here, into either the typed payload or an [`ApiError`]; a
//! body that does not fit is a decode error rather than a silent default.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Raw `{success, data, message, code}` wrapper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    // Path form: plain `default` would bound `T: Default`.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl<T> Envelope<T> {
    /// Unwrap a payload-carrying envelope.
    ///
    /// # Errors
    ///
    /// [`ApiError::Application`] for `success: false`, [`ApiError::Decode`]
    /// when a successful envelope has no `data`.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(self.rejection());
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful envelope is missing `data`".to_owned()))
    }

    /// Unwrap an envelope whose payload the caller does not need.
    ///
    /// # Errors
    ///
    /// [`ApiError::Application`] for `success: false`.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success { Ok(()) } else { Err(self.rejection()) }
    }

    fn rejection(self) -> ApiError {
        ApiError::Application { message: self.message.unwrap_or_default(), code: self.code }
    }
}

/// Decode a response body into the payload of its envelope.
///
/// # Errors
///
/// See [`Envelope::into_data`]; malformed JSON is [`ApiError::Decode`].
pub fn decode_data<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    envelope.into_data()
}

/// Decode a response body whose payload is ignored.
///
/// # Errors
///
/// See [`Envelope::into_unit`]; malformed JSON is [`ApiError::Decode`].
pub fn decode_unit(body: &str) -> Result<(), ApiError> {
    let envelope: Envelope<serde::de::IgnoredAny> = serde_json::from_str(body)?;
    envelope.into_unit()
}
