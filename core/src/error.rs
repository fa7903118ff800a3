//! Error types for the geocoding client.
//!
//! # Design
//! Transport failures and decode failures never share a variant. Transport
//! errors are carried verbatim in `ApiError::Transport`, typed by whatever
//! the transport produces. Decode errors are a single terminal
//! `DecodeError` with a diagnostic message. Service-level outcomes such as
//! `ZERO_RESULTS` are not errors at all; they decode into `Status`.

use thiserror::Error;

/// The response body did not match the expected shape, or a strict lookup
/// table (status, location type) saw a value it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decode failed: {message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::new(err.to_string())
    }
}

/// A string that is not in one of the closed lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {table} `{value}`")]
pub struct UnknownValue {
    pub table: &'static str,
    pub value: String,
}

/// Non-2xx reply observed by a caller that executes the HTTP round-trip
/// itself (see `GeocodingClient::parse_geocode`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}: {body}")]
pub struct HttpStatusError {
    pub status: u16,
    pub body: String,
}

/// Errors returned by `GeocodingClient::send` and `parse_geocode`.
#[derive(Debug, Error)]
pub enum ApiError<E> {
    /// The transport failed; the error is passed through untouched.
    #[error("transport failed: {0}")]
    Transport(#[source] E),

    /// The body arrived but could not be decoded into a `Response`.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
