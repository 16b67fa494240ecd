//! Commerce backend error types

use thiserror::Error;

/// Commerce API error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CommerceError {
    pub kind: CommerceErrorKind,
    pub message: String,
}

impl CommerceError {
    pub fn new(kind: CommerceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::Auth, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::RateLimit, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::InvalidRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::NotFound, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::Server, message)
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::Payload, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorKind::Unknown, message)
    }
}

/// Error classification for diagnostics. The dialog engine never retries on
/// any of these; a failed call aborts the transition in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommerceErrorKind {
    /// Connection failures, timeouts
    Network,
    /// Authentication rejected (401, 403)
    Auth,
    /// Rate limited (429)
    RateLimit,
    /// Bad request (400)
    InvalidRequest,
    /// Missing resource (404)
    NotFound,
    /// Backend failure (5xx)
    Server,
    /// 2xx with a body that does not match the expected shape
    Payload,
    /// Anything else
    Unknown,
}
