//! Shared error type across netpolicy crates.

use thiserror::Error;

/// Stable error codes, used in logs and by callers that branch on the kind of
/// failure rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / missing field.
    BadRequest,
    /// Nothing matched the request.
    NotFound,
    /// The tag namespace is exhausted.
    TagCapacity,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::TagCapacity => "TAG_CAPACITY",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// Whether the caller can fix the request and try again.
    ///
    /// Only validation failures qualify. A delete that matched nothing is
    /// reported as a server-side failure on the wire.
    pub fn is_caller_error(self) -> bool {
        matches!(self, ClientCode::BadRequest)
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, NetPolicyError>;

/// Unified error type used by core, server, and clients.
#[derive(Debug, Error)]
pub enum NetPolicyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("invalid tag length: {0} (expected 1..=8)")]
    InvalidTagLength(usize),
    #[error("form new packet tag: not enough bytes to represent {0}")]
    TagCapacityExceeded(u64),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("{op}: unexpected status code: {status}")]
    UnexpectedStatus { op: &'static str, status: u16 },
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl NetPolicyError {
    /// Map an error to its stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            NetPolicyError::BadRequest(_) => ClientCode::BadRequest,
            NetPolicyError::NotFound => ClientCode::NotFound,
            NetPolicyError::TagCapacityExceeded(_) => ClientCode::TagCapacity,
            NetPolicyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            NetPolicyError::InvalidTagLength(_)
            | NetPolicyError::UnexpectedStatus { .. }
            | NetPolicyError::Transport(_)
            | NetPolicyError::Internal(_) => ClientCode::Internal,
        }
    }

    pub(crate) fn poisoned(what: &str) -> Self {
        NetPolicyError::Internal(format!("{what} lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validation_is_a_caller_error() {
        assert!(NetPolicyError::BadRequest("x".into()).client_code().is_caller_error());
        assert!(!NetPolicyError::NotFound.client_code().is_caller_error());
        assert!(!NetPolicyError::TagCapacityExceeded(17).client_code().is_caller_error());
        assert!(!NetPolicyError::Internal("x".into()).client_code().is_caller_error());
    }

    #[test]
    fn capacity_is_distinct_from_bad_configuration() {
        let cap = NetPolicyError::TagCapacityExceeded(17).client_code();
        let cfg = NetPolicyError::InvalidTagLength(9).client_code();
        assert_eq!(cap.as_str(), "TAG_CAPACITY");
        assert_ne!(cap, cfg);
    }
}
