//! Error taxonomy for AMT management operations.
//!
//! Every failure a feature controller can hit maps onto exactly one of these
//! variants; the `Display` impl produced by `thiserror` is the single
//! descriptive line the CLI prints. Idempotent no-op paths ("already in
//! state") are success outcomes and never appear here.

use thiserror::Error;

/// Errors surfaced by the protocol-semantics layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmtError {
    /// The transport returned no response document. Fatal, never retried.
    #[error("connection failed: {0}")]
    TransportUnavailable(String),

    /// The remote end answered with a fault document. The reason string is
    /// carried verbatim.
    #[error("{subject} failed: {reason}")]
    OperationFailed { subject: String, reason: String },

    /// `EnabledState` of the redirection service was outside the packed
    /// bit-pair range 32768..=32771. No write is attempted.
    #[error("invalid redirection state {0}")]
    InvalidRedirectionState(i32),

    /// The caller passed an action word no table knows. Rejected before any
    /// network call is made.
    #[error("invalid action {0}")]
    UnknownAction(String),

    /// An expected property was absent from a success response.
    #[error("response is missing expected property {0}")]
    MissingProperty(String),

    /// A property that must be numeric could not be parsed as an integer.
    #[error("property {name} is not numeric: {value:?}")]
    MalformedProperty { name: String, value: String },
}

impl AmtError {
    /// Shorthand for the remote-fault variant.
    pub fn operation_failed(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        AmtError::OperationFailed {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}
