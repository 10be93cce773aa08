// ── Core error types ──
//
// User-facing errors from rdmgate-core. Every failure is scoped to one
// section or UID; nothing here is fatal to the gateway.

use thiserror::Error;

use crate::classify::ClassifiedStatus;

/// Message for a submission the transport refused synchronously.
pub const BACKEND_DISCONNECTED: &str = "Failed to send request, client isn't connected";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller input ─────────────────────────────────────────────────
    /// Caller input rejected before any transaction was issued.
    #[error("{message}")]
    Validation { message: String },

    #[error("Unknown section: {section}")]
    UnknownSection { section: String },

    // ── Transport ────────────────────────────────────────────────────
    /// The transport refused the submission (destination busy or link down).
    #[error("Failed to send request, client isn't connected")]
    BackendDisconnected,

    // ── Protocol ─────────────────────────────────────────────────────
    /// The device or transport answered with a failure status.
    #[error("{message}")]
    Protocol {
        status: ClassifiedStatus,
        message: String,
    },

    // ── Lifecycle ────────────────────────────────────────────────────
    #[error("Gateway dropped before the request completed")]
    ReplyDropped,

    #[error(transparent)]
    Api(#[from] rdmgate_api::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wrap a failure status. Callers must not pass a success status.
    pub(crate) fn protocol(status: ClassifiedStatus) -> Self {
        let message = status.message();
        Self::Protocol { status, message }
    }

    /// Returns `true` if the error was detected locally, before touching a device.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownSection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_displays_classifier_message() {
        let err = CoreError::protocol(ClassifiedStatus::Nacked(6));
        assert_eq!(
            err.to_string(),
            "request was rejected with code: Data out of range"
        );
        assert!(!err.is_local());
    }

    #[test]
    fn disconnected_message_is_stable() {
        assert_eq!(CoreError::BackendDisconnected.to_string(), BACKEND_DISCONNECTED);
    }
}
