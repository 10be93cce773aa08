// ── Response classification ──
//
// Every component asks this module, and only this module, whether a
// transaction succeeded and what to tell the user if it did not.

use rdmgate_api::status::nack_reason_text;
use rdmgate_api::{RdmCommand, RdmPayload, ResponseStatus, ResponseType};

/// Closed taxonomy of transaction outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedStatus {
    Valid,
    /// Broadcast requests get no response by design. Not a user-facing error.
    BroadcastNoResponse,
    Nacked(u16),
    TransportError(String),
    Malformed(String),
    /// A response type code this gateway does not know.
    Unknown(u8),
}

impl ClassifiedStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// User-visible text. Empty for `Valid` and `BroadcastNoResponse`.
    pub fn message(&self) -> String {
        match self {
            Self::Valid | Self::BroadcastNoResponse => String::new(),
            Self::Nacked(reason) => {
                format!(
                    "request was rejected with code: {}",
                    nack_reason_text(*reason)
                )
            }
            Self::TransportError(detail) => format!("protocol command error: {detail}"),
            Self::Malformed(detail) => format!("malformed response: {detail}"),
            Self::Unknown(code) => format!("unknown response status: {code}"),
        }
    }
}

/// Classify a raw status. Total over every possible input.
pub fn classify(status: &ResponseStatus) -> ClassifiedStatus {
    match status.response_type() {
        Some(ResponseType::ValidResponse) => ClassifiedStatus::Valid,
        Some(ResponseType::BroadcastRequest) => ClassifiedStatus::BroadcastNoResponse,
        Some(ResponseType::RequestNacked) => ClassifiedStatus::Nacked(status.nack_reason),
        Some(ResponseType::TransportError) => {
            ClassifiedStatus::TransportError(status.error.clone())
        }
        Some(ResponseType::MalformedResponse) => ClassifiedStatus::Malformed(status.error.clone()),
        None => ClassifiedStatus::Unknown(status.response_type),
    }
}

/// Classify a completion for `command`, also rejecting a valid status whose
/// payload is the wrong shape for the command.
pub fn classify_completion(
    command: &RdmCommand,
    status: &ResponseStatus,
    payload: &RdmPayload,
) -> ClassifiedStatus {
    match classify(status) {
        ClassifiedStatus::Valid if !payload.fits(command) => {
            ClassifiedStatus::Malformed(format!("unexpected payload for {}", command.pid()))
        }
        other => other,
    }
}
