// ── Raw response status ──
//
// What a transport reports about a finished transaction, before any
// interpretation. The response type is a raw byte so that transports can
// report codes this crate does not know about.

use strum::{Display, FromRepr};

/// Known response type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum ResponseType {
    TransportError = 0,
    BroadcastRequest = 1,
    RequestNacked = 2,
    MalformedResponse = 3,
    ValidResponse = 4,
}

/// E1.20 NACK reason codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(u16)]
pub enum NackReason {
    #[strum(to_string = "Unknown PID")]
    UnknownPid = 0x0000,
    #[strum(to_string = "Format error")]
    FormatError = 0x0001,
    #[strum(to_string = "Hardware fault")]
    HardwareFault = 0x0002,
    #[strum(to_string = "Proxy reject")]
    ProxyReject = 0x0003,
    #[strum(to_string = "Write protect")]
    WriteProtect = 0x0004,
    #[strum(to_string = "Unsupported command class")]
    UnsupportedCommandClass = 0x0005,
    #[strum(to_string = "Data out of range")]
    DataOutOfRange = 0x0006,
    #[strum(to_string = "Buffer full")]
    BufferFull = 0x0007,
    #[strum(to_string = "Packet size unsupported")]
    PacketSizeUnsupported = 0x0008,
    #[strum(to_string = "Sub device out of range")]
    SubDeviceOutOfRange = 0x0009,
    #[strum(to_string = "Proxy buffer full")]
    ProxyBufferFull = 0x000A,
}

/// Render a raw NACK reason, including codes outside E1.20.
pub fn nack_reason_text(code: u16) -> String {
    NackReason::from_repr(code).map_or_else(
        || format!("Unknown, was 0x{code:04x}"),
        |reason| reason.to_string(),
    )
}

/// Raw outcome of a transaction as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    pub response_type: u8,
    pub nack_reason: u16,
    pub error: String,
}

impl ResponseStatus {
    fn of(response_type: ResponseType) -> Self {
        Self {
            response_type: response_type as u8,
            nack_reason: 0,
            error: String::new(),
        }
    }

    pub fn valid() -> Self {
        Self::of(ResponseType::ValidResponse)
    }

    pub fn broadcast() -> Self {
        Self::of(ResponseType::BroadcastRequest)
    }

    pub fn nacked(reason: u16) -> Self {
        Self {
            nack_reason: reason,
            ..Self::of(ResponseType::RequestNacked)
        }
    }

    pub fn transport_error(detail: impl Into<String>) -> Self {
        Self {
            error: detail.into(),
            ..Self::of(ResponseType::TransportError)
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            error: detail.into(),
            ..Self::of(ResponseType::MalformedResponse)
        }
    }

    /// A status carrying an arbitrary, possibly unknown, response type code.
    pub fn raw(response_type: u8) -> Self {
        Self {
            response_type,
            nack_reason: 0,
            error: String::new(),
        }
    }

    /// The known response type, if the code is one.
    pub fn response_type(&self) -> Option<ResponseType> {
        ResponseType::from_repr(self.response_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_codes() {
        assert_eq!(
            ResponseStatus::valid().response_type(),
            Some(ResponseType::ValidResponse)
        );
        assert_eq!(ResponseStatus::nacked(6).nack_reason, 6);
        assert_eq!(ResponseStatus::raw(42).response_type(), None);
    }

    #[test]
    fn nack_text_covers_unknown_codes() {
        assert_eq!(nack_reason_text(0x0006), "Data out of range");
        assert_eq!(nack_reason_text(0x1234), "Unknown, was 0x1234");
    }
}
