use thiserror::Error;

/// Top-level error type for the `rdmgate-api` crate.
///
/// Transactions themselves never fail through this type: their outcome is
/// a [`ResponseStatus`](crate::ResponseStatus) delivered with the
/// completion. These errors cover parsing and fixture problems only.
#[derive(Debug, Error)]
pub enum Error {
    // ── Identifiers ─────────────────────────────────────────────────
    /// UID text was not of the form `mmmm:dddddddd`.
    #[error("Invalid UID '{input}': {reason}")]
    InvalidUid { input: String, reason: String },

    // ── Fixtures ────────────────────────────────────────────────────
    /// A simulated-bus fixture described the same UID twice in one universe.
    #[error("Duplicate device {uid} in universe {universe}")]
    DuplicateDevice { universe: u32, uid: String },

    /// A fixture field held a value the bus cannot represent.
    #[error("Invalid fixture field {field}: {reason}")]
    InvalidFixture { field: String, reason: String },
}

impl Error {
    /// Returns `true` if the error came from user-supplied identifier text.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::InvalidUid { .. })
    }
}
