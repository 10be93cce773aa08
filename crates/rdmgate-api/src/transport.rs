// ── Transaction client contract ──
//
// A transport accepts one addressed transaction at a time per destination.
// Acceptance is decided synchronously; the outcome arrives later as a
// `Completion` carrying the token the caller supplied.

use crate::command::Transaction;
use crate::payload::RdmPayload;
use crate::status::ResponseStatus;

/// Correlates a submission with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(pub u64);

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The outcome of an accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub token: Token,
    pub status: ResponseStatus,
    pub payload: RdmPayload,
}

impl Completion {
    pub fn new(token: Token, status: ResponseStatus, payload: RdmPayload) -> Self {
        Self {
            token,
            status,
            payload,
        }
    }
}

/// Something that can carry RDM transactions to devices.
///
/// Contract:
/// - `submit` returns `false` when the destination already has an
///   outstanding transaction or the transport is not connected. A rejected
///   token never completes.
/// - Every accepted token produces exactly one [`Completion`], delivered by
///   the caller's reactor loop. Completions for one destination arrive in
///   submission order.
pub trait RdmTransport {
    fn submit(&mut self, token: Token, transaction: Transaction) -> bool;
}

impl<T: RdmTransport + ?Sized> RdmTransport for Box<T> {
    fn submit(&mut self, token: Token, transaction: Transaction) -> bool {
        (**self).submit(token, transaction)
    }
}
