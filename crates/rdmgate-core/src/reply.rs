// ── Frontend replies ──
//
// Every frontend request that needs the bus returns a `PendingReply`
// backed by a oneshot channel. The gateway fulfils it from whichever
// completion finishes the operation.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::error::CoreError;
use crate::model::{SectionData, SectionDescriptor};

/// The finished result of a section operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Section(SectionData),
    /// A write succeeded (or was broadcast and needs no response).
    Ack,
    Sections(Vec<SectionDescriptor>),
    Pids(Vec<u16>),
}

/// Extracts a typed result from an [`Outcome`].
pub trait FromOutcome: Sized {
    fn from_outcome(outcome: Outcome) -> Result<Self, CoreError>;
}

fn mismatch(expected: &str, outcome: &Outcome) -> CoreError {
    CoreError::Internal(format!("expected {expected}, got {outcome:?}"))
}

impl FromOutcome for SectionData {
    fn from_outcome(outcome: Outcome) -> Result<Self, CoreError> {
        match outcome {
            Outcome::Section(data) => Ok(data),
            other => Err(mismatch("section data", &other)),
        }
    }
}

impl FromOutcome for () {
    fn from_outcome(outcome: Outcome) -> Result<Self, CoreError> {
        match outcome {
            Outcome::Ack => Ok(()),
            other => Err(mismatch("acknowledgement", &other)),
        }
    }
}

impl FromOutcome for Vec<SectionDescriptor> {
    fn from_outcome(outcome: Outcome) -> Result<Self, CoreError> {
        match outcome {
            Outcome::Sections(sections) => Ok(sections),
            other => Err(mismatch("section list", &other)),
        }
    }
}

impl FromOutcome for Vec<u16> {
    fn from_outcome(outcome: Outcome) -> Result<Self, CoreError> {
        match outcome {
            Outcome::Pids(pids) => Ok(pids),
            other => Err(mismatch("parameter list", &other)),
        }
    }
}

pub(crate) type ReplySender = oneshot::Sender<Result<Outcome, CoreError>>;

/// Handle for a result that arrives once the gateway has processed the
/// completions it depends on.
///
/// Poll it without a runtime via [`try_take`](Self::try_take), or `.await`
/// it. If the gateway is dropped first, it resolves to
/// [`CoreError::ReplyDropped`].
#[derive(Debug)]
#[must_use = "a pending reply does nothing unless polled"]
pub struct PendingReply<T> {
    rx: oneshot::Receiver<Result<Outcome, CoreError>>,
    taken: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: FromOutcome> PendingReply<T> {
    pub(crate) fn channel() -> (ReplySender, Self) {
        let (tx, rx) = oneshot::channel();
        (
            tx,
            Self {
                rx,
                taken: false,
                _marker: PhantomData,
            },
        )
    }

    /// Take the result if it is ready. `None` while the operation is still
    /// waiting on the bus, and again once the result has been taken.
    pub fn try_take(&mut self) -> Option<Result<T, CoreError>> {
        if self.taken {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.taken = true;
                Some(result.and_then(T::from_outcome))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(CoreError::ReplyDropped)),
        }
    }
}

impl<T: FromOutcome> Future for PendingReply<T> {
    type Output = Result<T, CoreError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx).poll(cx).map(|received| match received {
            Ok(result) => result.and_then(T::from_outcome),
            Err(_) => Err(CoreError::ReplyDropped),
        })
    }
}
