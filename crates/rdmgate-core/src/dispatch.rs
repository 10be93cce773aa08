// ── Transaction dispatch ──
//
// Wraps the transport: allocates tokens and stamps every transaction with
// the configured sub-device.

use tracing::{debug, trace};

use rdmgate_api::{RdmCommand, RdmTransport, Token, Transaction, Uid};

pub(crate) struct Dispatcher<T> {
    transport: T,
    next_token: u64,
    sub_device: u16,
}

impl<T: RdmTransport> Dispatcher<T> {
    pub(crate) fn new(transport: T, sub_device: u16) -> Self {
        Self {
            transport,
            next_token: 1,
            sub_device,
        }
    }

    /// Submit one transaction. `None` means the transport refused it and no
    /// completion will ever arrive.
    pub(crate) fn submit(&mut self, universe: u32, uid: Uid, command: RdmCommand) -> Option<Token> {
        let token = Token(self.next_token);
        self.next_token += 1;

        let pid = command.pid();
        let transaction =
            Transaction::new(universe, uid, command).with_sub_device(self.sub_device);
        if self.transport.submit(token, transaction) {
            trace!(universe, %uid, %pid, %token, "transaction submitted");
            Some(token)
        } else {
            debug!(universe, %uid, %pid, "transport rejected transaction");
            None
        }
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
