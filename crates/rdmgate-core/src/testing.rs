// Scripted transport for unit tests: records what was submitted and lets
// the test decide what is accepted and when completions arrive.

use std::collections::HashSet;

use rdmgate_api::{RdmTransport, Token, Transaction, Uid};

#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    /// Accepted submissions, in order.
    pub submitted: Vec<(Token, Transaction)>,
    /// Every submission attempt, accepted or not.
    pub attempts: usize,
    /// Destinations that refuse submissions.
    pub busy: HashSet<Uid>,
    pub disconnected: bool,
}

impl MockTransport {
    pub(crate) fn last(&self) -> &(Token, Transaction) {
        self.submitted.last().expect("nothing was submitted")
    }
}

impl RdmTransport for MockTransport {
    fn submit(&mut self, token: Token, transaction: Transaction) -> bool {
        self.attempts += 1;
        if self.disconnected || self.busy.contains(&transaction.uid) {
            return false;
        }
        self.submitted.push((token, transaction));
        true
    }
}
