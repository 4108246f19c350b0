//! Request/response correlation
//!
//! The engine interleaves unsolicited status notifications with the
//! actual acknowledgement of a command in the same stream. The only
//! reliable discriminator is the correlation id the adapter embeds in
//! each outbound command: acknowledgement-type events echo it back,
//! notifications carry none.
//!
//! [`RequestCorrelator`] owns the id counter and the single pending-
//! request slot. Ids are monotonically increasing per correlator
//! instance, never reused and never reset, so two adapters running side
//! by side do not share an id space.

use tracing::{debug, warn};

use crate::error::AdapterError;

/// What kind of request is awaiting its engine response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    InitiateCall,
    Drop,
    PlayFile,
    RecordFile,
}

/// The single outstanding request, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub kind: RequestKind,
    pub correlation_id: u32,
}

/// How an inbound event relates to the outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No pending request, or the event carries no correlation id:
    /// route it through the unsolicited-notification path
    Unsolicited,
    /// Correlated to an id that is not the pending one; discard
    Mismatched,
    /// Acknowledges the pending request, which has been cleared
    Completes(PendingRequest),
}

/// Issues correlation ids and matches events back to the outstanding command.
#[derive(Debug)]
pub struct RequestCorrelator {
    next_id: u32,
    pending: Option<PendingRequest>,
}

impl RequestCorrelator {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: None,
        }
    }

    /// Allocate the next correlation id and record the pending request.
    ///
    /// Fails without allocating when a request is already outstanding;
    /// ids are only ever consumed by commands that actually go out.
    pub fn begin(&mut self, kind: RequestKind) -> Result<u32, AdapterError> {
        if let Some(pending) = self.pending {
            return Err(AdapterError::RequestPending {
                correlation_id: pending.correlation_id,
            });
        }

        self.next_id += 1;
        let correlation_id = self.next_id;
        self.pending = Some(PendingRequest {
            kind,
            correlation_id,
        });

        debug!("pending {:?} with correlation id {}", kind, correlation_id);
        Ok(correlation_id)
    }

    /// Classify an inbound event by its correlation id.
    ///
    /// A matching id clears the pending slot and hands the request back
    /// inside [`Classification::Completes`]; the caller decides what the
    /// completion means. A present-but-different id is logged and
    /// discarded without touching the pending slot.
    pub fn classify(&mut self, correlation_id: Option<u32>) -> Classification {
        let Some(pending) = self.pending else {
            return Classification::Unsolicited;
        };

        match correlation_id {
            None => Classification::Unsolicited,
            Some(id) if id == pending.correlation_id => {
                self.pending = None;
                Classification::Completes(pending)
            }
            Some(id) => {
                warn!(
                    "correlation id {} does not match pending id {}, discarding event",
                    id, pending.correlation_id
                );
                Classification::Mismatched
            }
        }
    }

    /// Restore a request taken out by [`classify`](Self::classify).
    ///
    /// Used when a correlated event turned out not to be the terminal
    /// response (a drop acknowledged with a status other than finished)
    /// and the adapter must keep waiting.
    pub fn put_back(&mut self, pending: PendingRequest) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(pending);
    }

    /// Drop the pending request after a synchronous send failure.
    pub fn abandon(&mut self) {
        self.pending = None;
    }

    /// The request currently awaiting its response, if any.
    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }
}

impl Default for RequestCorrelator {
    fn default() -> Self {
        Self::new()
    }
}
