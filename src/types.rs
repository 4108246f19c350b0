//! Request types and shared constants
//!
//! The consumer talks to the adapter through a single `submit` entry
//! point taking one of the [`CallRequest`] variants below. Requests are
//! fire-and-forget: acceptance, rejection and eventual completion all
//! come back through the callback interface (see [`crate::events`]).

use serde::{Deserialize, Serialize};

/// Reject code: the adapter is not ready (engine offline or user signed out).
pub const REJECT_NOT_READY: u32 = 0;

/// Reject code: another request is still awaiting its engine response.
pub const REJECT_BUSY: u32 = 1;

/// A consumer request to the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallRequest {
    /// Place a call to the given party handle or phone number
    InitiateCall { party: String },
    /// Hang up an established or pending call
    Drop { call_id: u32 },
    /// Redirect the call's audio input from a file
    PlayFile { call_id: u32, filename: String },
    /// Record the call's audio output into a file
    RecordFile { call_id: u32, filename: String },
}

impl CallRequest {
    /// Call id this request targets, when it targets one.
    pub fn call_id(&self) -> Option<u32> {
        match self {
            CallRequest::InitiateCall { .. } => None,
            CallRequest::Drop { call_id }
            | CallRequest::PlayFile { call_id, .. }
            | CallRequest::RecordFile { call_id, .. } => Some(*call_id),
        }
    }
}
