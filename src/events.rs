//! Consumer-facing events and the callback seam
//!
//! The adapter never blocks a caller waiting for the engine: every
//! outcome - responses to submitted requests, rejections, errors and
//! unsolicited call notifications alike - is delivered out of band as a
//! [`CallbackEvent`] through a registered [`AdapterEventHandler`].
//!
//! # Event Categories
//!
//! - **Responses** - `InitiateCallResponse`, `DropResponse`,
//!   `PlayFileResponse`, `RecordFileResponse` complete a submitted request
//! - **Rejections/Errors** - `RejectResponse`, `ErrorResponse`,
//!   `CallErrorResponse`
//! - **Call lifecycle** - `Dial`, `Ring`, `Connected`, `CallEnd`
//! - **Media notifications** - `PlayStarted`, `PlayStopped`, `CallDuration`
//!
//! # Usage Example
//!
//! ```rust
//! use dialer_core::events::{AdapterEventHandler, CallbackEvent};
//! use async_trait::async_trait;
//!
//! struct PrintHandler;
//!
//! #[async_trait]
//! impl AdapterEventHandler for PrintHandler {
//!     async fn on_callback(&self, event: CallbackEvent) {
//!         match event {
//!             CallbackEvent::Connected { call_id } => {
//!                 println!("call {} connected", call_id);
//!             }
//!             CallbackEvent::CallEnd { call_id, kind, code, descr } => {
//!                 println!("call {} ended: {:?} ({}) {}", call_id, kind, code, descr);
//!             }
//!             other => println!("event: {:?}", other),
//!         }
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engine::CallStatus;

/// Why a call ended, as reported in [`CallbackEvent::CallEnd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallEndKind {
    /// Engine reset the call without a stated reason
    None,
    /// Cancelled by the local side before establishment
    Cancelled,
    /// Ended normally
    Finished,
    /// Ended with a PSTN-side failure; code/descr carry the PSTN detail
    FailedPstn,
    /// Call setup failed; code/descr carry the decoded failure reason
    Failed,
    /// Refused by the remote party
    Refused,
}

/// Closed set of notifications delivered to the consumer.
///
/// Variants are matched exhaustively by handlers; the set never grows
/// behind the consumer's back within a major version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallbackEvent {
    /// A submitted `InitiateCall` was acknowledged by the engine
    InitiateCallResponse { call_id: u32, status: CallStatus },
    /// A submitted `Drop` completed
    DropResponse,
    /// A submitted `PlayFile` was acknowledged
    PlayFileResponse,
    /// A submitted `RecordFile` was acknowledged
    RecordFileResponse,
    /// Engine-level or request-level error, not tied to one call
    ErrorResponse { code: u32, descr: String },
    /// Request refused before reaching the engine (not ready, or busy)
    RejectResponse { code: u32, descr: String },
    /// Request-level error tied to a specific call
    CallErrorResponse { call_id: u32, code: u32, descr: String },
    /// Outgoing call is being routed
    Dial { call_id: u32 },
    /// Remote party is ringing
    Ring { call_id: u32 },
    /// Call established
    Connected { call_id: u32 },
    /// Call reached a terminal state
    CallEnd {
        call_id: u32,
        kind: CallEndKind,
        code: u32,
        descr: String,
    },
    /// File playback into the call started
    PlayStarted { call_id: u32 },
    /// File playback into the call stopped
    PlayStopped { call_id: u32 },
    /// Periodic duration report for an established call
    CallDuration { call_id: u32, seconds: u32 },
}

/// Consumer callback contract.
///
/// Registered once via [`crate::Adapter::register_callback`];
/// double registration is rejected. Deliveries happen on the event
/// stream's task, strictly in processing order, so a slow handler
/// back-pressures event processing.
#[async_trait]
pub trait AdapterEventHandler: Send + Sync {
    /// Receive one callback event.
    async fn on_callback(&self, event: CallbackEvent);
}
