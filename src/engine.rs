//! Engine-facing vocabulary and the transport seam
//!
//! This module defines everything the adapter shares with the underlying
//! call engine: the typed event stream it consumes ([`EngineEvent`]) and
//! the command primitives it invokes ([`EngineTransport`]).
//!
//! The engine speaks an asynchronous, text-based protocol with no
//! guaranteed one-to-one pairing between a sent command and the events it
//! produces. Transport bring-up and line parsing happen elsewhere; by the
//! time an event reaches this crate it is already a typed [`EngineEvent`].
//! The only reliable way to tell a command acknowledgement apart from an
//! unrelated notification is the optional correlation id embedded in the
//! command and echoed back on acknowledgement-type events.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Engine connection state as reported by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnStatus {
    /// Not connected to the engine backend
    Offline,
    /// Connection attempt in progress
    Connecting,
    /// Connected and usable
    Online,
}

/// Presence of the local user session on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    /// Local user is signed out; no commands can succeed
    Offline,
    /// Signed in and available
    Online,
    /// Signed in, marked away
    Away,
    /// Signed in, do-not-disturb
    DoNotDisturb,
    /// Signed in, invisible to contacts
    Invisible,
    /// Signed in, marked not available
    NotAvailable,
}

/// Call status vocabulary of the engine.
///
/// The adapter translates a subset of these into consumer notifications
/// (see [`crate::lifecycle`]); the rest are logged as unhandled and
/// produce nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallStatus {
    /// No status / call object reset by the engine
    None,
    /// Call is being routed to the remote party
    Routing,
    /// Remote party is being alerted
    Ringing,
    /// Call is established, media flowing
    InProgress,
    /// Call ended normally (or with a PSTN-side failure, see pstn code)
    Finished,
    /// Call setup failed; a failure reason event carries the cause
    Failed,
    /// Call cancelled by the local side before establishment
    Cancelled,
    /// Remote party refused the call
    Refused,
    /// Early media before answer (unhandled by the adapter)
    EarlyMedia,
    /// Held by the local side (unhandled)
    LocalHold,
    /// Held by the remote side (unhandled)
    RemoteHold,
    /// Remote party did not pick up (unhandled)
    Missed,
    /// Remote party is busy (unhandled)
    Busy,
}

/// A single typed event from the engine's stream.
///
/// Closed variant set matched exhaustively by the adapter; an event the
/// parser could not recognize still arrives here, as [`EngineEvent::Unknown`].
/// Acknowledgement-capable variants carry an optional correlation id;
/// `None` marks the event as unsolicited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Engine connectivity changed
    ConnStatus { status: ConnStatus },
    /// Local user presence changed
    UserStatus { status: UserStatus },
    /// Engine reported the handle of the signed-in user
    CurrentUserHandle { handle: String },
    /// Call status transition, solicited or not
    CallStatus {
        call_id: u32,
        status: CallStatus,
        correlation_id: Option<u32>,
    },
    /// PSTN leg status for a call (code 0 means no PSTN-side failure)
    CallPstnStatus {
        call_id: u32,
        code: u32,
        message: String,
    },
    /// Numeric failure reason for a call, decoded by [`crate::failure`]
    CallFailureReason { call_id: u32, code: u32 },
    /// Audio input redirection state for a call; doubles as the
    /// acknowledgement for play/record-file commands when correlated
    CallVaaInputStatus {
        call_id: u32,
        active: bool,
        correlation_id: Option<u32>,
    },
    /// Periodic call duration report, in seconds
    CallDuration { call_id: u32, seconds: u32 },
    /// Explicit error reported by the engine
    Error {
        code: u32,
        message: String,
        correlation_id: Option<u32>,
    },
    /// Chat message event (not a call-control concern, ignored)
    Chat { chat_id: String, body: String },
    /// Chat membership event (ignored)
    ChatMember { chat_id: String, handle: String },
    /// Line the protocol parser could not interpret
    Unknown { raw: String },
    /// Event recognized by the parser but carrying no usable payload
    Undef,
}

impl EngineEvent {
    /// Correlation id embedded in this event, if the engine echoed one.
    ///
    /// Only acknowledgement-capable variants ever carry an id; for every
    /// other variant this returns `None`, which classifies the event as
    /// unsolicited regardless of correlator state.
    pub fn correlation_id(&self) -> Option<u32> {
        match self {
            EngineEvent::CallStatus { correlation_id, .. } => *correlation_id,
            EngineEvent::CallVaaInputStatus { correlation_id, .. } => *correlation_id,
            EngineEvent::Error { correlation_id, .. } => *correlation_id,
            _ => None,
        }
    }

    /// Call id this event refers to, for the call-scoped variants.
    pub fn call_id(&self) -> Option<u32> {
        match self {
            EngineEvent::CallStatus { call_id, .. }
            | EngineEvent::CallPstnStatus { call_id, .. }
            | EngineEvent::CallFailureReason { call_id, .. }
            | EngineEvent::CallVaaInputStatus { call_id, .. }
            | EngineEvent::CallDuration { call_id, .. } => Some(*call_id),
            _ => None,
        }
    }
}

/// Command primitives of the call engine.
///
/// Each send returns `true` when the command was accepted for
/// transmission, `false` on a synchronous send failure. A `true` return
/// says nothing about the outcome of the command itself; that arrives
/// later on the event stream, tagged with the correlation id passed here.
///
/// Implementations must not call back into the adapter from inside a
/// send; deliveries go through [`crate::Adapter::on_event`] on the event
/// stream's own task.
#[async_trait]
pub trait EngineTransport: Send + Sync {
    /// Place a call to `party`.
    async fn call(&self, party: &str, correlation_id: u32) -> bool;

    /// Force a call into the given status (hangup sends `Finished`).
    async fn set_call_status(&self, call_id: u32, status: CallStatus, correlation_id: u32) -> bool;

    /// Redirect call audio input from a file.
    async fn alter_input_file(&self, call_id: u32, filename: &str, correlation_id: u32) -> bool;

    /// Record call audio output into a file.
    async fn alter_output_file(&self, call_id: u32, filename: &str, correlation_id: u32) -> bool;

    /// Shut the engine connection down.
    async fn shutdown(&self) -> bool;
}
