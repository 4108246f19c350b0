//! Adapter orchestration
//!
//! The [`Adapter`] is the single concrete type behind both contracts of
//! this crate: the consumer-facing request API ([`Adapter::submit`]) and
//! the engine-facing event sink ([`Adapter::on_event`]). It owns the
//! readiness gate, the request correlator and the failure context, and
//! routes every inbound event either to request-completion handling or
//! to unsolicited-notification handling.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │        Consumer         │
//! └─────┬─────────────▲─────┘
//!       │ submit()    │ on_callback()
//! ┌─────▼─────────────┴─────┐
//! │         Adapter         │ ◄── This Module
//! │  ReadinessTracker       │
//! │  RequestCorrelator      │
//! │  CallFailureContext     │
//! └─────┬─────────────▲─────┘
//!       │ commands    │ on_event()
//! ┌─────▼─────────────┴─────┐
//! │     EngineTransport     │
//! └─────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! One `tokio::sync::Mutex` guards all mutable state; `submit` and
//! `on_event` each take it exactly once, so the adapter behaves as a
//! single logical thread of control even when the consumer and the event
//! source run on separate tasks. State is released before a callback is
//! delivered, so handlers may submit follow-up requests. `submit` never
//! waits for an engine round trip: it hands the command to the transport
//! (or rejects synchronously) and returns; the response arrives later
//! through the callback.

mod builder;

pub use builder::AdapterBuilder;

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::correlation::{Classification, PendingRequest, RequestCorrelator, RequestKind};
use crate::engine::{CallStatus, EngineEvent, EngineTransport};
use crate::error::{AdapterError, AdapterResult};
use crate::events::{AdapterEventHandler, CallbackEvent};
use crate::lifecycle::{self, CallFailureContext};
use crate::readiness::ReadinessTracker;
use crate::types::{CallRequest, REJECT_BUSY, REJECT_NOT_READY};

/// Mutable adapter state, all of it behind the one lock.
struct AdapterState {
    readiness: ReadinessTracker,
    correlator: RequestCorrelator,
    failure_context: CallFailureContext,
}

/// Call-control adapter over an asynchronous engine event stream.
///
/// Construct via [`Adapter::new`] or [`AdapterBuilder`], register a
/// callback handler, wire [`Adapter::on_event`] to the engine's event
/// source, then drive it with [`Adapter::submit`].
pub struct Adapter {
    transport: Arc<dyn EngineTransport>,
    handler: RwLock<Option<Arc<dyn AdapterEventHandler>>>,
    state: Mutex<AdapterState>,
}

impl Adapter {
    /// Create an adapter over the given engine transport.
    pub fn new(transport: Arc<dyn EngineTransport>) -> Self {
        Self::with_parts(transport, None)
    }

    pub(crate) fn with_parts(
        transport: Arc<dyn EngineTransport>,
        handler: Option<Arc<dyn AdapterEventHandler>>,
    ) -> Self {
        Self {
            transport,
            handler: RwLock::new(handler),
            state: Mutex::new(AdapterState {
                readiness: ReadinessTracker::new(),
                correlator: RequestCorrelator::new(),
                failure_context: CallFailureContext::default(),
            }),
        }
    }

    /// Start building an adapter.
    pub fn builder() -> AdapterBuilder {
        AdapterBuilder::new()
    }

    /// Register the consumer callback handler.
    ///
    /// A single handler is supported; registering a second one fails
    /// with [`AdapterError::HandlerAlreadyRegistered`].
    pub async fn register_callback(
        &self,
        handler: Arc<dyn AdapterEventHandler>,
    ) -> AdapterResult<()> {
        let mut slot = self.handler.write().await;
        if slot.is_some() {
            return Err(AdapterError::HandlerAlreadyRegistered);
        }
        *slot = Some(handler);
        Ok(())
    }

    /// Whether the engine is connected and the user session usable.
    pub async fn is_ready(&self) -> bool {
        self.state.lock().await.readiness.is_ready()
    }

    /// Shut the engine connection down.
    pub async fn shutdown(&self) -> bool {
        self.transport.shutdown().await
    }

    /// Submit a consumer request.
    ///
    /// Fire-and-forget: the method returns as soon as the command has
    /// been handed to the transport, rejected, or failed synchronously.
    /// Every outcome is reported through the callback handler:
    ///
    /// - not ready: `RejectResponse` with [`REJECT_NOT_READY`]
    /// - another request pending: `RejectResponse` with [`REJECT_BUSY`]
    /// - synchronous send failure: `ErrorResponse` (initiate) or
    ///   `CallErrorResponse` (call-scoped), pending request cleared
    /// - accepted: the kind-specific response arrives later through
    ///   [`Adapter::on_event`]
    pub async fn submit(&self, request: CallRequest) {
        let mut state = self.state.lock().await;

        if !state.readiness.is_ready() {
            debug!("rejecting {:?}: not ready", request);
            drop(state);
            self.deliver(CallbackEvent::RejectResponse {
                code: REJECT_NOT_READY,
                descr: "not ready".to_string(),
            })
            .await;
            return;
        }

        let kind = request_kind(&request);
        let correlation_id = match state.correlator.begin(kind) {
            Ok(id) => id,
            Err(err) => {
                warn!("rejecting {:?}: {}", request, err);
                drop(state);
                self.deliver(CallbackEvent::RejectResponse {
                    code: REJECT_BUSY,
                    descr: "request pending".to_string(),
                })
                .await;
                return;
            }
        };

        // Stale failure detail from the previous call must not leak into
        // this attempt's terminal event.
        if kind == RequestKind::InitiateCall {
            state.failure_context.clear();
        }

        let accepted = match &request {
            CallRequest::InitiateCall { party } => {
                self.transport.call(party, correlation_id).await
            }
            CallRequest::Drop { call_id } => {
                self.transport
                    .set_call_status(*call_id, CallStatus::Finished, correlation_id)
                    .await
            }
            CallRequest::PlayFile { call_id, filename } => {
                self.transport
                    .alter_input_file(*call_id, filename, correlation_id)
                    .await
            }
            CallRequest::RecordFile { call_id, filename } => {
                self.transport
                    .alter_output_file(*call_id, filename, correlation_id)
                    .await
            }
        };

        if accepted {
            return;
        }

        warn!("transport refused {:?} (correlation id {})", request, correlation_id);
        state.correlator.abandon();
        drop(state);

        let event = match request.call_id() {
            None => CallbackEvent::ErrorResponse {
                code: 0,
                descr: "failed to send call command".to_string(),
            },
            Some(call_id) => CallbackEvent::CallErrorResponse {
                call_id,
                code: 0,
                descr: "failed to send command".to_string(),
            },
        };
        self.deliver(event).await;
    }

    /// Feed one engine event into the adapter.
    ///
    /// Events must be delivered strictly in arrival order; the adapter
    /// does no reordering or buffering of its own.
    pub async fn on_event(&self, event: EngineEvent) {
        let mut state = self.state.lock().await;

        let outcome = match state.correlator.classify(event.correlation_id()) {
            // Already logged by the correlator; no consumer-visible effect.
            Classification::Mismatched => None,
            Classification::Unsolicited => Self::handle_unsolicited(&mut state, event),
            Classification::Completes(pending) => {
                Self::handle_completion(&mut state, pending, event)
            }
        };

        drop(state);
        if let Some(callback) = outcome {
            self.deliver(callback).await;
        }
    }

    /// Route an event that does not acknowledge the outstanding request.
    fn handle_unsolicited(state: &mut AdapterState, event: EngineEvent) -> Option<CallbackEvent> {
        match event {
            EngineEvent::ConnStatus { status } => {
                state.readiness.update_connection(status);
                None
            }
            EngineEvent::UserStatus { status } => {
                state.readiness.update_presence(status);
                None
            }
            EngineEvent::CurrentUserHandle { handle } => {
                info!("signed in as {}", handle);
                None
            }
            EngineEvent::CallStatus {
                call_id, status, ..
            } => lifecycle::translate(call_id, status, &state.failure_context),
            EngineEvent::CallPstnStatus {
                call_id,
                code,
                message,
            } => {
                debug!("call {}: pstn status {} {}", call_id, code, message);
                state.failure_context.record_pstn(code, message);
                None
            }
            EngineEvent::CallFailureReason { call_id, code } => {
                info!("call {}: failure reason {}", call_id, code);
                state.failure_context.record_failure(code);
                None
            }
            EngineEvent::CallVaaInputStatus {
                call_id, active, ..
            } => {
                if active {
                    Some(CallbackEvent::PlayStarted { call_id })
                } else {
                    Some(CallbackEvent::PlayStopped { call_id })
                }
            }
            EngineEvent::CallDuration { call_id, seconds } => {
                Some(CallbackEvent::CallDuration { call_id, seconds })
            }
            EngineEvent::Error { code, message, .. } => Some(CallbackEvent::ErrorResponse {
                code,
                descr: message,
            }),
            EngineEvent::Chat { chat_id, .. } | EngineEvent::ChatMember { chat_id, .. } => {
                debug!("ignoring chat event for {}", chat_id);
                None
            }
            EngineEvent::Unknown { raw } => {
                warn!("unknown event: {}", raw);
                None
            }
            EngineEvent::Undef => {
                debug!("ignoring undef event");
                None
            }
        }
    }

    /// Route the acknowledgement of the outstanding request.
    ///
    /// The correlator has already cleared the pending slot; a drop
    /// acknowledged with a non-finished status puts it back and keeps
    /// waiting for the real finished status.
    fn handle_completion(
        state: &mut AdapterState,
        pending: PendingRequest,
        event: EngineEvent,
    ) -> Option<CallbackEvent> {
        match pending.kind {
            RequestKind::InitiateCall => match event {
                EngineEvent::CallStatus {
                    call_id, status, ..
                } => Some(CallbackEvent::InitiateCallResponse { call_id, status }),
                other => {
                    warn!("unexpected response to initiate call: {:?}", other);
                    Some(CallbackEvent::ErrorResponse {
                        code: 0,
                        descr: "unexpected response".to_string(),
                    })
                }
            },
            RequestKind::Drop => match event {
                EngineEvent::CallStatus {
                    status: CallStatus::Finished,
                    ..
                } => Some(CallbackEvent::DropResponse),
                EngineEvent::CallStatus {
                    call_id, status, ..
                } => {
                    debug!(
                        "call {}: drop acknowledged with {:?}, awaiting finished",
                        call_id, status
                    );
                    state.correlator.put_back(pending);
                    None
                }
                other => {
                    warn!("unexpected response to drop: {:?}", other);
                    Some(CallbackEvent::ErrorResponse {
                        code: 0,
                        descr: "unexpected response".to_string(),
                    })
                }
            },
            RequestKind::PlayFile => match event {
                EngineEvent::CallVaaInputStatus { .. } => Some(CallbackEvent::PlayFileResponse),
                other => Some(unexpected_call_response(&other)),
            },
            RequestKind::RecordFile => match event {
                EngineEvent::CallVaaInputStatus { .. } => Some(CallbackEvent::RecordFileResponse),
                other => Some(unexpected_call_response(&other)),
            },
        }
    }

    /// Hand a callback event to the registered handler.
    async fn deliver(&self, event: CallbackEvent) {
        let handler = self.handler.read().await;
        match handler.as_ref() {
            Some(handler) => handler.on_callback(event).await,
            None => warn!("no callback handler registered, dropping {:?}", event),
        }
    }
}

fn request_kind(request: &CallRequest) -> RequestKind {
    match request {
        CallRequest::InitiateCall { .. } => RequestKind::InitiateCall,
        CallRequest::Drop { .. } => RequestKind::Drop,
        CallRequest::PlayFile { .. } => RequestKind::PlayFile,
        CallRequest::RecordFile { .. } => RequestKind::RecordFile,
    }
}

fn unexpected_call_response(event: &EngineEvent) -> CallbackEvent {
    warn!("unexpected response to file command: {:?}", event);
    CallbackEvent::CallErrorResponse {
        call_id: event.call_id().unwrap_or(0),
        code: 0,
        descr: "unexpected response".to_string(),
    }
}
