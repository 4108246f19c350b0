//! # Dialer-Core - Call-Control Adapter
//!
//! This crate bridges two worlds that do not naturally fit together: a
//! consumer that wants a small, synchronous-looking request API (place a
//! call, drop it, redirect its audio to or from a file) and a call
//! engine that communicates only through an asynchronous, text-based
//! event stream with no one-to-one pairing between a sent command and
//! the events it eventually produces.
//!
//! The adapter tracks readiness of the engine, serializes outstanding
//! commands, matches asynchronous events back to the command that caused
//! them (or recognizes them as unsolicited), translates engine call
//! statuses into a stable callback vocabulary, and decodes opaque
//! numeric failure codes into diagnostics.
//!
//! # What this crate is not
//!
//! It does no audio processing, manages no telephony hardware, and
//! implements no wire protocol: it consumes already-parsed, typed
//! [`engine::EngineEvent`]s and drives already-available command
//! primitives through the [`engine::EngineTransport`] trait.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dialer_core::{Adapter, CallRequest};
//! use dialer_core::engine::EngineTransport;
//! use dialer_core::events::AdapterEventHandler;
//!
//! async fn run(
//!     transport: Arc<dyn EngineTransport>,
//!     handler: Arc<dyn AdapterEventHandler>,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = Adapter::builder()
//!         .with_transport(transport)
//!         .with_handler(handler)
//!         .build()?;
//!
//!     // Wire adapter.on_event(..) to the engine's event source, then:
//!     adapter
//!         .submit(CallRequest::InitiateCall { party: "alice".to_string() })
//!         .await;
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod events;
pub mod failure;
pub mod lifecycle;
pub mod readiness;
pub mod types;

pub use adapter::{Adapter, AdapterBuilder};
pub use error::{AdapterError, AdapterResult};
pub use events::{AdapterEventHandler, CallEndKind, CallbackEvent};
pub use types::{CallRequest, REJECT_BUSY, REJECT_NOT_READY};
