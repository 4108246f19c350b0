//! Builder for the [`Adapter`]
//!
//! Mirrors the construction pattern used across the rest of the stack:
//! collect the collaborators with `with_*` methods, then `build()`.
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use dialer_core::{Adapter, engine::EngineTransport, events::AdapterEventHandler};
//! # fn example(
//! #     transport: Arc<dyn EngineTransport>,
//! #     handler: Arc<dyn AdapterEventHandler>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = Adapter::builder()
//!     .with_transport(transport)
//!     .with_handler(handler)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use super::Adapter;
use crate::engine::EngineTransport;
use crate::error::{AdapterError, AdapterResult};
use crate::events::AdapterEventHandler;

/// Builder for [`Adapter`].
pub struct AdapterBuilder {
    transport: Option<Arc<dyn EngineTransport>>,
    handler: Option<Arc<dyn AdapterEventHandler>>,
}

impl AdapterBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            handler: None,
        }
    }

    /// Set the engine transport (required).
    pub fn with_transport(mut self, transport: Arc<dyn EngineTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Register the callback handler up front (optional; may also be
    /// registered later via [`Adapter::register_callback`]).
    pub fn with_handler(mut self, handler: Arc<dyn AdapterEventHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Build the adapter.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-state error when no transport was provided.
    pub fn build(self) -> AdapterResult<Arc<Adapter>> {
        let transport = self
            .transport
            .ok_or_else(|| AdapterError::invalid_state("transport is required"))?;

        Ok(Arc::new(Adapter::with_parts(transport, self.handler)))
    }
}

impl Default for AdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
