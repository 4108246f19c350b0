//! Shared fixture for the scenario tests: a recording mock transport and
//! a collecting callback handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dialer_core::engine::{CallStatus, ConnStatus, EngineEvent, EngineTransport, UserStatus};
use dialer_core::events::{AdapterEventHandler, CallbackEvent};
use dialer_core::Adapter;

/// A command as the engine transport saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum SentCommand {
    Call {
        party: String,
        correlation_id: u32,
    },
    SetCallStatus {
        call_id: u32,
        status: CallStatus,
        correlation_id: u32,
    },
    AlterInputFile {
        call_id: u32,
        filename: String,
        correlation_id: u32,
    },
    AlterOutputFile {
        call_id: u32,
        filename: String,
        correlation_id: u32,
    },
    Shutdown,
}

/// Engine transport double: records every command, accept/refuse is
/// switchable per test.
pub struct RecordingTransport {
    accept: AtomicBool,
    pub sent: Mutex<Vec<SentCommand>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            accept: AtomicBool::new(true),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn refuse_sends(&self) {
        self.accept.store(false, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentCommand> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, command: SentCommand) -> bool {
        self.sent.lock().unwrap().push(command);
        self.accept.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EngineTransport for RecordingTransport {
    async fn call(&self, party: &str, correlation_id: u32) -> bool {
        self.record(SentCommand::Call {
            party: party.to_string(),
            correlation_id,
        })
    }

    async fn set_call_status(&self, call_id: u32, status: CallStatus, correlation_id: u32) -> bool {
        self.record(SentCommand::SetCallStatus {
            call_id,
            status,
            correlation_id,
        })
    }

    async fn alter_input_file(&self, call_id: u32, filename: &str, correlation_id: u32) -> bool {
        self.record(SentCommand::AlterInputFile {
            call_id,
            filename: filename.to_string(),
            correlation_id,
        })
    }

    async fn alter_output_file(&self, call_id: u32, filename: &str, correlation_id: u32) -> bool {
        self.record(SentCommand::AlterOutputFile {
            call_id,
            filename: filename.to_string(),
            correlation_id,
        })
    }

    async fn shutdown(&self) -> bool {
        self.record(SentCommand::Shutdown)
    }
}

/// Callback handler double collecting everything it receives.
pub struct EventCollector {
    pub events: Mutex<Vec<CallbackEvent>>,
}

impl EventCollector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<CallbackEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<CallbackEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AdapterEventHandler for EventCollector {
    async fn on_callback(&self, event: CallbackEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dialer_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Build an adapter over the doubles and bring it to ready.
pub async fn ready_adapter() -> (Arc<Adapter>, Arc<RecordingTransport>, Arc<EventCollector>) {
    init_logging();

    let transport = RecordingTransport::new();
    let collector = EventCollector::new();
    let adapter = Adapter::builder()
        .with_transport(transport.clone())
        .with_handler(collector.clone())
        .build()
        .expect("adapter build");

    adapter
        .on_event(EngineEvent::ConnStatus {
            status: ConnStatus::Online,
        })
        .await;
    adapter
        .on_event(EngineEvent::UserStatus {
            status: UserStatus::Online,
        })
        .await;
    assert!(adapter.is_ready().await, "adapter should be ready");

    (adapter, transport, collector)
}
