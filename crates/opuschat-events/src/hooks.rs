use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::events::LlmEvent;

/// Sink for provider telemetry. Emission is fire-and-forget: a hook must not
/// make the provider fail, so `emit` returns nothing.
#[async_trait]
pub trait EventHooks: Send + Sync {
    async fn emit(&self, event: LlmEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHooks;

#[async_trait]
impl EventHooks for NullHooks {
    async fn emit(&self, _event: LlmEvent) {}
}

/// Forwards events to the `log` facade, one record per event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHooks;

#[async_trait]
impl EventHooks for LogHooks {
    async fn emit(&self, event: LlmEvent) {
        let stamp = Utc::now().to_rfc3339();
        match serde_json::to_string(&event) {
            Ok(json) => log::info!("[{}] {} {}", stamp, event.name(), json),
            Err(e) => log::warn!("[{}] {} (unserializable: {})", stamp, event.name(), e),
        }
    }
}

/// Records events in memory for inspection, mainly from tests
#[derive(Debug, Default)]
pub struct RecordingHooks {
    events: Mutex<Vec<LlmEvent>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns everything recorded so far
    pub fn take(&self) -> Vec<LlmEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Names of the recorded events, in emission order
    pub fn names(&self) -> Vec<&'static str> {
        match self.events.lock() {
            Ok(events) => events.iter().map(LlmEvent::name).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(LlmEvent::name).collect(),
        }
    }
}

#[async_trait]
impl EventHooks for RecordingHooks {
    async fn emit(&self, event: LlmEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
