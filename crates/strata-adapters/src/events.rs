//! Event sink adapters.

use std::sync::{Arc, RwLock};

use strata_core::{
    application::{ApplicationError, ports::EventSink},
    domain::UnitStarted,
    error::StrataResult,
};
use tracing::info;

/// Emits every event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingEventSink {
    fn publish(&self, event: &UnitStarted) -> StrataResult<()> {
        let arguments = serde_json::to_string(event.arguments()).map_err(|e| {
            ApplicationError::PublishFailed {
                event: event.event_name(),
                reason: e.to_string(),
            }
        })?;

        info!(
            event = %event.event_name(),
            class = event.class_name(),
            %arguments,
            "Unit started"
        );
        Ok(())
    }
}

/// Keeps published events in memory (testing helper).
#[derive(Debug, Clone, Default)]
pub struct MemoryEventSink {
    events: Arc<RwLock<Vec<UnitStarted>>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events published so far, oldest first.
    pub fn events(&self) -> Vec<UnitStarted> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemoryEventSink {
    fn publish(&self, event: &UnitStarted) -> StrataResult<()> {
        self.events
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::domain::UnitKind;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemoryEventSink::new();
        sink.publish(&UnitStarted::feature("CreateInvoiceFeature"))
            .unwrap();
        sink.publish(&UnitStarted::job("SendInvoiceJob").with_argument("id", 7))
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), UnitKind::Feature);
        assert_eq!(events[1].event_name(), "JobStarted");
        assert_eq!(events[1].arguments()["id"], 7);
    }

    #[test]
    fn tracing_sink_accepts_events() {
        let event = UnitStarted::operation("ChargeCardOperation").with_argument("amount", 12.5);
        assert!(TracingEventSink::new().publish(&event).is_ok());
    }
}
