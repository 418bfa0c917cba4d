//! Event audit log.
//!
//! [`EventAudit`] consumes the [`EventBus`](crate::bus::EventBus) tap and
//! writes a structured log line, with the JSON payload, for every published
//! envelope. It runs as a long-lived background task and stops when the bus
//! is dropped.

use tokio::sync::broadcast;

use crate::event::EventEnvelope;

/// Background service that logs every published event.
pub struct EventAudit;

impl EventAudit {
    /// Run the audit loop.
    ///
    /// Returns the number of envelopes logged once the channel is closed
    /// (i.e. the bus is dropped).
    pub async fn run(mut receiver: broadcast::Receiver<EventEnvelope>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(envelope) => {
                    Self::record(&envelope);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event audit lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(logged, "Event bus closed, audit shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn record(envelope: &EventEnvelope) {
        match serde_json::to_string(&envelope.event) {
            Ok(body) => tracing::info!(
                target: "civic_events::audit",
                event = %envelope.kind(),
                event_id = %envelope.id,
                occurred_at = %envelope.occurred_at,
                body = %body,
                "Event published"
            ),
            Err(e) => tracing::error!(
                event = %envelope.kind(),
                event_id = %envelope.id,
                error = %e,
                "Failed to serialize event for audit"
            ),
        }
    }
}
