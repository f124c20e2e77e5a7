//! Structured-log event subscriber.
//!
//! [`EventLogger`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and emits a tracing record for every received
//! [`MarketEvent`]. It runs as a long-lived background task and shuts down
//! gracefully when the bus sender is dropped.

use tokio::sync::broadcast;

use crate::bus::MarketEvent;

/// Background service that logs every market event.
pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(mut receiver: broadcast::Receiver<MarketEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        event_type = %event.event_type,
                        subject_type = ?event.subject_type,
                        subject_id = ?event.subject_id,
                        actor_user_id = ?event.actor_user_id,
                        "Market event"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
    }
}
