//! In-process event bus for session and listing change notifications.
//!
//! Handlers publish [`MarketEvent`]s on the [`EventBus`] and any number of
//! subscribers consume them independently over a broadcast channel.
//! [`EventLogger`] is the built-in subscriber that emits structured tracing
//! for every event.

pub mod bus;
pub mod logger;

pub use bus::{EventBus, MarketEvent};
pub use logger::EventLogger;
