//! # deepclick Telemetry
//!
//! Collects interaction events into per-type buckets and builds the
//! end-of-session summary. Sending the summary anywhere is left to the caller.

mod collector;
mod error;
mod event;
mod installation;

pub use collector::{EventCollector, EventRecorder};
pub use error::TelemetryError;
pub use event::{EventData, EventType};
pub use installation::load_or_create_installation_id;
