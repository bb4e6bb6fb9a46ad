//! Engine snapshot decoding: telemetry state, listing state, best-effort polling.

pub mod listing;
pub mod poller;
pub mod telemetry;
