//! Telemetry metering: display filters (peak hold, smoothing, hold gates)
//! and the rolling message history.

pub mod filter;
pub mod message_log;
