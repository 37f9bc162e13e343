//! Lightweight in-process metrics.
//!
//! Counters and a decode-latency histogram kept as atomics, rendered in the
//! Prometheus text format and logged when the client shuts down.

pub mod metrics;

pub use metrics::ClientMetrics;
