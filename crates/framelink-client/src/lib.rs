//! framelink client library entry.
//!
//! Wires the config, the WebSocket transport, the streaming engine and the
//! frame sinks into a client. Used by the binary (`main.rs`) and by the
//! integration tests, which drive the engine over in-memory transports.

pub mod config;
pub mod console;
pub mod engine;
pub mod obs;
pub mod sink;
pub mod transport;

pub use engine::{ConnectionState, Control, DecodeOutcome, Engine};
