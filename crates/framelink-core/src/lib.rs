//! framelink core: transport-agnostic pieces of the frame-streaming client.
//!
//! This crate holds the wire contracts (control tokens, inbound classification,
//! input events), the frame decoder and the `StreamSession` state machine that
//! governs frame credit. It carries no runtime or socket dependencies; the
//! client crate feeds it events and performs the I/O it asks for.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed traffic
//! surfaces as `FrameLinkError` or is absorbed (short raw frames), never as a
//! crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod decode;
pub mod error;
pub mod protocol;
pub mod session;

/// Shared result type.
pub use error::{Result, FrameLinkError};
