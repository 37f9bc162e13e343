//! Wire protocol.
//!
//! - Control lane: fixed 5-byte ASCII tokens, client -> server, sent as text.
//! - Frame lane: one binary message per frame, server -> client.
//! - Input lane: small binary events tagged by their first byte.
//!
//! There is no envelope, version field or length header; the transport's own
//! message boundaries are the only framing.

pub mod command;
pub mod inbound;
pub mod input;

pub use command::{Command, TOKEN_LEN};
pub use inbound::{classify_inbound, Inbound, RawInbound};
pub use input::{InputEvent, KeyAction, PointerAction};
