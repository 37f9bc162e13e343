//! Transport layer.
//!
//! The engine only ever sees the [`Transport`] capability (send). Inbound
//! events reach it through its handler methods, called by the driver in
//! [`ws`], which owns the socket.

pub mod codec;
pub mod ws;

use async_trait::async_trait;
use bytes::Bytes;

use framelink_core::error::Result;
use framelink_core::protocol::Command;

/// Outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Sent as a text message (control tokens).
    Text(String),
    /// Sent as a binary message (input events).
    Binary(Bytes),
}

impl From<Command> for Outbound {
    fn from(c: Command) -> Self {
        Outbound::Text(c.as_str().to_owned())
    }
}

/// Send half of a connection, injected into the engine.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, msg: Outbound) -> Result<()>;
}
