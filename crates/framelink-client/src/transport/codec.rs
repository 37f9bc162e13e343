//! Decode-once codec for the transport layer.
//!
//! - Text / Binary => handed to the frame protocol for classification
//! - Ping/Pong/Close are surfaced for lifecycle management
//! - Raw frames have no meaning here and stay unclassifiable

use bytes::Bytes;
use tokio_tungstenite::tungstenite::Message;

use framelink_core::protocol::RawInbound;

use super::Outbound;

#[derive(Debug)]
pub enum WsInbound {
    Message(RawInbound),
    Ping,
    Pong,
    Close,
}

pub fn decode(msg: Message) -> WsInbound {
    match msg {
        Message::Text(s) => WsInbound::Message(RawInbound::Text(s)),
        Message::Binary(b) => WsInbound::Message(RawInbound::Binary(Bytes::from(b))),
        Message::Ping(_) => WsInbound::Ping,
        Message::Pong(_) => WsInbound::Pong,
        Message::Close(_) => WsInbound::Close,
        Message::Frame(f) => WsInbound::Message(RawInbound::Other {
            kind: "raw-frame",
            len: f.len(),
        }),
    }
}

pub fn encode(out: Outbound) -> Message {
    match out {
        Outbound::Text(s) => Message::Text(s),
        Outbound::Binary(b) => Message::Binary(b.to_vec()),
    }
}
