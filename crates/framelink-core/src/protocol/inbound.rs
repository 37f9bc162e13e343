//! Inbound message classification (server -> client).
//!
//! Text messages are diagnostics: logged, never acted on. Binary messages
//! carry exactly one frame. Anything else is a protocol violation and is
//! reported to the caller instead of being dropped silently.

use bytes::Bytes;

use crate::error::{FrameLinkError, Result};

/// Message as handed over by a transport, before classification.
#[derive(Debug, Clone)]
pub enum RawInbound {
    Text(String),
    Binary(Bytes),
    /// A message kind the frame protocol has no meaning for.
    Other { kind: &'static str, len: usize },
}

/// Classified inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Diagnostic/control reply.
    Text(String),
    /// One frame payload.
    Frame(Bytes),
}

impl Inbound {
    pub fn len(&self) -> usize {
        match self {
            Inbound::Text(s) => s.len(),
            Inbound::Frame(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify a raw inbound message.
pub fn classify_inbound(msg: RawInbound) -> Result<Inbound> {
    match msg {
        RawInbound::Text(s) => Ok(Inbound::Text(s)),
        RawInbound::Binary(b) => Ok(Inbound::Frame(b)),
        RawInbound::Other { kind, len } => Err(FrameLinkError::UnclassifiableMessage(format!(
            "{kind} message ({len} bytes)"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn text_and_binary_are_classified() {
        let t = classify_inbound(RawInbound::Text("hello".into())).unwrap();
        assert_eq!(t, Inbound::Text("hello".into()));

        let f = classify_inbound(RawInbound::Binary(Bytes::from_static(&[1, 2, 3]))).unwrap();
        assert_eq!(f.len(), 3);
        assert!(matches!(f, Inbound::Frame(_)));
    }

    #[test]
    fn other_kinds_are_reported() {
        let err = classify_inbound(RawInbound::Other { kind: "raw-frame", len: 9 }).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unclassifiable);
        assert!(err.to_string().contains("raw-frame"));
    }
}
