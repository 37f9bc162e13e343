//! Input lane: pointer/keyboard events (client -> server).
//!
//! Layout (little-endian), first byte selects the server-side handler:
//!
//! ```text
//! mouse: [1][action:u8][x:i32][y:i32][button:u8][wheel:i16]   13 bytes
//! key:   [2][action:u8][code:u32]                             6 bytes
//! ```
//!
//! Kind `0` is reserved for the message handler and never produced here.
//! Parsing follows the same rules as the rest of the crate: no indexing,
//! `remaining()` checks before every read.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameLinkError, Result};

/// Event kind: generic message (reserved).
pub const MESSAGE_EVENT: u8 = 0;
/// Event kind: pointer.
pub const MOUSE_EVENT: u8 = 1;
/// Event kind: keyboard.
pub const KEY_EVENT: u8 = 2;

const MOUSE_LEN: usize = 13;
const KEY_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Move = 0,
    Down = 1,
    Up = 2,
    Wheel = 3,
}

impl PointerAction {
    fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(PointerAction::Move),
            1 => Some(PointerAction::Down),
            2 => Some(PointerAction::Up),
            3 => Some(PointerAction::Wheel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Pressed = 0,
}

/// Abstract input event delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pointer {
        action: PointerAction,
        x: i32,
        y: i32,
        /// Button index for down/up, button mask for move.
        button: u8,
        /// Wheel delta, zero unless `action` is `Wheel`.
        wheel: i16,
    },
    Key {
        action: KeyAction,
        code: u32,
    },
}

impl InputEvent {
    pub fn pointer_moved(x: i32, y: i32, buttons: u8) -> Self {
        InputEvent::Pointer { action: PointerAction::Move, x, y, button: buttons, wheel: 0 }
    }

    pub fn pointer_down(x: i32, y: i32, button: u8) -> Self {
        InputEvent::Pointer { action: PointerAction::Down, x, y, button, wheel: 0 }
    }

    pub fn pointer_up(x: i32, y: i32, button: u8) -> Self {
        InputEvent::Pointer { action: PointerAction::Up, x, y, button, wheel: 0 }
    }

    pub fn pointer_wheel(x: i32, y: i32, delta: i16) -> Self {
        InputEvent::Pointer { action: PointerAction::Wheel, x, y, button: 0, wheel: delta }
    }

    pub fn key_pressed(code: u32) -> Self {
        InputEvent::Key { action: KeyAction::Pressed, code }
    }

    /// Event kind byte.
    pub fn kind(&self) -> u8 {
        match self {
            InputEvent::Pointer { .. } => MOUSE_EVENT,
            InputEvent::Key { .. } => KEY_EVENT,
        }
    }

    /// Serialize to wire bytes.
    pub fn encode(&self) -> Bytes {
        match *self {
            InputEvent::Pointer { action, x, y, button, wheel } => {
                let mut b = BytesMut::with_capacity(MOUSE_LEN);
                b.put_u8(MOUSE_EVENT);
                b.put_u8(action as u8);
                b.put_i32_le(x);
                b.put_i32_le(y);
                b.put_u8(button);
                b.put_i16_le(wheel);
                b.freeze()
            }
            InputEvent::Key { action, code } => {
                let mut b = BytesMut::with_capacity(KEY_LEN);
                b.put_u8(KEY_EVENT);
                b.put_u8(action as u8);
                b.put_u32_le(code);
                b.freeze()
            }
        }
    }

    /// Parse wire bytes (server side / tests).
    pub fn decode(mut buf: Bytes) -> Result<Self> {
        if buf.remaining() < 2 {
            return Err(FrameLinkError::BadInput("event too short".into()));
        }
        let kind = buf.get_u8();
        let action = buf.get_u8();

        match kind {
            MOUSE_EVENT => {
                if buf.remaining() != MOUSE_LEN - 2 {
                    return Err(FrameLinkError::BadInput(format!(
                        "mouse event must be {MOUSE_LEN} bytes"
                    )));
                }
                let action = PointerAction::from_u8(action).ok_or_else(|| {
                    FrameLinkError::BadInput(format!("unknown pointer action: {action}"))
                })?;
                let x = buf.get_i32_le();
                let y = buf.get_i32_le();
                let button = buf.get_u8();
                let wheel = buf.get_i16_le();
                Ok(InputEvent::Pointer { action, x, y, button, wheel })
            }
            KEY_EVENT => {
                if buf.remaining() != KEY_LEN - 2 {
                    return Err(FrameLinkError::BadInput(format!(
                        "key event must be {KEY_LEN} bytes"
                    )));
                }
                if action != KeyAction::Pressed as u8 {
                    return Err(FrameLinkError::BadInput(format!("unknown key action: {action}")));
                }
                Ok(InputEvent::Key { action: KeyAction::Pressed, code: buf.get_u32_le() })
            }
            MESSAGE_EVENT => Err(FrameLinkError::BadInput("message events are not input".into())),
            other => Err(FrameLinkError::BadInput(format!("unknown event kind: {other}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wheel_layout() {
        let b = InputEvent::pointer_wheel(-1, 300, -120).encode();
        assert_eq!(
            b.as_ref(),
            &[1, 3, 0xff, 0xff, 0xff, 0xff, 0x2c, 0x01, 0, 0, 0, 0x88, 0xff]
        );
    }

    #[test]
    fn key_survives_decode() {
        let ev = InputEvent::key_pressed(0x41);
        assert_eq!(InputEvent::decode(ev.encode()).unwrap(), ev);
    }

    #[test]
    fn truncated_and_unknown_are_rejected() {
        let mut b = InputEvent::pointer_down(1, 2, 0).encode().to_vec();
        b.pop();
        assert!(InputEvent::decode(Bytes::from(b)).is_err());
        assert!(InputEvent::decode(Bytes::from_static(&[9, 0])).is_err());
        assert!(InputEvent::decode(Bytes::from_static(&[1, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])).is_err());
        assert!(InputEvent::decode(Bytes::from_static(&[0, 0])).is_err());
        assert!(InputEvent::decode(Bytes::new()).is_err());
    }
}
