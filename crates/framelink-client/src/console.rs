//! Operator console: one command per stdin line.
//!
//! ```text
//! start | stop | save | snap | quit
//! move X Y [BUTTONS] | down X Y BUTTON | up X Y BUTTON | wheel X Y DELTA
//! key CODE
//! ```

use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use framelink_core::error::{FrameLinkError, Result};
use framelink_core::protocol::InputEvent;

use crate::engine::Control;

/// Parse one console line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Control>> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else { return Ok(None) };
    if cmd.starts_with('#') {
        return Ok(None);
    }
    let args: Vec<&str> = parts.collect();

    let ctl = match (cmd, args.as_slice()) {
        ("start", []) => Control::Start,
        ("stop", []) => Control::Stop,
        ("save", []) => Control::Capture,
        ("snap", []) => Control::Snapshot,
        ("quit" | "exit", []) => Control::Quit,
        ("move", [x, y]) => Control::Input(InputEvent::pointer_moved(num(x)?, num(y)?, 0)),
        ("move", [x, y, b]) => Control::Input(InputEvent::pointer_moved(num(x)?, num(y)?, num(b)?)),
        ("down", [x, y, b]) => Control::Input(InputEvent::pointer_down(num(x)?, num(y)?, num(b)?)),
        ("up", [x, y, b]) => Control::Input(InputEvent::pointer_up(num(x)?, num(y)?, num(b)?)),
        ("wheel", [x, y, d]) => Control::Input(InputEvent::pointer_wheel(num(x)?, num(y)?, num(d)?)),
        ("key", [code]) => Control::Input(InputEvent::key_pressed(num(code)?)),
        _ => return Err(FrameLinkError::BadInput(format!("unknown command: {}", line.trim()))),
    };
    Ok(Some(ctl))
}

fn num<N: FromStr>(s: &str) -> Result<N> {
    s.parse()
        .map_err(|_| FrameLinkError::BadInput(format!("not a valid number: {s}")))
}

/// Read stdin until EOF or `quit`, forwarding parsed controls.
pub fn spawn_stdin(tx: mpsc::Sender<Control>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(l)) => l,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            };
            match parse_line(&line) {
                Ok(Some(ctl)) => {
                    let quit = ctl == Control::Quit;
                    if tx.send(ctl).await.is_err() || quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "ignored console line"),
            }
        }
    })
}
