//! Control tokens (client -> server).
//!
//! Every token is exactly [`TOKEN_LEN`] ASCII bytes, space padded.

/// Width of every control token on the wire.
pub const TOKEN_LEN: usize = 5;

/// Closed set of control intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Begin streaming (`STVIS`). Also grants the first frame credit.
    StartStream,
    /// Stop streaming (`END  `).
    StopStream,
    /// Capture the current frame server-side (`SAVE `).
    CaptureFrame,
    /// Return frame credit / request the next frame (`NXTFR`).
    RequestNextFrame,
}

impl Command {
    /// All intents, in a stable order.
    pub const ALL: [Command; 4] = [
        Command::StartStream,
        Command::StopStream,
        Command::CaptureFrame,
        Command::RequestNextFrame,
    ];

    /// Wire token for this intent.
    pub fn token(self) -> &'static [u8; TOKEN_LEN] {
        match self {
            Command::StartStream => b"STVIS",
            Command::StopStream => b"END  ",
            Command::CaptureFrame => b"SAVE ",
            Command::RequestNextFrame => b"NXTFR",
        }
    }

    /// Token as `&str` (tokens are ASCII, sent as text messages).
    pub fn as_str(self) -> &'static str {
        match self {
            Command::StartStream => "STVIS",
            Command::StopStream => "END  ",
            Command::CaptureFrame => "SAVE ",
            Command::RequestNextFrame => "NXTFR",
        }
    }

    /// Encode into an owned buffer.
    pub fn encode(self) -> Vec<u8> {
        self.token().to_vec()
    }

    /// Server-side decode: exact 5-byte match, no trimming.
    ///
    /// `"END"` without padding is not a token; the server compares the
    /// whole payload.
    pub fn from_token(bytes: &[u8]) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.token().as_slice() == bytes)
    }

    /// Whether the server treats this token as a frame grant.
    pub fn grants_frame(self) -> bool {
        matches!(self, Command::StartStream | Command::RequestNextFrame)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
