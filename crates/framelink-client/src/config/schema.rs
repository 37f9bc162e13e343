use serde::Deserialize;
use framelink_core::decode::{FrameMode, MAX_DIMENSION};
use framelink_core::error::{FrameLinkError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub decoder: DecoderSection,

    #[serde(default)]
    pub sink: SinkSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FrameLinkError::UnsupportedVersion);
        }

        self.client.validate()?;
        self.decoder.validate()?;
        self.sink.validate()?;

        if self.decoder.mode == DecoderKind::Raw {
            let full = self.decoder.width as usize * self.decoder.height as usize * 3;
            if full > self.client.max_frame_bytes {
                return Err(FrameLinkError::BadConfig(format!(
                    "decoder.width x decoder.height needs {full} bytes per raw frame, \
                     above client.max_frame_bytes ({})",
                    self.client.max_frame_bytes
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            outbound_queue: default_outbound_queue(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(FrameLinkError::BadConfig(
                "client.url must start with ws:// or wss://".into(),
            ));
        }
        if !(1..=4096).contains(&self.outbound_queue) {
            return Err(FrameLinkError::BadConfig(
                "client.outbound_queue must be between 1 and 4096".into(),
            ));
        }
        if !(1024..=256 * 1024 * 1024).contains(&self.max_frame_bytes) {
            return Err(FrameLinkError::BadConfig(
                "client.max_frame_bytes must be between 1 KiB and 256 MiB".into(),
            ));
        }
        Ok(())
    }
}

fn default_url() -> String {
    "ws://localhost:9002/".into()
}
fn default_outbound_queue() -> usize {
    64
}
fn default_max_frame_bytes() -> usize {
    64 * 1024 * 1024
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DecoderKind {
    #[default]
    Raw,
    Compressed,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderSection {
    #[serde(default)]
    pub mode: DecoderKind,

    #[serde(default = "default_dimension")]
    pub width: u32,

    #[serde(default = "default_dimension")]
    pub height: u32,
}

impl Default for DecoderSection {
    fn default() -> Self {
        Self {
            mode: DecoderKind::default(),
            width: default_dimension(),
            height: default_dimension(),
        }
    }
}

impl DecoderSection {
    pub fn validate(&self) -> Result<()> {
        // compressed frames carry their own size
        if self.mode == DecoderKind::Compressed {
            return Ok(());
        }
        if !(1..=MAX_DIMENSION).contains(&self.width) {
            return Err(FrameLinkError::BadConfig(format!(
                "decoder.width must be between 1 and {MAX_DIMENSION}"
            )));
        }
        if !(1..=MAX_DIMENSION).contains(&self.height) {
            return Err(FrameLinkError::BadConfig(format!(
                "decoder.height must be between 1 and {MAX_DIMENSION}"
            )));
        }
        Ok(())
    }

    pub fn frame_mode(&self) -> FrameMode {
        match self.mode {
            DecoderKind::Raw => FrameMode::Raw { width: self.width, height: self.height },
            DecoderKind::Compressed => FrameMode::Compressed,
        }
    }
}

fn default_dimension() -> u32 {
    512
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Log,
    Snapshot,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkSection {
    #[serde(default)]
    pub kind: SinkKind,

    /// Snapshot sink: file rewritten with presented frames.
    #[serde(default = "default_snapshot_path")]
    pub path: String,

    /// Snapshot sink: write one of every `every` presented frames.
    #[serde(default = "default_every")]
    pub every: u32,

    /// Directory for client-side captures.
    #[serde(default = "default_capture_dir")]
    pub capture_dir: String,
}

impl Default for SinkSection {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            path: default_snapshot_path(),
            every: default_every(),
            capture_dir: default_capture_dir(),
        }
    }
}

impl SinkSection {
    pub fn validate(&self) -> Result<()> {
        if self.every == 0 {
            return Err(FrameLinkError::BadConfig("sink.every must be at least 1".into()));
        }
        if self.kind == SinkKind::Snapshot && self.path.is_empty() {
            return Err(FrameLinkError::BadConfig(
                "sink.path must be set for the snapshot sink".into(),
            ));
        }
        Ok(())
    }
}

fn default_snapshot_path() -> String {
    "frame.png".into()
}
fn default_every() -> u32 {
    1
}
fn default_capture_dir() -> String {
    ".".into()
}
