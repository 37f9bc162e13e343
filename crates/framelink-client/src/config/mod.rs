//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use framelink_core::error::{FrameLinkError, Result};

pub use schema::{ClientConfig, ClientSection, DecoderKind, DecoderSection, SinkKind, SinkSection};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FrameLinkError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| FrameLinkError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
