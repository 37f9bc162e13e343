//! framelink client
//!
//! - Connects to the frame server named in the config
//! - Reads operator commands from stdin (start/stop/save/snap/input/quit)
//! - Presents decoded frames to the configured sink

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use framelink_client::config::{self, SinkKind};
use framelink_client::obs::ClientMetrics;
use framelink_client::sink::{LogSink, Sink, SnapshotSink};
use framelink_client::{console, transport, Control};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "framelink.yaml".to_string());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "config load failed");
            std::process::exit(2);
        }
    };

    let sink: Box<dyn Sink> = match cfg.sink.kind {
        SinkKind::Log => Box::new(LogSink::new()),
        SinkKind::Snapshot => Box::new(SnapshotSink::new(&cfg.sink.path, cfg.sink.every)),
    };

    let metrics = Arc::new(ClientMetrics::default());
    let (ctl_tx, ctl_rx) = mpsc::channel(64);
    let _stdin = console::spawn_stdin(ctl_tx.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctl_tx.send(Control::Quit).await;
        }
    });

    tracing::info!(config = %path, "framelink-client starting");
    let res = transport::ws::run(&cfg, sink, ctl_rx, Arc::clone(&metrics)).await;
    tracing::info!(metrics = %metrics.render(), "framelink-client stopped");

    if let Err(e) = res {
        tracing::error!(code = e.code().as_str(), error = %e, "client failed");
        std::process::exit(1);
    }
}
