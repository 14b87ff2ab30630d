//! File logging
//!
//! The terminal belongs to the UI, so traces go to
//! `~/.campaign-tui/campaign-tui.log`. Level comes from `RUST_LOG`.

use crate::config::Config;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; logging stays off if the file can't be opened
pub fn init() {
    let Some(dir) = Config::config_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("campaign-tui.log"))
        .ok();

    if let Some(file) = file {
        use tracing_subscriber::fmt;
        use tracing_subscriber::prelude::*;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init();
    }
}
