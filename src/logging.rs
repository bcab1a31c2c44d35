//! Tracing setup
//!
//! The widgets own the screen in raw mode, so log lines never go to the
//! terminal. They are appended to `termplay.log` in the cache directory
//! instead. If that file cannot be opened, logging is simply off.

use crate::settings::Settings;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG` when set, otherwise `info` (`debug` when verbose)
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    })
}

pub fn init(verbose: bool) {
    let path = Settings::log_path();
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
