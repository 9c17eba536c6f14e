//! Converts a YAML document on disk into pretty-printed JSON under `./temp/`.

pub mod config;
pub mod convert;
pub mod document;
mod error;
pub mod output;

pub use config::{Args, Config};
pub use convert::{convert, Conversion};
pub use error::Error;

use tracing_subscriber::EnvFilter;

/// Installs the stderr logger. `RUST_LOG` takes precedence over `verbosity`.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
