//! Structured logging bootstrap.
//!
//! The pipeline itself only emits `tracing` events; this module gives
//! hosts and integration tests a one-call subscriber setup. All log
//! output goes to stderr.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console format (default).
    #[default]
    Human,
    /// Compact single-line format for log shippers.
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "console" | "pretty" => Ok(LogFormat::Human),
            "compact" | "machine" => Ok(LogFormat::Compact),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

/// Initialize the logging subsystem.
///
/// Call once at startup. Respects `RUST_LOG`; defaults to `info` for
/// this crate's targets when unset. Returns quietly if a subscriber is
/// already installed (useful in tests, where many cases race to
/// initialize).
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pci_pipeline=info,pci_redact=info"));

    let use_ansi = std::io::stderr().is_terminal();
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(false);

    let result = match format {
        LogFormat::Human => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    // Already-installed subscribers are fine; first one wins.
    let _ = result;
}
