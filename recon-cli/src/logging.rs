//! Logging setup for the `recon` binary.
//!
//! Libraries only emit `tracing` events; the subscriber lives here. Logs go to
//! stderr so cleaned output on stdout can be piped.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Map `-v` occurrences to a default filter. `RUST_LOG` wins when set.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }
}
