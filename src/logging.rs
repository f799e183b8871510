//! Logging initialization.
//!
//! All state here is ephemeral and in-memory, so logs go to stderr only.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Initialize the global tracing subscriber. `RUST_LOG` overrides the
/// configured level. Call once per process.
pub fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_gracefully() {
        let config = Config::default();
        assert!(init_logging(&config).is_ok());
        // The global subscriber is already set; the second call must error,
        // not panic.
        assert!(init_logging(&config).is_err());
    }
}
