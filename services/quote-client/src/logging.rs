//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::QuoteConfig;

/// Install a fmt subscriber filtered at the configured level.
///
/// `RUST_LOG` takes precedence when set. Returns false if a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_logging(config: &QuoteConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let config = QuoteConfig::default();
        init_logging(&config);
        assert!(!init_logging(&config));
        tracing::info!("logging still works");
    }
}
