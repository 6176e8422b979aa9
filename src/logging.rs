//! Logging setup for the binaries
//!
//! `RUST_LOG` wins when set; otherwise `[logging] level` applies to this
//! crate while `tower_http` request traces stay at debug.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Default filter directives for a given crate level
pub fn default_directives(level: &str) -> String {
    format!("football_stars={},tower_http=debug", level)
}

/// Install the global subscriber. `json` selects structured output,
/// anything else the human-readable formatter.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("info"),
            "football_stars=info,tower_http=debug"
        );
    }

    #[test]
    fn test_directives_parse() {
        assert!(EnvFilter::try_new(default_directives("debug")).is_ok());
    }
}
