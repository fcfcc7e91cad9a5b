//! Diagnostic logging on stderr.
//!
//! Priority: `RUST_LOG` > `--debug` > `[logging] level` in the config file >
//! `warn`. User-facing output goes to stdout through the reporter and never
//! through here.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Picks the filter directive. `None` means "use `RUST_LOG` as is".
fn directive(rust_log_set: bool, debug_flag: bool, config_level: Option<&str>) -> Option<String> {
    if rust_log_set {
        None
    } else if debug_flag {
        Some("debug".to_string())
    } else {
        Some(config_level.unwrap_or(DEFAULT_LOG_LEVEL).to_string())
    }
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = match directive(std::env::var("RUST_LOG").is_ok(), debug_flag, config_level) {
        None => EnvFilter::from_default_env(),
        Some(level) => {
            EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins() {
        assert_eq!(directive(true, true, Some("info")), None);
    }

    #[test]
    fn test_debug_flag_beats_config() {
        assert_eq!(directive(false, true, Some("info")).as_deref(), Some("debug"));
    }

    #[test]
    fn test_config_then_default() {
        assert_eq!(directive(false, false, Some("info")).as_deref(), Some("info"));
        assert_eq!(directive(false, false, None).as_deref(), Some(DEFAULT_LOG_LEVEL));
    }
}
