//! Diagnostics for `smallsh` using `tracing` + `tracing-subscriber`.
//!
//! Priority for the filter:
//! 1. `--debug` flag
//! 2. `SMALLSH_LOG` environment variable (any `EnvFilter` directive)
//! 3. `log_level` key in the rc file
//! 4. `warn`
//!
//! Everything goes to stderr so command output on stdout stays untouched.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "SMALLSH_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(debug: bool, config_level: Option<&str>) {
    let env_level = std::env::var(LOG_ENV).ok();
    let filter = resolve_filter(debug, env_level.as_deref(), config_level);

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_filter(debug: bool, env_level: Option<&str>, config_level: Option<&str>) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    [env_level, config_level]
        .into_iter()
        .flatten()
        .find_map(|directives| EnvFilter::try_new(directives.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_debug_flag_wins() {
        let filter = resolve_filter(true, Some("error"), Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_env_before_config() {
        let filter = resolve_filter(false, Some("error"), Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));

        let filter = resolve_filter(false, None, Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_default_is_warn() {
        let filter = resolve_filter(false, None, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
