use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provide one.
///
/// The wgpu internals are chatty at `info`; keep them at `warn`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "glint_engine=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`, before the window opens.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = select_filter(config.env_filter.as_deref(), env.as_deref());

        env_logger::Builder::new()
            .parse_filters(filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized with filter `{filter}`");
    });
}

/// Picks the active filter: explicit config, then `RUST_LOG`, then the default.
fn select_filter<'a>(configured: Option<&'a str>, env: Option<&'a str>) -> &'a str {
    configured
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_wins_over_env() {
        assert_eq!(select_filter(Some("debug"), Some("warn")), "debug");
    }

    #[test]
    fn env_filter_used_without_config() {
        assert_eq!(select_filter(None, Some("warn")), "warn");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(select_filter(None, None), DEFAULT_FILTER);
        assert_eq!(select_filter(None, Some("  ")), DEFAULT_FILTER);
    }
}
