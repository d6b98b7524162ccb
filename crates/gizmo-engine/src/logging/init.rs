use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "gizmo_engine=trace,wgpu=warn"). When unset, `RUST_LOG` is used, and when
/// that is unset too, `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    /// Caps the chatty `wgpu_core`/`wgpu_hal`/`naga` targets at `warn`
    /// unless the filter names them explicitly.
    pub quiet_wgpu: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            quiet_wgpu: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const WGPU_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored. A logger
/// installed by someone else first is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = config
            .env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok());

        if config.quiet_wgpu {
            for target in WGPU_TARGETS {
                if !filter.as_deref().is_some_and(|f| f.contains(target)) {
                    builder.filter_module(target, log::LevelFilter::Warn);
                }
            }
        }

        match filter.as_deref() {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None => {
                builder.filter_level(config.default_level);
            }
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            log::debug!("logger already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_info_and_quiet() {
        let config = LoggingConfig::default();
        assert_eq!(config.default_level, log::LevelFilter::Info);
        assert!(config.quiet_wgpu);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("trace".into()),
            ..LoggingConfig::default()
        });
        log::info!("still one logger");
    }
}
