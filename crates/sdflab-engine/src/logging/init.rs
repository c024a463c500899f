use std::sync::Once;

use log::LevelFilter;

/// How the global logger is set up.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"sdflab=debug,wgpu_core=warn"`.
    /// Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

impl LoggingConfig {
    /// Directives to parse, or `None` to log at [`LevelFilter::Info`].
    fn directives(&self, rust_log: Option<String>) -> Option<String> {
        self.env_filter.clone().or(rust_log).filter(|d| !d.trim().is_empty())
    }
}

static LOGGER: Once = Once::new();

/// Installs `env_logger` as the `log` backend. Only the first call has an
/// effect.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.directives(std::env::var("RUST_LOG").ok()) {
            Some(directives) => builder.parse_filters(&directives),
            None => builder.filter_level(LevelFilter::Info),
        };
        builder.write_style(config.write_style).init();
        log::debug!("logger installed");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_rust_log() {
        let config = LoggingConfig { env_filter: Some("debug".into()), ..LoggingConfig::default() };
        assert_eq!(config.directives(Some("warn".into())).as_deref(), Some("debug"));
    }

    #[test]
    fn rust_log_used_when_no_filter_given() {
        let config = LoggingConfig::default();
        assert_eq!(config.directives(Some("sdflab=trace".into())).as_deref(), Some("sdflab=trace"));
        assert_eq!(config.directives(None), None);
    }

    #[test]
    fn blank_directives_fall_back_to_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.directives(Some("  ".into())), None);
    }
}
