//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_ENV: &str = "PRODPLAN_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable output for local runs.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = match lookup(LOG_FORMAT_ENV).as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("text") || v.eq_ignore_ascii_case("pretty") => {
                LogFormat::Text
            }
            _ => LogFormat::Json,
        };
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Filter comes from `RUST_LOG`, falling back to `config.default_filter`.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_info() {
        let config = ObservabilityConfig::from_lookup(|_| None);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.default_filter, "info");
    }

    #[test]
    fn text_format_from_env() {
        let config = ObservabilityConfig::from_lookup(|key| {
            (key == LOG_FORMAT_ENV).then(|| " Text ".to_string())
        });
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn init_is_idempotent() {
        let config = ObservabilityConfig::default();
        init(&config);
        init(&config);
        ::tracing::info!("still alive after double init");
    }
}
