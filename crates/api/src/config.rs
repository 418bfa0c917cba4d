use std::time::Duration;

use civic_events::DispatchConfig;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-field lines (local development).
    Pretty,
    /// One JSON object per line (log shipping).
    Json,
}

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Application configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upper bound on a single event handler invocation, in milliseconds.
    pub handler_timeout_ms: u64,
    /// How long shutdown waits for in-flight event handlers, in seconds.
    pub shutdown_grace_secs: u64,
    /// Buffer size of the event bus tap.
    pub event_tap_capacity: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            handler_timeout_ms: 5_000,
            shutdown_grace_secs: 10,
            event_tap_capacity: 1024,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default  |
    /// |-----------------------|----------|
    /// | `HANDLER_TIMEOUT_MS`  | `5000`   |
    /// | `SHUTDOWN_GRACE_SECS` | `10`     |
    /// | `EVENT_TAP_CAPACITY`  | `1024`   |
    /// | `LOG_FORMAT`          | `pretty` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let handler_timeout_ms = parse_or(
            &lookup,
            "HANDLER_TIMEOUT_MS",
            "a positive integer",
            defaults.handler_timeout_ms,
        )?;
        let shutdown_grace_secs = parse_or(
            &lookup,
            "SHUTDOWN_GRACE_SECS",
            "a non-negative integer",
            defaults.shutdown_grace_secs,
        )?;
        let event_tap_capacity = parse_or(
            &lookup,
            "EVENT_TAP_CAPACITY",
            "a positive integer",
            defaults.event_tap_capacity,
        )?;

        if handler_timeout_ms == 0 {
            return Err(ConfigError {
                var: "HANDLER_TIMEOUT_MS",
                expected: "a positive integer",
                value: "0".into(),
            });
        }
        if event_tap_capacity == 0 {
            return Err(ConfigError {
                var: "EVENT_TAP_CAPACITY",
                expected: "a positive integer",
                value: "0".into(),
            });
        }

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError {
                    var: "LOG_FORMAT",
                    expected: "'pretty' or 'json'",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            handler_timeout_ms,
            shutdown_grace_secs,
            event_tap_capacity,
            log_format,
        })
    }

    /// Event bus settings derived from this configuration.
    pub fn dispatch(&self) -> DispatchConfig {
        DispatchConfig {
            handler_timeout: Duration::from_millis(self.handler_timeout_ms),
            shutdown_grace: Duration::from_secs(self.shutdown_grace_secs),
            tap_capacity: self.event_tap_capacity,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
            var,
            expected,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.handler_timeout_ms, 5_000);
        assert_eq!(config.shutdown_grace_secs, 10);
        assert_eq!(config.event_tap_capacity, 1024);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn values_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HANDLER_TIMEOUT_MS", "250"),
            ("SHUTDOWN_GRACE_SECS", " 3 "),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        let dispatch = config.dispatch();
        assert_eq!(dispatch.handler_timeout, Duration::from_millis(250));
        assert_eq!(dispatch.shutdown_grace, Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("HANDLER_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert_eq!(err.var, "HANDLER_TIMEOUT_MS");
        assert_eq!(
            err.to_string(),
            "HANDLER_TIMEOUT_MS must be a positive integer, got 'soon'"
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[("HANDLER_TIMEOUT_MS", "0")])).is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert_eq!(err.var, "LOG_FORMAT");
    }
}
