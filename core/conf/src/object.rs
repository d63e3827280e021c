//! Data object storing the dataset administration configuration.
use serde::Deserialize;
use serde::Serialize;

use replicore_discovery::DiscoveryConf;
use replidataset_client_http::ExecutorOptions;

/// Global configuration for dataset administration processes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conf {
    /// Options for clients of the dataset executor service.
    #[serde(default)]
    pub dataset_executor: ExecutorOptions,

    /// Statically configured services to discover.
    #[serde(default)]
    pub discovery: DiscoveryConf,

    /// Logging configuration for the process.
    #[serde(default)]
    pub logging: LoggingConf,
}

/// Logging configuration for the process.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConf {
    /// Minimum level of log events to emit.
    #[serde(default)]
    pub level: LogLevel,
}

/// Supported log levels, mapped onto [`slog::Level`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for slog::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => slog::Level::Critical,
            LogLevel::Error => slog::Level::Error,
            LogLevel::Warning => slog::Level::Warning,
            LogLevel::Info => slog::Level::Info,
            LogLevel::Debug => slog::Level::Debug,
            LogLevel::Trace => slog::Level::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Conf;
    use super::LogLevel;

    #[test]
    fn defaults_for_missing_sections() {
        let conf: Conf = serde_yaml::from_str("{}").unwrap();
        assert_eq!(conf, Conf::default());
        assert_eq!(conf.dataset_executor.service, "dataset.executor");
        assert_eq!(conf.dataset_executor.api_version, "v3");
        assert_eq!(conf.dataset_executor.timeout_sec, 30);
        assert_eq!(conf.dataset_executor.timeout_connect_sec, 1);
        assert_eq!(conf.logging.level, LogLevel::Info);
        assert!(conf.discovery.services.is_empty());
    }

    #[test]
    fn decode_full_conf() {
        let conf: Conf = serde_yaml::from_str(
            r#"
discovery:
  services:
    dataset.executor:
      - http://executor-1:11015
      - http://executor-2:11015
dataset_executor:
  api_version: v4
  timeout_sec: 5
  user_id_header: X-Principal
logging:
  level: trace
"#,
        )
        .unwrap();
        assert_eq!(conf.discovery.services["dataset.executor"].len(), 2);
        assert_eq!(conf.dataset_executor.api_version, "v4");
        assert_eq!(conf.dataset_executor.service, "dataset.executor");
        assert_eq!(conf.dataset_executor.timeout_sec, 5);
        assert_eq!(conf.dataset_executor.user_id_header, "X-Principal");
        assert_eq!(conf.logging.level, LogLevel::Trace);
        assert_eq!(slog::Level::from(conf.logging.level), slog::Level::Trace);
    }
}
