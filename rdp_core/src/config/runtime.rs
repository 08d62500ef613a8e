// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-category token counts
    pub collect_detailed_metrics: bool,

    /// Whether to log every rule registration at debug level
    pub log_rule_registration: bool,

    /// Whether to log every accepted token at debug level
    pub log_token_events: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_rule_registration: env::var(env_vars::LEXICAL_LOG_RULES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_token_events: env::var(env_vars::LEXICAL_LOG_TOKENS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Character repeated before the caret in diagnostic marker lines
    pub marker_filler: char,

    /// Whether to log cursor advancement at debug level
    pub log_cursor_movement: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            marker_filler: env::var(env_vars::SYNTAX_MARKER_FILLER)
                .ok()
                .and_then(|v| v.chars().next())
                .unwrap_or(' '),
            log_cursor_movement: env::var(env_vars::SYNTAX_LOG_CURSOR)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Runtime configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// All runtime preferences, loadable from TOML
///
/// Sections and keys that are absent fall back to the environment-aware
/// defaults of each preference struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Environment variable names read by the preference defaults
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "RDP_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_LOG_RULES: &str = "RDP_LEXICAL_LOG_RULES";
    pub const LEXICAL_LOG_TOKENS: &str = "RDP_LEXICAL_LOG_TOKENS";

    // Syntax
    pub const SYNTAX_MARKER_FILLER: &str = "RDP_SYNTAX_MARKER_FILLER";
    pub const SYNTAX_LOG_CURSOR: &str = "RDP_SYNTAX_LOG_CURSOR";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "RDP_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "RDP_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "RDP_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_toml_overrides() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            collect_detailed_metrics = true

            [syntax]
            marker_filler = "-"

            [logging]
            min_log_level = "debug"
            use_structured_logging = true
            "#,
        )
        .unwrap();

        assert!(config.lexical.collect_detailed_metrics);
        assert_eq!(config.syntax.marker_filler, '-');
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.use_structured_logging);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        let defaults = RuntimeConfig::default();
        assert_eq!(config.syntax.marker_filler, defaults.syntax.marker_filler);
        assert_eq!(
            config.logging.min_log_level,
            defaults.logging.min_log_level
        );
    }

    #[test]
    fn test_lexical_diagnostics_off_by_default() {
        if env::var(env_vars::LEXICAL_DETAILED_METRICS).is_ok()
            || env::var(env_vars::LEXICAL_LOG_TOKENS).is_ok()
        {
            return;
        }
        let preferences = LexicalPreferences::default();
        assert!(!preferences.collect_detailed_metrics);
        assert!(!preferences.log_token_events);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = RuntimeConfig::from_toml_str("[syntax]\nmarker_filler = 12");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rdp.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[syntax]\nmarker_filler = \"~\"").unwrap();

        let config = RuntimeConfig::from_file(&path).unwrap();
        assert_eq!(config.syntax.marker_filler, '~');

        let missing = RuntimeConfig::from_file(dir.path().join("missing.toml"));
        assert_matches!(missing, Err(ConfigError::Io { .. }));
    }
}
