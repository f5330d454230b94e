// RUNTIME PREFERENCES (User Experience)
//
// Every preference can be set from a TOML file or an ARITH_* environment
// variable. Values that would loosen a compile-time limit are rejected.

use super::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::log_success;
use crate::logging::{codes, Code};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    Parse { message: String },

    #[error("Setting '{setting}' is {value}, above the compile-time limit {max}")]
    LimitExceeded {
        setting: &'static str,
        value: usize,
        max: usize,
    },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            ConfigError::Io { .. } => codes::configuration::CONFIG_IO_ERROR,
            ConfigError::Parse { .. } => codes::configuration::CONFIG_PARSE_ERROR,
            ConfigError::LimitExceeded { .. } => codes::configuration::CONFIG_LIMIT_EXCEEDED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to count tokens per kind in the lexical metrics
    pub collect_detailed_metrics: bool,

    /// Whether to log every emitted token at debug level
    pub log_tokens: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_tokens: env::var(env_vars::LEXICAL_LOG_TOKENS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Parser depth limit; may lower but never raise MAX_PARSE_DEPTH
    pub max_parse_depth: usize,

    /// Whether to log the finished AST at debug level
    pub log_ast: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            max_parse_depth: env::var(env_vars::SYNTAX_MAX_PARSE_DEPTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_PARSE_DEPTH),
            log_ast: env::var(env_vars::SYNTAX_LOG_AST)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl SyntaxPreferences {
    /// Depth limit actually applied by the parser
    pub fn effective_max_depth(&self) -> usize {
        self.max_parse_depth.clamp(1, MAX_PARSE_DEPTH)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
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
                .unwrap_or(false),
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

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing sections and keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;

        log_success!(codes::success::CONFIGURATION_LOADED,
            "Runtime configuration loaded",
            "path" => path.display(),
            "max_parse_depth" => config.syntax.max_parse_depth
        );
        Ok(config)
    }

    /// Reject settings that try to exceed compile-time limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.syntax.max_parse_depth > MAX_PARSE_DEPTH {
            return Err(ConfigError::LimitExceeded {
                setting: "syntax.max_parse_depth",
                value: self.syntax.max_parse_depth,
                max: MAX_PARSE_DEPTH,
            });
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "ARITH_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_LOG_TOKENS: &str = "ARITH_LEXICAL_LOG_TOKENS";

    // Syntax
    pub const SYNTAX_MAX_PARSE_DEPTH: &str = "ARITH_SYNTAX_MAX_PARSE_DEPTH";
    pub const SYNTAX_LOG_AST: &str = "ARITH_SYNTAX_LOG_AST";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "ARITH_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "ARITH_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "ARITH_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("WARN"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [syntax]
            max_parse_depth = 8

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.syntax.max_parse_depth, 8);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert_eq!(config.lexical, LexicalPreferences::default());
    }

    #[test]
    fn test_depth_above_compile_time_limit_is_rejected() {
        let toml = format!("[syntax]\nmax_parse_depth = {}\n", MAX_PARSE_DEPTH + 1);
        assert_matches!(
            RuntimeConfig::from_toml_str(&toml),
            Err(ConfigError::LimitExceeded { setting: "syntax.max_parse_depth", .. })
        );
    }

    #[test]
    fn test_malformed_toml() {
        let err = RuntimeConfig::from_toml_str("[syntax\n").unwrap_err();
        assert_eq!(err.error_code(), codes::configuration::CONFIG_PARSE_ERROR);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RuntimeConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(RuntimeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arith.toml");
        std::fs::write(&path, "[lexical]\nlog_tokens = true\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert!(config.lexical.log_tokens);

        let missing = RuntimeConfig::load(dir.path().join("missing.toml"));
        assert_matches!(missing, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_effective_depth_is_clamped() {
        let prefs = SyntaxPreferences {
            max_parse_depth: 0,
            log_ast: false,
        };
        assert_eq!(prefs.effective_max_depth(), 1);
    }
}
