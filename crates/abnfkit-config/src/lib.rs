use abnfkit_syntax::ParseOptions;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid log level {value:?}, expected one of off, error, warn, info, debug, trace")]
    InvalidLogLevel { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalogue rule used when the command line does not name one.
    pub rule: String,
    pub log_level: String,
    /// Write log records here instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub parse: ParseConfig,
}

/// The `[parse]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub memoize: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    pub guard_left_recursion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule: "filter".to_string(),
            log_level: "warn".to_string(),
            log_file: None,
            parse: ParseConfig::default(),
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        let options = ParseOptions::default();
        Self {
            memoize: options.memoize,
            max_depth: options.max_depth,
            guard_left_recursion: options.guard_left_recursion,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the log file path
        config.log_file = config
            .log_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/abnfkit");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim()).map_err(|_| ConfigError::InvalidLogLevel {
            value: self.log_level.clone(),
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_memoize(self.parse.memoize)
            .with_max_depth(self.parse.max_depth)
            .with_left_recursion_guard(self.parse.guard_left_recursion)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/abnfkit/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rule, "filter");
        assert_eq!(config.log_level().unwrap(), LevelFilter::Warn);
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_partial_parse_table() {
        let config: Config = toml::from_str(
            r#"
rule = "commonExpr"

[parse]
memoize = true
max_depth = 200
"#,
        )
        .unwrap();

        assert_eq!(config.rule, "commonExpr");
        let options = config.parse_options();
        assert!(options.memoize);
        assert_eq!(options.max_depth, Some(200));
        assert!(options.guard_left_recursion);
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let config = Config {
            log_level: "DEBUG".to_string(),
            ..Config::default()
        };
        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        let err = config.log_level().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { ref value } if value == "loud"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("ABNFKIT_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$ABNFKIT_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("ABNFKIT_TEST_VAR");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "rule = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            rule: "dateValue".to_string(),
            log_level: "info".to_string(),
            log_file: Some(PathBuf::from("/tmp/abnfkit.log")),
            parse: ParseConfig {
                memoize: true,
                max_depth: Some(64),
                guard_left_recursion: false,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_log_file_with_env_var_in_toml() {
        unsafe {
            env::set_var("ABNFKIT_LOG_ROOT", "/custom/logs");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "log_file = \"$ABNFKIT_LOG_ROOT/trace.log\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/custom/logs/trace.log")));

        unsafe {
            env::remove_var("ABNFKIT_LOG_ROOT");
        }
    }
}
