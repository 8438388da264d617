//! Configuration file loading for the annotator.
//!
//! Settings come from `annotate.toml` in the current directory (or the file
//! given with `--config`); command-line flags override them.

use chess_analysis::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uci::GoOptions;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Engine and search settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnnotateConfig {
    /// Path to the UCI engine. Defaults to "stockfish" (assumes it's in PATH).
    #[serde(default = "default_engine_path")]
    pub engine_path: String,
    /// Engine `Threads` option.
    #[serde(default = "default_threads")]
    pub threads: u32,
    /// Engine `Hash` option in megabytes; engine default when unset.
    #[serde(default)]
    pub hash_mb: Option<u32>,
    /// Search time per position in milliseconds.
    #[serde(default = "default_movetime_ms")]
    pub movetime_ms: u64,
    /// Fixed search depth; replaces `movetime_ms` when set.
    #[serde(default)]
    pub depth: Option<u32>,
}

fn default_engine_path() -> String {
    "stockfish".to_string()
}

fn default_threads() -> u32 {
    4
}

fn default_movetime_ms() -> u64 {
    chess_analysis::analyzer::DEFAULT_MOVETIME_MS
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            engine_path: default_engine_path(),
            threads: default_threads(),
            hash_mb: None,
            movetime_ms: default_movetime_ms(),
            depth: None,
        }
    }
}

impl AnnotateConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Self::config_path()`] is read if present and defaults are used
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns `annotate.toml` in the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("annotate.toml")
    }

    /// The search limit used for every position.
    pub fn go_options(&self) -> GoOptions {
        match self.depth {
            Some(depth) => GoOptions::depth(depth),
            None => GoOptions::movetime(self.movetime_ms),
        }
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            limit: self.go_options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
engine_path = "/usr/local/bin/stockfish"
threads = 8
hash_mb = 256
movetime_ms = 2500
depth = 18
"#;
        let config: AnnotateConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.engine_path, "/usr/local/bin/stockfish");
        assert_eq!(config.threads, 8);
        assert_eq!(config.hash_mb, Some(256));
        assert_eq!(config.movetime_ms, 2500);
        assert_eq!(config.depth, Some(18));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AnnotateConfig = toml::from_str("").unwrap();
        assert_eq!(config, AnnotateConfig::default());
        assert_eq!(config.engine_path, "stockfish");
        assert_eq!(config.threads, 4);
        assert_eq!(config.hash_mb, None);
        assert_eq!(config.movetime_ms, 1000);
        assert_eq!(config.depth, None);
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let result: Result<AnnotateConfig, _> = toml::from_str("threads = \"many\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_go_options_prefers_depth() {
        let mut config = AnnotateConfig::default();
        assert_eq!(config.go_options().to_uci(), "go movetime 1000");
        config.depth = Some(14);
        assert_eq!(config.go_options().to_uci(), "go depth 14");
        assert_eq!(config.analysis_config().limit, GoOptions::depth(14));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "engine_path = \"/opt/sf\"\nmovetime_ms = 300").unwrap();

        let config = AnnotateConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.engine_path, "/opt/sf");
        assert_eq!(config.movetime_ms, 300);
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = AnnotateConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_load_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "depth = [1, 2]").unwrap();
        let err = AnnotateConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse config"));
    }

    #[test]
    fn test_config_path() {
        assert_eq!(AnnotateConfig::config_path(), PathBuf::from("annotate.toml"));
    }
}
