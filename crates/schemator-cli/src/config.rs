//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use schemator_core::ConverterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Converter settings: path delimiter and default strictness
    pub converter: ConverterConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators for mass conversion
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::JsonPretty,
            color: true,
            progress: true,
        }
    }
}

/// Document formats understood by the CLI, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    /// Detect the format of a file, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",
            FileFormat::Yaml => "YAML",
            FileFormat::Toml => "TOML",
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path).map_err(|e| match e {
                Error::FileNotFound { .. } => e,
                other => Error::config(format!("{}: {}", path.display(), other)),
            })
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".schemator.yaml"),
            PathBuf::from(".schemator.yml"),
            PathBuf::from(".schemator.json"),
            PathBuf::from(".schemator.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let schemator_dir = config_dir.join("schemator");
            paths.push(schemator_dir.join("config.yaml"));
            paths.push(schemator_dir.join("config.json"));
            paths.push(schemator_dir.join("config.toml"));
        }

        paths
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn apply_overrides(
        &mut self,
        delimiter: Option<&str>,
        format: Option<OutputFormat>,
        no_color: bool,
    ) {
        if let Some(delimiter) = delimiter {
            self.converter.delimiter = delimiter.to_string();
        }
        if let Some(format) = format {
            self.output.format = format;
        }
        if no_color {
            self.output.color = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.converter.delimiter, ".");
        assert!(!config.converter.strict);
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(config.output.color);
        assert_eq!(config.logging.level, None);
    }

    #[test]
    fn test_load_yaml_with_partial_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "converter:\n  delimiter: /\n  strict: true\noutput:\n  format: yaml\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.converter.delimiter, "/");
        assert!(config.converter.strict);
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.output.progress);
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = tempdir().unwrap();
        let toml_path = dir.path().join("config.toml");
        fs::write(&toml_path, "[logging]\nlevel = \"debug\"\nformat = \"json\"\n").unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));

        let json_path = dir.path().join("config.json");
        fs::write(&json_path, r#"{"output": {"format": "json", "color": false}}"#).unwrap();
        let config = Config::from_file(&json_path).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
    }

    #[test]
    fn test_explicit_file_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        let err = Config::load_with_file(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        let err = Config::load_with_file(Some(broken.as_path())).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config::default();
        config.apply_overrides(Some("::"), Some(OutputFormat::Json), true);
        assert_eq!(config.converter.delimiter, "::");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);

        config.apply_overrides(None, None, false);
        assert_eq!(config.converter.delimiter, "::");
        assert!(!config.output.color);
    }

    #[test]
    fn test_file_format_detection() {
        assert_eq!(FileFormat::from_path(Path::new("a.yml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.toml")), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("a.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a")), FileFormat::Json);
    }
}
