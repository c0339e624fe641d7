//! Shared utilities for command handlers

use crate::config::{Config, FileFormat};
use crate::error::{Error, Result};
use schemator_core::{Schema, SchemaConverter, Value};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Map an optional path argument, where `-` or nothing means stdin
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path != Path::new("-") => Input::File(path.to_path_buf()),
            _ => Input::Stdin,
        }
    }

    /// Path used in error messages
    pub fn display_path(&self) -> PathBuf {
        match self {
            Input::Stdin => PathBuf::from("<stdin>"),
            Input::File(path) => path.clone(),
        }
    }

    /// Read the whole input as text
    pub fn read_to_string(&self) -> Result<String> {
        match self {
            Input::Stdin => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
            Input::File(path) => read_file(path),
        }
    }

    fn format(&self) -> FileFormat {
        match self {
            Input::Stdin => FileFormat::Json,
            Input::File(path) => FileFormat::from_path(path),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "File read");
    Ok(content)
}

/// Parse text in the given format into any deserializable type
pub fn parse_as<T: serde::de::DeserializeOwned>(
    content: &str,
    format: FileFormat,
    path: &Path,
) -> Result<T> {
    let invalid = |message: String| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: format.name().to_string(),
        message,
    };
    match format {
        FileFormat::Json => serde_json::from_str(content).map_err(|e| invalid(e.to_string())),
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| invalid(e.to_string())),
        FileFormat::Toml => toml::from_str(content).map_err(|e| invalid(e.to_string())),
    }
}

/// Read a document from a file or stdin
pub fn read_document(input: &Input) -> Result<Value> {
    let content = input.read_to_string()?;
    parse_as(&content, input.format(), &input.display_path())
}

/// Load a schema file
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = read_file(path)?;
    let schema: Schema = parse_as(&content, FileFormat::from_path(path), path)?;
    debug!(path = %path.display(), entries = schema.len(), "Schema loaded");
    Ok(schema)
}

/// Build a converter from the converter section of the configuration
pub fn build_converter(config: &Config) -> Result<SchemaConverter> {
    Ok(SchemaConverter::new().with_config(config.converter.clone())?)
}
