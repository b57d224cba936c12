//! Reading and writing form documents as JSON or YAML.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::spec::form::FormSpec;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON form document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML form document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported document extension for {0}; expected .json, .yaml or .yml")]
    UnsupportedExtension(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

pub fn parse_str(format: DocumentFormat, text: &str) -> Result<FormSpec, DocumentError> {
    let form = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(form)
}

pub fn read_path(path: &Path) -> Result<FormSpec, DocumentError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| DocumentError::UnsupportedExtension(path.to_path_buf()))?;
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?format, bytes = text.len(), "read form document");
    parse_str(format, &text)
}

pub fn to_string(format: DocumentFormat, form: &FormSpec) -> Result<String, DocumentError> {
    let text = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(form)?,
        DocumentFormat::Yaml => serde_yaml::to_string(form)?,
    };
    Ok(text)
}
