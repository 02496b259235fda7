#![deny(missing_docs)]

//! # Document I/O
//!
//! Loading of the registry and specification documents, and rendering of the
//! final routes table.

use crate::error::{AppError, AppResult};
use crate::routes::RoutesTable;
use crate::tidy::tidy;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json` (and anything without a recognized extension).
    Json,
    /// `.yaml` / `.yml`.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parses a document from a string.
pub fn parse_document<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> AppResult<T> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Reads and parses a document, choosing the parser from the extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::General(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_document(&content, DocumentFormat::from_path(path))
        .map_err(|e| AppError::General(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Like [`load_document`], but a missing file yields `T::default()`.
pub fn load_optional_document<T: DeserializeOwned + Default>(path: &Path) -> AppResult<T> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Optional document not found; using empty default");
        return Ok(T::default());
    }
    load_document(path)
}

/// Renders the tidied table as pretty-printed JSON with a trailing newline.
pub fn render_routes(table: &RoutesTable) -> AppResult<String> {
    let value = tidy(serde_json::to_value(table)?);
    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}
