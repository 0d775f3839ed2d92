//! Error types for declaration loading and generation

use crate::diagnostics::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// The declaration source could not be read as a schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("failed to parse declaration source: {0}")]
    Parse(String),

    #[error("invalid type expression '{expr}': {reason}")]
    InvalidType { expr: String, reason: String },

    #[error("invalid type parameter '{expr}': {reason}")]
    InvalidTypeParam { expr: String, reason: String },
}

impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        SchemaError::Parse(err.to_string().trim_end().to_string())
    }
}

/// Generation was abandoned because at least one error was reported.
#[derive(Error, Debug, Clone)]
#[error("generation failed with {} error(s)", count_errors(.diagnostics))]
pub struct GenerationFailure {
    diagnostics: Vec<Diagnostic>,
}

impl GenerationFailure {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// All diagnostics reported during the pass, warnings included.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        count_errors(&self.diagnostics)
    }
}

fn count_errors(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Failure while generating a source file on disk.
#[derive(Error, Debug)]
pub enum GenerateFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    #[error("generated code is not valid Rust: {0}")]
    Format(#[from] syn::Error),
}
