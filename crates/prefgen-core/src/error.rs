//! Error types raised by generated preference accessors

use thiserror::Error;

/// Result type alias for preference operations
pub type PrefResult<T> = Result<T, PrefError>;

/// A persisted value could not be converted by a serializer
///
/// Distinct from [`PrefError::AlreadyInitialized`] and [`PrefError::NotInitialized`]:
/// callers may recover from it, e.g. by falling back to a default value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("serialization error: {message}")]
pub struct SerializationError {
    message: String,
}

impl SerializationError {
    /// Create a new serialization error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The value had no matching enum case
    pub fn unknown_variant(type_name: &str, value: &str) -> Self {
        Self::new(format!("no variant of {type_name} named '{value}'"))
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error type for generated preference classes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefError {
    /// `initialize` was called on an already initialized preference class
    #[error("illegal state: preferences have already been initialized")]
    AlreadyInitialized,

    /// A group accessor, `clear` or the store accessor was used before `initialize`
    #[error("illegal state: preferences have not yet been initialized")]
    NotInitialized,

    /// The resource-string collaborator has no entry for a key resource
    #[error("missing string resource: {0}")]
    MissingResource(String),

    /// A serializer rejected a value
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl PrefError {
    /// Returns a stable numeric code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            PrefError::AlreadyInitialized => 1,
            PrefError::NotInitialized => 2,
            PrefError::MissingResource(_) => 3,
            PrefError::Serialization(_) => 4,
        }
    }

    /// Whether this error signals a call-order bug rather than bad data
    pub fn is_illegal_state(&self) -> bool {
        matches!(
            self,
            PrefError::AlreadyInitialized | PrefError::NotInitialized
        )
    }
}


#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
