//! Diagnostics collected during a generation pass
//!
//! Validation never stops at the first problem: every builder reports into a
//! shared [`Diagnostics`] sink and keeps going with the next sibling. Emission
//! only happens if no error was reported.

use serde::Serialize;
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Where in the declaration source a diagnostic applies.
///
/// Rendered as a path into the TOML document, e.g.
/// `preferences.groups[0].preferences[2] (count)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    /// The declaration source as a whole.
    pub fn source() -> Self {
        Self {
            path: String::new(),
            name: None,
        }
    }

    /// The `[generator]` table.
    pub fn generator() -> Self {
        Self {
            path: "generator".to_string(),
            name: None,
        }
    }

    /// The `[preferences]` table.
    pub fn root(name: &str) -> Self {
        Self {
            path: "preferences".to_string(),
            name: Some(name.to_string()),
        }
    }

    pub fn type_decl(index: usize, name: &str) -> Self {
        Self {
            path: format!("types[{index}]"),
            name: Some(name.to_string()),
        }
    }

    pub fn group(index: usize, name: &str) -> Self {
        Self {
            path: format!("preferences.groups[{index}]"),
            name: Some(name.to_string()),
        }
    }

    pub fn preference(group: usize, index: usize, name: &str) -> Self {
        Self {
            path: format!("preferences.groups[{group}].preferences[{index}]"),
            name: Some(name.to_string()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.path.is_empty()) {
            (_, true) => write!(f, "<source>"),
            (Some(name), false) => write!(f, "{} ({name})", self.path),
            (None, false) => write!(f, "{}", self.path),
        }
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Diagnostic sink shared by all builders of one pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an error at `location`.
    pub fn report(&mut self, location: &Location, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(location = %location, %message, "error reported");
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            location: location.clone(),
            message,
        });
    }

    /// Report a warning at `location`.
    pub fn warn(&mut self, location: &Location, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(location = %location, %message, "warning reported");
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            location: location.clone(),
            message,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_error()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics whose message contains `needle`.
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.message.contains(needle))
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
