//! Default values of preferences
//!
//! Defaults are given as structured TOML values in persisted form and checked
//! against the persisted kind. Without an explicit value the default is
//! `false`, zero, or "no value", depending on the kind.

use crate::classify::PersistedKind;
use crate::validate::escape_string_literal;

/// A validated default value.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StringSet(Vec<String>),
    /// No value; reads fall back to `None`.
    Absent,
}

impl DefaultValue {
    /// The implicit default for `kind`.
    pub fn implicit(kind: PersistedKind) -> Self {
        match kind {
            PersistedKind::Boolean => DefaultValue::Bool(false),
            PersistedKind::Byte
            | PersistedKind::Char
            | PersistedKind::Short
            | PersistedKind::Int
            | PersistedKind::Long => DefaultValue::Int(0),
            PersistedKind::Float | PersistedKind::Double => DefaultValue::Float(0.0),
            PersistedKind::String | PersistedKind::StringSet | PersistedKind::Void => {
                DefaultValue::Absent
            }
        }
    }

    /// Check an explicit default against `kind`, or compute the implicit one.
    ///
    /// Void preferences store nothing, so any explicit value is ignored.
    pub fn resolve(value: Option<&toml::Value>, kind: PersistedKind) -> Result<Self, String> {
        let Some(value) = value else {
            return Ok(Self::implicit(kind));
        };

        match (kind, value) {
            (PersistedKind::Void, _) => Ok(DefaultValue::Absent),
            (PersistedKind::Boolean, toml::Value::Boolean(b)) => Ok(DefaultValue::Bool(*b)),
            (kind, toml::Value::Integer(i)) if kind.is_integral() => check_range(*i, kind),
            (kind, toml::Value::String(s)) if kind.is_integral() => match s.trim().parse::<i64>() {
                Ok(i) => check_range(i, kind),
                Err(_) => Err(format!(
                    "Invalid default value for {kind} preference: \"{s}\" is not an integer"
                )),
            },
            (kind, toml::Value::Float(f)) if kind.is_floating() => check_float(*f, kind),
            (kind, toml::Value::Integer(i)) if kind.is_floating() => check_float(*i as f64, kind),
            (PersistedKind::String, toml::Value::String(s)) => Ok(DefaultValue::Str(s.clone())),
            (PersistedKind::StringSet, toml::Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => Ok(s.clone()),
                    other => Err(format!(
                        "Invalid default value for string-set preference: element {other} is not a string"
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(DefaultValue::StringSet),
            (kind, other) => Err(format!(
                "Invalid default value for {kind} preference: {other}"
            )),
        }
    }

    /// Text used in the `(default: …)` documentation suffix.
    ///
    /// String defaults are quoted and escaped.
    pub fn doc_text(&self) -> String {
        match self {
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::Int(i) => i.to_string(),
            DefaultValue::Float(f) => format!("{f:?}"),
            DefaultValue::Str(s) => escape_string_literal(s),
            DefaultValue::StringSet(items) => {
                let items: Vec<String> = items.iter().map(|s| escape_string_literal(s)).collect();
                format!("[{}]", items.join(", "))
            }
            DefaultValue::Absent => "None".to_string(),
        }
    }
}

fn check_range(value: i64, kind: PersistedKind) -> Result<DefaultValue, String> {
    match kind.integer_range() {
        Some((min, max)) if value < min || value > max => Err(format!(
            "Invalid default value for {kind} preference: {value} is out of range {min}..={max}"
        )),
        _ => Ok(DefaultValue::Int(value)),
    }
}

fn check_float(value: f64, kind: PersistedKind) -> Result<DefaultValue, String> {
    if kind == PersistedKind::Float && value.is_finite() && value.abs() > f64::from(f32::MAX) {
        return Err(format!(
            "Invalid default value for float preference: {value} is out of range"
        ));
    }
    Ok(DefaultValue::Float(value))
}
