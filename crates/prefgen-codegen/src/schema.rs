//! Declaration source format
//!
//! A declaration source is a TOML document:
//!
//! ```toml
//! [preferences]
//! name = "com.example.AppPreferences"
//!
//! [[preferences.groups]]
//! name = "general"
//! prefix = "app_"
//! suffix = "_key"
//!
//! [[preferences.groups.preferences]]
//! name = "count"
//! type = "int"
//! default = 5
//! description = "How often"
//!
//! [[types]]
//! name = "crate::Theme"
//! kind = "enum"
//! ```

use crate::GeneratorConfig;
use crate::SchemaError;
use crate::universe::TypeKind;
use serde::{Deserialize, Serialize};

/// A complete declaration source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub generator: GeneratorConfig,

    pub preferences: RootSection,

    /// Types referenced by preferences and serializers, beyond the built-ins.
    #[serde(default)]
    pub types: Vec<TypeSection>,
}

/// The `[preferences]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootSection {
    /// Dotted qualified name of the generated class.
    pub name: String,

    /// Resource holder type, must be declared in `[[types]]` when given.
    #[serde(default)]
    pub resources: Option<String>,

    /// Whether the generated items are `pub` rather than `pub(crate)`.
    #[serde(default)]
    pub finalized: bool,

    #[serde(default = "default_true")]
    pub fluent: bool,

    #[serde(default = "default_true")]
    pub editor: bool,

    #[serde(default)]
    pub groups: Vec<GroupSection>,
}

/// A `[[preferences.groups]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSection {
    pub name: String,

    #[serde(default)]
    pub prefix: String,

    #[serde(default)]
    pub suffix: String,

    #[serde(default)]
    pub preferences: Vec<PreferenceSection>,
}

/// A `[[preferences.groups.preferences]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferenceSection {
    pub name: String,

    /// Declared runtime type.
    #[serde(rename = "type")]
    pub ty: String,

    /// Default value in persisted form.
    #[serde(default)]
    pub default: Option<toml::Value>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub serializer: Option<String>,
}

/// A `[[types]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSection {
    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,

    /// Type parameters such as `T` or `T: Number`.
    #[serde(default)]
    pub params: Vec<String>,

    /// Direct supertypes, may reference the parameters.
    #[serde(default)]
    pub supertypes: Vec<String>,

    /// Constructor parameter lists; omitted means one zero-argument constructor.
    #[serde(default)]
    pub constructors: Option<Vec<Vec<String>>>,
}

fn default_true() -> bool {
    true
}

impl SchemaDocument {
    /// Parse a declaration source.
    pub fn from_str(content: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(content)?)
    }
}
