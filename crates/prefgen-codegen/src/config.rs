//! Generator configuration

use serde::{Deserialize, Serialize};

/// Options read from the `[generator]` table of the declaration source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path under which generated code reaches the runtime crate.
    ///
    /// Override when the runtime is re-exported, e.g. `crate::prefs_runtime`.
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Whether to attach doc comments to generated items.
    #[serde(default = "default_emit_docs")]
    pub emit_docs: bool,
}

fn default_runtime_crate() -> String {
    "::prefgen_core".to_string()
}

fn default_emit_docs() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_crate: default_runtime_crate(),
            emit_docs: default_emit_docs(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse [`runtime_crate`](Self::runtime_crate) as a Rust path.
    pub fn runtime_path(&self) -> Result<syn::Path, syn::Error> {
        syn::parse_str(&self.runtime_crate)
    }
}
