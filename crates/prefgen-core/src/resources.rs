//! String-resource lookup used to resolve preference keys

use crate::{PrefError, PrefResult};
use std::collections::HashMap;

/// Lookup of string resources by identifier
///
/// Generated groups resolve each preference key once, at group construction,
/// by looking up `prefix + name + suffix`.
pub trait ResourceStrings: Send + Sync {
    /// Resolve the string resource named `name`
    fn get_string(&self, name: &str) -> PrefResult<String>;
}

/// Map-backed [`ResourceStrings`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryResources {
    strings: HashMap<String, String>,
}

impl InMemoryResources {
    /// Create an empty resource table
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a resource table
    pub fn builder() -> InMemoryResourcesBuilder {
        InMemoryResourcesBuilder::default()
    }

    /// Resources that map every identifier onto itself
    pub fn identity() -> IdentityResources {
        IdentityResources
    }
}

impl ResourceStrings for InMemoryResources {
    fn get_string(&self, name: &str) -> PrefResult<String> {
        self.strings
            .get(name)
            .cloned()
            .ok_or_else(|| PrefError::MissingResource(name.to_string()))
    }
}

/// Builder for [`InMemoryResources`]
#[derive(Debug, Default)]
pub struct InMemoryResourcesBuilder {
    strings: HashMap<String, String>,
}

impl InMemoryResourcesBuilder {
    /// Add a resource
    pub fn put(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> InMemoryResources {
        InMemoryResources {
            strings: self.strings,
        }
    }
}

/// [`ResourceStrings`] returning the identifier itself
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResources;

impl ResourceStrings for IdentityResources {
    fn get_string(&self, name: &str) -> PrefResult<String> {
        Ok(name.to_string())
    }
}
