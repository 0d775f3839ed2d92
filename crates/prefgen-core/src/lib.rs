//! prefgen-core - Runtime contract for generated preference accessors
//!
//! Code produced by `prefgen-codegen` depends on this crate only:
//! - [`KeyValueStore`] and [`ResourceStrings`], the collaborators bound by `initialize`
//! - [`Persisted`] for the storage coercions of each exposed type
//! - [`PreferenceSerializer`], [`EnumSerializer`] and [`FromTypeToken`] for custom serializers
//! - [`PreferencesCell`] and [`GroupCell`] for the initialization guard
//! - [`PrefError`] and [`SerializationError`] for error handling

mod codec;
mod error;
mod lifecycle;
mod resources;
mod serializer;
mod store;

pub use codec::{Persisted, PersistedKind, double_to_raw_bits, raw_bits_to_double};
pub use error::{PrefError, PrefResult, SerializationError};
pub use lifecycle::{GroupCell, PreferencesCell};
pub use resources::{IdentityResources, InMemoryResources, InMemoryResourcesBuilder, ResourceStrings};
pub use serializer::{EnumSerializer, FromTypeToken, PreferenceEnum, PreferenceSerializer, TypeToken};
pub use store::{Edit, InMemoryStore, KeyValueStore, StoredValue};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EnumSerializer, FromTypeToken, InMemoryResources, InMemoryStore, KeyValueStore,
        Persisted, PrefError, PrefResult, PreferenceEnum, PreferenceSerializer, ResourceStrings,
        SerializationError, StoredValue, TypeToken,
    };
}
