//! Coercions between exposed preference types and persisted kinds
//!
//! | Exposed | Persisted | Coercion |
//! |---------|-----------|----------|
//! | `bool` | `Bool` | identity |
//! | `i8`, `u16`, `i16` | `Int` | widening on write, truncating cast on read |
//! | `i32` | `Int` | identity |
//! | `i64` | `Long` | identity |
//! | `f32` | `Float` | identity |
//! | `f64` | `Long` | raw IEEE-754 bit pattern |
//! | `Option<String>` | `String` | identity, `None` erases the key |
//! | `Option<BTreeSet<String>>` | `StringSet` | identity, `None` erases the key |

use crate::store::{Edit, KeyValueStore, StoredValue};
use std::collections::BTreeSet;

/// The storage-native shape a preference value is written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistedKind {
    Bool,
    Int,
    Long,
    Float,
    String,
    StringSet,
}

/// A type that can be read from and written to a [`KeyValueStore`]
pub trait Persisted: Sized {
    /// The persisted kind this type is stored as
    const KIND: PersistedKind;

    /// Decode a stored value, `None` if it has a different kind
    fn from_stored(value: StoredValue) -> Option<Self>;

    /// Encode into a stored value, `None` meaning "no value"
    fn into_stored(self) -> Option<StoredValue>;

    /// Read the value under `key`, falling back to `default` when absent
    fn read(store: &dyn KeyValueStore, key: &str, default: Self) -> Self {
        match store.get(key) {
            None => default,
            Some(stored) => {
                let kind = stored.kind_name();
                Self::from_stored(stored).unwrap_or_else(|| {
                    tracing::warn!(
                        key,
                        stored = kind,
                        expected = ?Self::KIND,
                        "stored value has unexpected kind, using default"
                    );
                    default
                })
            }
        }
    }

    /// Build the edit that persists `self` under `key`
    fn into_edit(self, key: &str) -> Edit {
        match self.into_stored() {
            Some(value) => Edit::put(key, value),
            None => Edit::remove(key),
        }
    }
}

impl Persisted for bool {
    const KIND: PersistedKind = PersistedKind::Bool;

    fn from_stored(value: StoredValue) -> Option<Self> {
        match value {
            StoredValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn into_stored(self) -> Option<StoredValue> {
        Some(StoredValue::Bool(self))
    }
}

macro_rules! narrow_int {
    ($($ty:ty),*) => {
        $(
            impl Persisted for $ty {
                const KIND: PersistedKind = PersistedKind::Int;

                fn from_stored(value: StoredValue) -> Option<Self> {
                    match value {
                        StoredValue::Int(v) => Some(v as $ty),
                        _ => None,
                    }
                }

                fn into_stored(self) -> Option<StoredValue> {
                    Some(StoredValue::Int(self as i32))
                }
            }
        )*
    };
}

// byte, char (UTF-16 code unit) and short
narrow_int!(i8, u16, i16);

impl Persisted for i32 {
    const KIND: PersistedKind = PersistedKind::Int;

    fn from_stored(value: StoredValue) -> Option<Self> {
        match value {
            StoredValue::Int(v) => Some(v),
            _ => None,
        }
    }

    fn into_stored(self) -> Option<StoredValue> {
        Some(StoredValue::Int(self))
    }
}

impl Persisted for i64 {
    const KIND: PersistedKind = PersistedKind::Long;

    fn from_stored(value: StoredValue) -> Option<Self> {
        match value {
            StoredValue::Long(v) => Some(v),
            _ => None,
        }
    }

    fn into_stored(self) -> Option<StoredValue> {
        Some(StoredValue::Long(self))
    }
}

impl Persisted for f32 {
    const KIND: PersistedKind = PersistedKind::Float;

    fn from_stored(value: StoredValue) -> Option<Self> {
        match value {
            StoredValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn into_stored(self) -> Option<StoredValue> {
        Some(StoredValue::Float(self))
    }
}

impl Persisted for f64 {
    const KIND: PersistedKind = PersistedKind::Long;

    fn from_stored(value: StoredValue) -> Option<Self> {
        match value {
            StoredValue::Long(bits) => Some(raw_bits_to_double(bits)),
            _ => None,
        }
    }

    fn into_stored(self) -> Option<StoredValue> {
        Some(StoredValue::Long(double_to_raw_bits(self)))
    }
}

impl Persisted for Option<String> {
    const KIND: PersistedKind = PersistedKind::String;

    fn from_stored(value: StoredValue) -> Option<Self> {
        match value {
            StoredValue::String(v) => Some(Some(v)),
            _ => None,
        }
    }

    fn into_stored(self) -> Option<StoredValue> {
        self.map(StoredValue::String)
    }
}

impl Persisted for Option<BTreeSet<String>> {
    const KIND: PersistedKind = PersistedKind::StringSet;

    fn from_stored(value: StoredValue) -> Option<Self> {
        match value {
            StoredValue::StringSet(v) => Some(Some(v)),
            _ => None,
        }
    }

    fn into_stored(self) -> Option<StoredValue> {
        self.map(StoredValue::StringSet)
    }
}

/// Raw 64-bit pattern a `double` preference is persisted as
pub fn double_to_raw_bits(value: f64) -> i64 {
    value.to_bits() as i64
}

/// Inverse of [`double_to_raw_bits`]
pub fn raw_bits_to_double(bits: i64) -> f64 {
    f64::from_bits(bits as u64)
}
