//! Key-value store abstraction used by generated accessors
//!
//! The store itself is an external collaborator. Generated code only needs
//! typed reads of a handful of value kinds and atomic batched writes.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};

/// A value in the storage-native shapes a store supports
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    String(String),
    StringSet(BTreeSet<String>),
}

impl StoredValue {
    /// Short name of the stored kind, used in log output
    pub fn kind_name(&self) -> &'static str {
        match self {
            StoredValue::Bool(_) => "bool",
            StoredValue::Int(_) => "int",
            StoredValue::Long(_) => "long",
            StoredValue::Float(_) => "float",
            StoredValue::String(_) => "string",
            StoredValue::StringSet(_) => "string-set",
        }
    }
}

/// A single pending modification
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Write `value` under `key`
    Put(String, StoredValue),
    /// Erase `key`
    Remove(String),
}

impl Edit {
    /// Create a put edit
    pub fn put(key: impl Into<String>, value: StoredValue) -> Self {
        Edit::Put(key.into(), value)
    }

    /// Create a remove edit
    pub fn remove(key: impl Into<String>) -> Self {
        Edit::Remove(key.into())
    }
}

/// Persistent map of string keys to [`StoredValue`]s
///
/// Implementations decide their own concurrency guarantees; `commit` must apply
/// all edits of one call atomically.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<StoredValue>;

    /// Whether a value is stored under `key`
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Apply all edits atomically, returning whether they were persisted
    fn commit(&self, edits: Vec<Edit>) -> bool;

    /// Apply all edits atomically without reporting the outcome
    fn apply(&self, edits: Vec<Edit>) {
        let _ = self.commit(edits);
    }
}

/// In-memory [`KeyValueStore`], useful for tests and tools
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<BTreeMap<String, StoredValue>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Write a raw value, bypassing any generated accessor
    pub fn insert(&self, key: impl Into<String>, value: StoredValue) {
        self.values.write().insert(key.into(), value);
    }

    /// Snapshot of all entries
    pub fn snapshot(&self) -> BTreeMap<String, StoredValue> {
        self.values.read().clone()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.values.read().get(key).cloned()
    }

    fn commit(&self, edits: Vec<Edit>) -> bool {
        let mut values = self.values.write();
        for edit in edits {
            match edit {
                Edit::Put(key, value) => {
                    values.insert(key, value);
                }
                Edit::Remove(key) => {
                    values.remove(&key);
                }
            }
        }
        true
    }
}
