//! Initialization guard and lazy group singletons for generated classes
//!
//! A generated preference class moves through a two-state lifecycle:
//!
//! ```text
//! Uninitialized --initialize()--> Ready
//! ```
//!
//! `Ready` is terminal. The slot is assigned atomically, so when several threads
//! race on `initialize` exactly one wins and the rest observe
//! [`PrefError::AlreadyInitialized`].

use crate::{PrefError, PrefResult};
use once_cell::sync::OnceCell;

/// Process-wide single-assignment slot holding the bound collaborators
#[derive(Debug)]
pub struct PreferencesCell<T> {
    slot: OnceCell<T>,
}

impl<T> PreferencesCell<T> {
    /// Create an empty cell, usable in a `static`
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Assign the cell, failing if it was already assigned
    pub fn initialize(&self, value: T) -> PrefResult<()> {
        self.slot
            .set(value)
            .map_err(|_| PrefError::AlreadyInitialized)?;
        tracing::debug!("preferences initialized");
        Ok(())
    }

    /// Get the bound state, failing before initialization
    pub fn get(&self) -> PrefResult<&T> {
        self.slot.get().ok_or(PrefError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T> Default for PreferencesCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazily constructed, fallible singleton for one group accessor
///
/// Construction resolves the group's keys through the resource collaborator,
/// which can fail; a failed construction leaves the cell empty so the next call
/// retries.
#[derive(Debug)]
pub struct GroupCell<T> {
    slot: OnceCell<T>,
}

impl<T> GroupCell<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Get the singleton, constructing it on first use
    pub fn get_or_try_init<F>(&self, init: F) -> PrefResult<&T>
    where
        F: FnOnce() -> PrefResult<T>,
    {
        self.slot.get_or_try_init(init)
    }

    /// Get the singleton if it was already constructed
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }
}

impl<T> Default for GroupCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
