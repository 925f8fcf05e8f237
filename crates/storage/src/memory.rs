// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process store backend.
//!
//! Used where the platform keeps notification state in a dictionary for the
//! lifetime of the process, and throughout tests.

use crate::store::{Edit, Store, StoreBackend, StoreError, StoredValue};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Default)]
struct MemoryState {
    entries: BTreeMap<String, StoredValue>,
    unavailable: bool,
}

/// A single in-memory namespace. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    name: String,
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::default(),
        }
    }

    /// Make every subsequent call fail as if the medium were gone.
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unavailable = unavailable;
    }

    fn check(&self, state: &MemoryState) -> Result<(), StoreError> {
        if state.unavailable {
            return Err(StoreError::Unavailable(self.name.clone()));
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let state = self.inner.lock();
        self.check(&state)?;
        Ok(state.entries.get(key).cloned())
    }

    fn entries(&self) -> Result<BTreeMap<String, StoredValue>, StoreError> {
        let state = self.inner.lock();
        self.check(&state)?;
        Ok(state.entries.clone())
    }

    fn commit(&self, edit: Edit) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        self.check(&state)?;
        edit.apply_to(&mut state.entries);
        Ok(())
    }
}

/// Hands out one shared [`MemoryStore`] per namespace.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    stores: Arc<Mutex<HashMap<String, MemoryStore>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for MemoryBackend {
    type Store = MemoryStore;

    fn open(&self, namespace: &str) -> Result<MemoryStore, StoreError> {
        Ok(self
            .stores
            .lock()
            .entry(namespace.to_string())
            .or_insert_with(|| MemoryStore::new(namespace))
            .clone())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
