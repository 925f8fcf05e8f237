// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value substrate shared by the record and action-group stores.
//!
//! A [`Store`] is one named namespace of typed values. All writes go through
//! [`Store::commit`], which applies an [`Edit`] atomically: readers observe
//! either every change in the edit or none of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from the persistence medium.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A typed value held under a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl StoredValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoredValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            StoredValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoredValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for StoredValue {
    fn from(s: String) -> Self {
        StoredValue::String(s)
    }
}

impl From<&str> for StoredValue {
    fn from(s: &str) -> Self {
        StoredValue::String(s.to_string())
    }
}

impl From<i64> for StoredValue {
    fn from(n: i64) -> Self {
        StoredValue::Int(n)
    }
}

impl From<bool> for StoredValue {
    fn from(b: bool) -> Self {
        StoredValue::Bool(b)
    }
}

/// A batch of changes committed as one step.
///
/// `clear` (if set) runs first, then puts and removes in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edit {
    clear: bool,
    ops: Vec<(String, Option<StoredValue>)>,
}

impl Edit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn put(mut self, key: impl Into<String>, value: impl Into<StoredValue>) -> Self {
        self.ops.push((key.into(), Some(value.into())));
        self
    }

    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.ops.push((key.into(), None));
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.clear && self.ops.is_empty()
    }

    /// Apply this edit to an in-memory map.
    pub fn apply_to(self, entries: &mut BTreeMap<String, StoredValue>) {
        if self.clear {
            entries.clear();
        }
        for (key, value) in self.ops {
            match value {
                Some(value) => {
                    entries.insert(key, value);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
    }
}

/// One named key-value namespace.
///
/// Implementations serialize access per instance; clones share state.
pub trait Store: Clone + Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// Consistent snapshot of every entry.
    fn entries(&self) -> Result<BTreeMap<String, StoredValue>, StoreError>;

    fn commit(&self, edit: Edit) -> Result<(), StoreError>;

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries()?.into_keys().collect())
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.commit(Edit::new().put(key, value))
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.commit(Edit::new().remove(key))
    }
}

/// Opens named stores on one persistence medium.
///
/// Opening the same namespace twice yields handles that share one lock.
pub trait StoreBackend: Clone + Send + Sync + 'static {
    type Store: Store;

    fn open(&self, namespace: &str) -> Result<Self::Store, StoreError>;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
