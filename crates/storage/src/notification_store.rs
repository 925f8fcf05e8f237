// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted scheduled notifications.
//!
//! Each scheduled record is stored as its canonical JSON text under its
//! decimal id. Reads never fail because of a bad entry: unparsable or
//! invalid entries are skipped in listings and read as "not found" in
//! point lookups. Only faults of the medium itself are returned as errors.

use crate::store::{Edit, Store, StoreBackend, StoreError, StoredValue};
use nb_core::NotificationRecord;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Namespace holding notification records.
pub const NOTIFICATION_STORE: &str = "NOTIFICATION_STORE";

/// Entries an [`append`](NotificationStore::append) is about to overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint(Vec<(String, Option<StoredValue>)>);

/// Scheduled notification records keyed by id.
#[derive(Clone)]
pub struct NotificationStore<S> {
    store: S,
}

impl<S: Store> NotificationStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Open the [`NOTIFICATION_STORE`] namespace on `backend`.
    pub fn open<B>(backend: &B) -> Result<Self, StoreError>
    where
        B: StoreBackend<Store = S>,
    {
        Ok(Self::new(backend.open(NOTIFICATION_STORE)?))
    }

    /// Persist every scheduled record in one commit; others are skipped.
    ///
    /// Records replace any previous record with the same id.
    pub fn append(&self, records: &[NotificationRecord]) -> Result<(), StoreError> {
        let mut edit = Edit::new();
        for record in records {
            if !record.is_scheduled() {
                debug!(id = record.id, "not scheduled, skipping persistence");
                continue;
            }
            edit = edit.put(record.key(), serde_json::to_string(record)?);
        }
        self.store.commit(edit)
    }

    /// Capture what appending `records` would overwrite.
    pub fn checkpoint(&self, records: &[NotificationRecord]) -> Result<Checkpoint, StoreError> {
        let mut previous = Vec::new();
        for record in records.iter().filter(|r| r.is_scheduled()) {
            let key = record.key();
            let value = self.store.get(&key)?;
            previous.push((key, value));
        }
        Ok(Checkpoint(previous))
    }

    /// Put back the entries captured by [`checkpoint`](Self::checkpoint) in one commit.
    pub fn revert(&self, checkpoint: Checkpoint) -> Result<(), StoreError> {
        let edit = checkpoint
            .0
            .into_iter()
            .fold(Edit::new(), |edit, (key, value)| match value {
                Some(value) => edit.put(key, value),
                None => edit.remove(key),
            });
        self.store.commit(edit)
    }

    /// Every persisted key, valid or not.
    pub fn ids(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.store.keys()?.into_iter().collect())
    }

    /// Every entry that decodes into a valid record.
    pub fn records(&self) -> Result<Vec<NotificationRecord>, StoreError> {
        let entries = self.store.entries()?;
        Ok(entries
            .iter()
            .filter_map(|(key, value)| {
                let raw = decode(key, value)?;
                validate(key, raw)
            })
            .collect())
    }

    /// The decoded but unvalidated value stored under `id`.
    pub fn get_raw(&self, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .store
            .get(id)?
            .and_then(|value| decode(id, &value)))
    }

    /// The valid record stored under `id`.
    pub fn get(&self, id: &str) -> Result<Option<NotificationRecord>, StoreError> {
        Ok(self.get_raw(id)?.and_then(|raw| validate(id, raw)))
    }

    /// Remove the record stored under `id`, if any.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id)
    }

    /// Remove every record.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.commit(Edit::new().clear())
    }
}

fn decode(key: &str, value: &StoredValue) -> Option<Value> {
    let Some(text) = value.as_str() else {
        warn!(key, "stored notification is not text, skipping");
        return None;
    };
    match serde_json::from_str(text) {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!(key, error = %e, "stored notification is not valid JSON, skipping");
            None
        }
    }
}

fn validate(key: &str, raw: Value) -> Option<NotificationRecord> {
    match NotificationRecord::from_value(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(key, error = %e, "stored notification is malformed, skipping");
            None
        }
    }
}

#[cfg(test)]
#[path = "notification_store_tests.rs"]
mod tests;
