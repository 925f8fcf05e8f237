// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted action groups.
//!
//! Each category gets its own namespace (`ACTION_TYPE_STORE<id>`) laid out
//! by index:
//!
//! ```text
//! count   -> 2
//! id0     -> "reply"    title0 -> "Reply"    input0 -> true
//! id1     -> "archive"  title1 -> "Archive"  input1 -> false
//! ```
//!
//! A group is always rewritten in a single commit, so readers see either
//! the old group or the new one.

use crate::store::{Edit, Store, StoreBackend, StoreError};
use nb_core::{ActionType, NotificationAction};
use std::collections::BTreeMap;
use tracing::warn;

/// Namespace prefix for action groups; the category id is appended.
pub const ACTION_TYPE_STORE: &str = "ACTION_TYPE_STORE";

/// Upper bound on a group's stored `count`.
///
/// Guards against allocating for a corrupt count.
const MAX_GROUP_SIZE: usize = 1024;

/// Action groups keyed by category id.
#[derive(Clone)]
pub struct ActionGroupStore<B> {
    backend: B,
}

impl<B: StoreBackend> ActionGroupStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn open(&self, id: &str) -> Result<B::Store, StoreError> {
        self.backend.open(&format!("{ACTION_TYPE_STORE}{id}"))
    }

    /// Replace each listed group wholesale.
    pub fn write_action_groups(
        &self,
        groups: &BTreeMap<String, Vec<NotificationAction>>,
    ) -> Result<(), StoreError> {
        for (id, actions) in groups {
            let mut edit = Edit::new().clear().put("count", actions.len() as i64);
            for (i, action) in actions.iter().enumerate() {
                edit = edit
                    .put(format!("id{i}"), action.id.as_str())
                    .put(format!("title{i}"), action.title.as_str())
                    .put(format!("input{i}"), action.input);
            }
            self.open(id)?.commit(edit)?;
        }
        Ok(())
    }

    /// Replace the groups for every registered action type.
    pub fn register(&self, types: &[ActionType]) -> Result<(), StoreError> {
        let groups = types
            .iter()
            .map(|t| (t.id.clone(), t.actions.clone()))
            .collect();
        self.write_action_groups(&groups)
    }

    /// The group for `id`, exactly `count` entries long.
    ///
    /// An entry without a textual `id{i}` is `None`; a missing or mistyped
    /// title reads as `""` and a missing or mistyped input flag as `false`.
    pub fn action_group(&self, id: &str) -> Result<Vec<Option<NotificationAction>>, StoreError> {
        let entries = self.open(id)?.entries()?;
        let count = match entries.get("count").and_then(|v| v.as_int()) {
            Some(n) => usize::try_from(n).unwrap_or(0),
            None => 0,
        };
        let count = if count > MAX_GROUP_SIZE {
            warn!(id, count, "action group count out of range, truncating");
            MAX_GROUP_SIZE
        } else {
            count
        };

        Ok((0..count)
            .map(|i| {
                let Some(action_id) = entries.get(&format!("id{i}")).and_then(|v| v.as_str())
                else {
                    warn!(id, index = i, "action entry is corrupt, leaving a gap");
                    return None;
                };
                Some(NotificationAction {
                    id: action_id.to_string(),
                    title: entries
                        .get(&format!("title{i}"))
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    input: entries
                        .get(&format!("input{i}"))
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false),
                })
            })
            .collect())
    }

    /// Remove the group for `id`.
    pub fn clear(&self, id: &str) -> Result<(), StoreError> {
        self.open(id)?.commit(Edit::new().clear())
    }
}

#[cfg(test)]
#[path = "action_store_tests.rs"]
mod tests;
