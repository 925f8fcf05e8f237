// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registry for canonical events.
//!
//! Listeners subscribe per [`EventKind`]. Dispatch snapshots the matching
//! callbacks under the lock and invokes them after releasing it, so a
//! callback may itself subscribe or unsubscribe.

use nb_core::{CanonicalEvent, EventKind};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Handle returned by [`Listeners::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

type Callback = Arc<dyn Fn(&CanonicalEvent) + Send + Sync>;

struct Entry {
    id: ListenerId,
    kind: EventKind,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Subscribe list shared by clones.
#[derive(Clone, Default)]
pub struct Listeners {
    inner: Arc<Mutex<Registry>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&CanonicalEvent) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock();
        registry.next_id += 1;
        let id = ListenerId(registry.next_id);
        registry.entries.push(Entry {
            id,
            kind,
            callback: Arc::new(callback),
        });
        tracing::debug!(%id, %kind, "listener added");
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unlisten(&self, id: ListenerId) -> bool {
        let mut registry = self.inner.lock();
        let before = registry.entries.len();
        registry.entries.retain(|entry| entry.id != id);
        registry.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every listener for the event's kind once. Returns how many ran.
    pub fn dispatch(&self, event: &CanonicalEvent) -> usize {
        let kind = event.kind();
        let callbacks: Vec<Callback> = {
            let registry = self.inner.lock();
            registry
                .entries
                .iter()
                .filter(|entry| entry.kind == kind)
                .map(|entry| Arc::clone(&entry.callback))
                .collect()
        };
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }
}

#[cfg(test)]
#[path = "listeners_tests.rs"]
mod tests;
