// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bridge: native callbacks to canonical events.
//!
//! A native callback is handled with one record-store lookup, one pure
//! translation and one dispatch to listeners. Nothing here awaits.

use crate::listeners::Listeners;
use nb_core::{decode_request, decode_response, CanonicalEvent, NativeEvent};
use nb_storage::{NotificationStore, Store};
use serde_json::Value;

/// How the OS should present a notification that is about to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Badge, sound and banner.
    Show,
    /// The stored record asked for `silent`.
    Suppress,
}

/// Translate a native callback given the stored raw record for its id.
pub fn translate(event: &NativeEvent, stored: Option<&Value>) -> (CanonicalEvent, Presentation) {
    match event {
        NativeEvent::Presented(delivered) => {
            let record = decode_request(&delivered.request, stored);
            (CanonicalEvent::Received(record), presentation_for(stored))
        }
        NativeEvent::Responded(response) => (
            CanonicalEvent::ActionPerformed(decode_response(response, stored)),
            Presentation::Show,
        ),
    }
}

/// Suppression reads the raw `silent` flag so it holds even when the rest
/// of the stored record no longer decodes.
fn presentation_for(stored: Option<&Value>) -> Presentation {
    match stored.and_then(|raw| raw.get("silent")).and_then(Value::as_bool) {
        Some(true) => Presentation::Suppress,
        _ => Presentation::Show,
    }
}

#[derive(Clone)]
pub struct EventBridge<S> {
    records: NotificationStore<S>,
    listeners: Listeners,
}

impl<S: Store> EventBridge<S> {
    pub fn new(records: NotificationStore<S>, listeners: Listeners) -> Self {
        Self { records, listeners }
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Translate a native callback and deliver it to listeners.
    ///
    /// A store fault during lookup degrades to live fields only.
    pub fn handle(&self, event: &NativeEvent) -> (CanonicalEvent, Presentation) {
        let identifier = event.identifier();
        let stored = match self.records.get_raw(identifier) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(identifier, error = %e, "record lookup failed, treating as not found");
                None
            }
        };

        let (canonical, presentation) = translate(event, stored.as_ref());
        let delivered = self.listeners.dispatch(&canonical);
        tracing::debug!(
            identifier,
            event = %canonical.kind(),
            listeners = delivered,
            ?presentation,
            "native event bridged"
        );
        (canonical, presentation)
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
