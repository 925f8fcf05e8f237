// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical events delivered to application listeners.

use crate::notification::NotificationRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical action id for a tap on the notification body.
pub const TAP_ACTION: &str = "tap";

/// Canonical action id for an explicit dismissal.
pub const DISMISS_ACTION: &str = "dismiss";

/// Payload of an `actionPerformed` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPerformed {
    pub action_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    pub notification: NotificationRecord,
}

/// Event emitted by the bridge for a native callback.
///
/// Serializes as `{"event": "<name>", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum CanonicalEvent {
    #[serde(rename = "received")]
    Received(NotificationRecord),
    #[serde(rename = "actionPerformed")]
    ActionPerformed(ActionPerformed),
}

impl CanonicalEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CanonicalEvent::Received(_) => EventKind::Received,
            CanonicalEvent::ActionPerformed(_) => EventKind::ActionPerformed,
        }
    }

    /// The notification the event is about.
    pub fn notification(&self) -> &NotificationRecord {
        match self {
            CanonicalEvent::Received(record) => record,
            CanonicalEvent::ActionPerformed(action) => &action.notification,
        }
    }
}

/// Listener subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "received")]
    Received,
    #[serde(rename = "actionPerformed")]
    ActionPerformed,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Received => "received",
            EventKind::ActionPerformed => "actionPerformed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
