// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing notification actions and the categories that group them.

use serde::{Deserialize, Serialize};

/// A button (or text field, when `input` is set) shown on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub input: bool,
}

impl NotificationAction {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            input: false,
        }
    }

    /// An action that captures free text from the user.
    pub fn text_input(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            input: true,
            ..Self::new(id, title)
        }
    }
}

/// A category of notifications and its ordered actions.
///
/// Records reference a category through `actionTypeId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionType {
    pub id: String,
    #[serde(default)]
    pub actions: Vec<NotificationAction>,
}

impl ActionType {
    pub fn new(id: impl Into<String>, actions: Vec<NotificationAction>) -> Self {
        Self {
            id: id.into(),
            actions,
        }
    }
}
