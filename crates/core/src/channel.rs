// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification channels and permission states.
//!
//! Pure data passed through to the platform; the bridge attaches no
//! behavior to them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Interruption level of a channel. Serialized as its integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Importance {
    None = 0,
    Min = 1,
    Low = 2,
    #[default]
    Default = 3,
    High = 4,
}

impl Importance {
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Importance::None),
            1 => Some(Importance::Min),
            2 => Some(Importance::Low),
            3 => Some(Importance::Default),
            4 => Some(Importance::High),
            _ => None,
        }
    }
}

impl Serialize for Importance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*self as i64)
    }
}

impl<'de> Deserialize<'de> for Importance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = i64::deserialize(deserializer)?;
        Importance::from_level(level)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown importance level {level}")))
    }
}

/// Lock-screen visibility of a channel. Serialized as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Secret = -1,
    Private = 0,
    Public = 1,
}

impl Serialize for Visibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*self as i64)
    }
}

impl<'de> Deserialize<'de> for Visibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match i64::deserialize(deserializer)? {
            -1 => Ok(Visibility::Secret),
            0 => Ok(Visibility::Private),
            1 => Ok(Visibility::Public),
            other => Err(serde::de::Error::custom(format!(
                "unknown visibility {other}"
            ))),
        }
    }
}

/// A notification channel (Android) or equivalent grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default)]
    pub lights: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_color: Option<String>,
    #[serde(default)]
    pub vibration: bool,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            sound: None,
            lights: false,
            light_color: None,
            vibration: false,
            importance: Importance::default(),
            visibility: None,
        }
    }
}

/// Outcome of a permission query or prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Default,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
