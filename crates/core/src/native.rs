// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform-native notification objects.
//!
//! These mirror what an OS notification center hands back: string
//! identifiers, plain-text content, a category, a trigger, and a loosely
//! typed user-info dictionary that may contain real date values.

use crate::notification::Attachment;
use crate::schedule::ScheduleEvery;
use crate::time_fmt::format_iso8601;
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// User-info key holding the caller's `extra` map.
pub const EXTRA_KEY: &str = "__EXTRA__";

/// User-info key holding the structured schedule.
pub const SCHEDULE_KEY: &str = "__SCHEDULE__";

/// Action identifier the OS reports when the notification body is tapped.
pub const DEFAULT_ACTION_IDENTIFIER: &str = "com.apple.UNNotificationDefaultActionIdentifier";

/// Action identifier the OS reports when the notification is dismissed.
pub const DISMISS_ACTION_IDENTIFIER: &str = "com.apple.UNNotificationDismissActionIdentifier";

/// Loosely typed value found in native user-info dictionaries.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers beyond `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    List(Vec<NativeValue>),
    Map(BTreeMap<String, NativeValue>),
}

impl NativeValue {
    /// Type-erase into JSON, turning every nested date into ISO-8601 text.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn into_json(self) -> Value {
        match self {
            NativeValue::Null => Value::Null,
            NativeValue::Bool(b) => Value::Bool(b),
            NativeValue::Int(n) => Value::Number(n.into()),
            NativeValue::UInt(n) => Value::Number(n.into()),
            NativeValue::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            NativeValue::String(s) => Value::String(s),
            NativeValue::Date(at) => Value::String(format_iso8601(&at)),
            NativeValue::List(items) => {
                Value::Array(items.into_iter().map(NativeValue::into_json).collect())
            }
            NativeValue::Map(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, v.into_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => NativeValue::Null,
            Value::Bool(b) => NativeValue::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => NativeValue::Int(i),
                (None, Some(u)) => NativeValue::UInt(u),
                (None, None) => NativeValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => NativeValue::String(s),
            Value::Array(items) => {
                NativeValue::List(items.into_iter().map(NativeValue::from_json).collect())
            }
            Value::Object(entries) => NativeValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, NativeValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, NativeValue>> {
        match self {
            NativeValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<Value> for NativeValue {
    fn from(value: Value) -> Self {
        NativeValue::from_json(value)
    }
}

impl From<DateTime<Utc>> for NativeValue {
    fn from(at: DateTime<Utc>) -> Self {
        NativeValue::Date(at)
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Bool(b)
    }
}

impl From<i32> for NativeValue {
    fn from(n: i32) -> Self {
        NativeValue::Int(n.into())
    }
}

impl From<i64> for NativeValue {
    fn from(n: i64) -> Self {
        NativeValue::Int(n)
    }
}

impl From<u64> for NativeValue {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(NativeValue::UInt(n), NativeValue::Int)
    }
}

impl From<f64> for NativeValue {
    fn from(f: f64) -> Self {
        NativeValue::Float(f)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::String(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::String(s)
    }
}

/// What the platform scheduler is asked to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeTrigger {
    Date { at: DateTime<Utc>, repeats: bool },
    Interval { unit: ScheduleEvery, count: u8 },
}

/// Visible content of a native request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeContent {
    pub title: String,
    pub body: String,
    /// Category (iOS) or channel-bound action type (Android).
    pub category_identifier: String,
    pub sound: Option<String>,
    pub attachments: Vec<Attachment>,
    pub user_info: BTreeMap<String, NativeValue>,
}

/// A request as submitted to, or listed by, the platform scheduler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeRequest {
    pub identifier: String,
    pub content: NativeContent,
    /// `None` means deliver immediately.
    pub trigger: Option<NativeTrigger>,
}

/// A request the OS has delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeNotification {
    pub request: NativeRequest,
    pub date: DateTime<Utc>,
}

/// The user's reaction to a delivered notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeResponse {
    pub notification: NativeNotification,
    pub action_identifier: String,
    /// Present only for text-input actions.
    pub user_text: Option<String>,
}

/// Callbacks the OS notification center fires into the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    Presented(NativeNotification),
    Responded(NativeResponse),
}

impl NativeEvent {
    pub fn identifier(&self) -> &str {
        match self {
            NativeEvent::Presented(n) => &n.request.identifier,
            NativeEvent::Responded(r) => &r.notification.request.identifier,
        }
    }
}
