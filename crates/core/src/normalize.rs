// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical record <-> native request translation.
//!
//! Everything here is pure: the same native object and the same stored
//! record always decode to the same canonical value.
//!
//! Control metadata travels in the native user-info under two reserved keys
//! ([`EXTRA_KEY`], [`SCHEDULE_KEY`]). Caller data lives only inside the
//! `__EXTRA__` envelope, so it can never shadow the schedule.

use crate::event::{ActionPerformed, DISMISS_ACTION, TAP_ACTION};
use crate::native::{
    NativeContent, NativeRequest, NativeResponse, NativeTrigger, NativeValue,
    DEFAULT_ACTION_IDENTIFIER, DISMISS_ACTION_IDENTIFIER, EXTRA_KEY, SCHEDULE_KEY,
};
use crate::notification::{NotificationId, NotificationRecord};
use crate::schedule::Schedule;
use crate::time_fmt::format_iso8601;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Id reported for native identifiers that are not decimal integers.
pub const INVALID_ID: NotificationId = -1;

/// Build the platform request for a canonical record.
pub fn encode(record: &NotificationRecord) -> NativeRequest {
    let mut user_info = BTreeMap::new();
    user_info.insert(
        EXTRA_KEY.to_string(),
        NativeValue::from_json(Value::Object(record.extra.clone())),
    );
    if let Some(schedule) = &record.schedule {
        user_info.insert(SCHEDULE_KEY.to_string(), schedule_info(schedule));
    }

    NativeRequest {
        identifier: record.key(),
        content: NativeContent {
            title: record.title.clone().unwrap_or_default(),
            body: record.body.clone().unwrap_or_default(),
            category_identifier: record.action_type_id.clone().unwrap_or_default(),
            sound: record.sound.clone(),
            attachments: record.attachments.clone(),
            user_info,
        },
        trigger: record.schedule.as_ref().map(trigger_for),
    }
}

fn schedule_info(schedule: &Schedule) -> NativeValue {
    let mut info = BTreeMap::new();
    match schedule {
        Schedule::At { at, repeating } => {
            info.insert("at".to_string(), NativeValue::String(format_iso8601(at)));
            if *repeating {
                info.insert("repeating".to_string(), NativeValue::Bool(true));
            }
        }
        Schedule::Every { every, count } => {
            info.insert("every".to_string(), NativeValue::from(every.as_str()));
            if *count != 1 {
                info.insert("count".to_string(), NativeValue::Int(i64::from(*count)));
            }
        }
    }
    NativeValue::Map(info)
}

fn trigger_for(schedule: &Schedule) -> NativeTrigger {
    match schedule {
        Schedule::At { at, repeating } => NativeTrigger::Date {
            at: *at,
            repeats: *repeating,
        },
        Schedule::Every { every, count } => NativeTrigger::Interval {
            unit: *every,
            count: *count,
        },
    }
}

/// Parse a native identifier, mapping anything non-numeric to [`INVALID_ID`].
pub fn parse_identifier(identifier: &str) -> NotificationId {
    match identifier.parse() {
        Ok(id) => id,
        Err(_) => {
            warn!(identifier, "native identifier is not numeric, using {INVALID_ID}");
            INVALID_ID
        }
    }
}

/// Map a native action identifier to its canonical action id.
pub fn canonical_action_id(native: &str) -> &str {
    match native {
        DEFAULT_ACTION_IDENTIFIER => TAP_ACTION,
        DISMISS_ACTION_IDENTIFIER => DISMISS_ACTION,
        other => other,
    }
}

/// Rebuild the canonical record for a native request.
///
/// `stored` is the raw persisted value for the same id, if any. Fields the
/// native object does not carry (sound, attachments, presentation hints)
/// come from it; live fields win whenever both are present. If the stored
/// value cannot be merged into a valid record, only live fields are used.
pub fn decode_request(request: &NativeRequest, stored: Option<&Value>) -> NotificationRecord {
    let id = parse_identifier(&request.identifier);
    let live = live_fields(id, request);

    let mut merged = stored
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    for (key, value) in &live {
        merged.insert(key.clone(), value.clone());
    }

    match NotificationRecord::from_value(Value::Object(merged)) {
        Ok(record) => record,
        Err(e) => {
            if stored.is_some() {
                warn!(id, error = %e, "stored record does not merge, using live fields only");
            }
            NotificationRecord::from_value(Value::Object(live))
                .unwrap_or_else(|_| NotificationRecord::new(id))
        }
    }
}

/// Rebuild the canonical `actionPerformed` payload for a native response.
pub fn decode_response(response: &NativeResponse, stored: Option<&Value>) -> ActionPerformed {
    ActionPerformed {
        action_id: canonical_action_id(&response.action_identifier).to_string(),
        input_value: response.user_text.clone(),
        notification: decode_request(&response.notification.request, stored),
    }
}

/// Canonical fields carried by the native object itself.
///
/// Empty native strings and an empty extra map count as absent.
fn live_fields(id: NotificationId, request: &NativeRequest) -> Map<String, Value> {
    let content = &request.content;
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::from(id));
    if !content.title.is_empty() {
        fields.insert("title".to_string(), Value::from(content.title.clone()));
    }
    if !content.body.is_empty() {
        fields.insert("body".to_string(), Value::from(content.body.clone()));
    }
    if !content.category_identifier.is_empty() {
        fields.insert(
            "actionTypeId".to_string(),
            Value::from(content.category_identifier.clone()),
        );
    }

    let extra = unwrap_extra(&content.user_info);
    if !extra.is_empty() {
        fields.insert("extra".to_string(), Value::Object(extra));
    }

    if let Some(schedule) = unwrap_schedule(&request.identifier, &content.user_info) {
        fields.insert("schedule".to_string(), schedule);
    }
    fields
}

/// The caller's extra map, with dates re-stringified.
///
/// Requests created elsewhere have no envelope; their whole user-info,
/// minus reserved keys, is the extra map.
fn unwrap_extra(user_info: &BTreeMap<String, NativeValue>) -> Map<String, Value> {
    match user_info.get(EXTRA_KEY) {
        Some(NativeValue::Map(extra)) => extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into_json()))
            .collect(),
        Some(other) => {
            warn!(value = ?other, "{EXTRA_KEY} is not a map, ignoring");
            Map::new()
        }
        None => user_info
            .iter()
            .filter(|(k, _)| k.as_str() != SCHEDULE_KEY)
            .map(|(k, v)| (k.clone(), v.clone().into_json()))
            .collect(),
    }
}

fn unwrap_schedule(identifier: &str, user_info: &BTreeMap<String, NativeValue>) -> Option<Value> {
    let info = user_info.get(SCHEDULE_KEY)?.clone().into_json();
    match serde_json::from_value::<Schedule>(info.clone()) {
        Ok(_) => Some(info),
        Err(e) => {
            warn!(identifier, error = %e, "{SCHEDULE_KEY} is malformed, ignoring");
            None
        }
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
