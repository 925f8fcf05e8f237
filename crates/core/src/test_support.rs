// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::native::{NativeEvent, NativeNotification, NativeResponse};
use crate::normalize::encode;
use crate::{NotificationRecord, Schedule, ScheduleEvery};
use chrono::{DateTime, TimeZone, Utc};

/// Fixed instant used by fixtures.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_800_000_000, 0)
        .single()
        .unwrap_or_default()
}

/// A one-shot record scheduled at [`fixed_time`].
pub fn scheduled_record(id: i32, title: &str) -> NotificationRecord {
    NotificationRecord::new(id)
        .title(title)
        .schedule(Schedule::at(fixed_time()))
}

/// A record repeating daily.
pub fn daily_record(id: i32, title: &str) -> NotificationRecord {
    NotificationRecord::new(id)
        .title(title)
        .schedule(Schedule::every(ScheduleEvery::Day))
}

/// Native delivery callback for a record.
pub fn presented(record: &NotificationRecord) -> NativeEvent {
    NativeEvent::Presented(NativeNotification {
        request: encode(record),
        date: fixed_time(),
    })
}

/// Native response callback for a record.
pub fn responded(record: &NotificationRecord, action: &str, text: Option<&str>) -> NativeEvent {
    NativeEvent::Responded(NativeResponse {
        notification: NativeNotification {
            request: encode(record),
            date: fixed_time(),
        },
        action_identifier: action.to_string(),
        user_text: text.map(str::to_string),
    })
}
