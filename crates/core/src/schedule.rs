// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification schedules.
//!
//! On the wire a schedule is either `{"at": "<ISO-8601>"}` or
//! `{"every": "day"}`; both forms take optional modifiers
//! (`repeating` / `count`) that are omitted when at their defaults.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat unit for [`Schedule::Every`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleEvery {
    Year,
    Month,
    TwoWeeks,
    Week,
    Day,
    Hour,
    Minute,
    /// Not supported by every platform scheduler.
    Second,
}

impl ScheduleEvery {
    /// Advance `from` by `count` units.
    ///
    /// Calendar units (month, year) clamp to the end of shorter months.
    /// Returns `None` on overflow.
    pub fn advance(self, from: DateTime<Utc>, count: u8) -> Option<DateTime<Utc>> {
        let n = i64::from(count.max(1));
        match self {
            ScheduleEvery::Year => from.checked_add_months(Months::new(12 * n as u32)),
            ScheduleEvery::Month => from.checked_add_months(Months::new(n as u32)),
            ScheduleEvery::TwoWeeks => from.checked_add_signed(Duration::weeks(2 * n)),
            ScheduleEvery::Week => from.checked_add_signed(Duration::weeks(n)),
            ScheduleEvery::Day => from.checked_add_signed(Duration::days(n)),
            ScheduleEvery::Hour => from.checked_add_signed(Duration::hours(n)),
            ScheduleEvery::Minute => from.checked_add_signed(Duration::minutes(n)),
            ScheduleEvery::Second => from.checked_add_signed(Duration::seconds(n)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleEvery::Year => "year",
            ScheduleEvery::Month => "month",
            ScheduleEvery::TwoWeeks => "twoWeeks",
            ScheduleEvery::Week => "week",
            ScheduleEvery::Day => "day",
            ScheduleEvery::Hour => "hour",
            ScheduleEvery::Minute => "minute",
            ScheduleEvery::Second => "second",
        }
    }
}

impl fmt::Display for ScheduleEvery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_count() -> u8 {
    1
}

fn is_default_count(count: &u8) -> bool {
    *count == 1
}

/// When a notification fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Schedule {
    /// Fire once at an absolute instant.
    At {
        #[serde(with = "crate::time_fmt::iso8601")]
        at: DateTime<Utc>,
        /// Keep firing with the period between scheduling and `at`.
        #[serde(default, skip_serializing_if = "is_false")]
        repeating: bool,
    },
    /// Fire every `count` units, starting one period from now.
    Every {
        every: ScheduleEvery,
        #[serde(default = "default_count", skip_serializing_if = "is_default_count")]
        count: u8,
    },
}

impl Schedule {
    pub fn at(at: DateTime<Utc>) -> Self {
        Schedule::At {
            at,
            repeating: false,
        }
    }

    pub fn every(every: ScheduleEvery) -> Self {
        Schedule::Every { every, count: 1 }
    }

    /// Whether the notification survives its first delivery.
    pub fn is_repeating(&self) -> bool {
        match self {
            Schedule::At { repeating, .. } => *repeating,
            Schedule::Every { .. } => true,
        }
    }

    /// First delivery instant relative to `now`.
    pub fn first_fire(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Schedule::At { at, .. } => Some(*at),
            Schedule::Every { every, count } => every.advance(now, *count),
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
