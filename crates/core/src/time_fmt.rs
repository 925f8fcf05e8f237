// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ISO-8601 timestamp formatting shared by storage and the wire format.
//!
//! Every instant that leaves the process (persisted records, native
//! user-info, canonical events) goes through [`format_iso8601`], so a
//! timestamp has exactly one textual form.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format an instant as RFC 3339 text in UTC with a `Z` suffix.
///
/// Sub-second precision is kept only when present (`"2026-01-02T03:04:05Z"`
/// vs `"2026-01-02T03:04:05.250Z"`), so formatting then parsing is lossless.
pub fn format_iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse RFC 3339 text with any offset into a UTC instant.
pub fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Serde adapter pinning `DateTime<Utc>` fields to [`format_iso8601`].
///
/// Use as `#[serde(with = "crate::time_fmt::iso8601")]`.
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso8601(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_iso8601(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {text}")))
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
