// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nb-core: canonical notification model and native translation

pub mod action;
pub mod channel;
pub mod event;
pub mod native;
pub mod normalize;
pub mod notification;
pub mod schedule;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use action::{ActionType, NotificationAction};
pub use channel::{Channel, Importance, PermissionState, Visibility};
pub use event::{ActionPerformed, CanonicalEvent, EventKind, DISMISS_ACTION, TAP_ACTION};
pub use native::{
    DEFAULT_ACTION_IDENTIFIER, DISMISS_ACTION_IDENTIFIER, EXTRA_KEY, SCHEDULE_KEY, NativeContent, NativeEvent, NativeNotification, NativeRequest, NativeResponse, NativeTrigger,
    NativeValue,
};
pub use normalize::{decode_request, decode_response, encode, INVALID_ID};
pub use notification::{Attachment, NotificationId, NotificationRecord};
pub use schedule::{Schedule, ScheduleEvery};
pub use time_fmt::{format_iso8601, parse_iso8601};
