// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification adapter using notify-rust.
//!
//! Desktop notification daemons have no scheduler of their own, so this
//! adapter plays the OS scheduler: every scheduled request is armed as a
//! tokio task that sleeps until its trigger and then shows the
//! notification. Each presentation is reported on the event channel as a
//! [`NativeEvent::Presented`].
//!
//! Missed occurrences of a repeating trigger are skipped, not replayed: after
//! a restart the next fire is the first occurrence that is still ahead.
//!
//! On freedesktop targets an interactive adapter also waits on each shown
//! notification and reports the user's action (or the close) as a
//! [`NativeEvent::Responded`].
//!
//! On macOS, `notify-rust` uses `mac-notification-sys` (Cocoa bindings) to send
//! notifications via the Notification Center. The first notification triggers
//! `ensure_application_set()` which runs an AppleScript to look up a bundle
//! identifier. Without Automation permissions, that AppleScript blocks
//! forever. We pre-set the bundle identifier at construction time to bypass
//! the lookup entirely.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nb_core::{
    ActionType, Channel, NativeEvent, NativeNotification, NativeRequest, NativeTrigger,
    NotificationAction, NotificationId, PermissionState, ScheduleEvery,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

struct Armed {
    request: NativeRequest,
    generation: u64,
    task: AbortHandle,
}

#[derive(Default)]
struct DesktopState {
    pending: HashMap<String, Armed>,
    active: BTreeMap<String, NativeNotification>,
    categories: HashMap<String, Vec<NotificationAction>>,
    channels: BTreeMap<String, Channel>,
    generation: u64,
}

struct DesktopInner {
    app_name: String,
    events: mpsc::Sender<NativeEvent>,
    state: Mutex<DesktopState>,
    /// Show notifications through the desktop daemon.
    display: bool,
    /// Wait on shown notifications for the user's response.
    responses: bool,
}

#[derive(Clone)]
pub struct DesktopNotifyAdapter {
    inner: Arc<DesktopInner>,
}

impl DesktopNotifyAdapter {
    /// Create an adapter that reports presentations on `events`.
    pub fn new(app_name: impl Into<String>, events: mpsc::Sender<NativeEvent>) -> Self {
        Self::build(app_name.into(), events, true, false)
    }

    /// Like [`new`](Self::new), but also reports taps, action buttons and
    /// dismissals on `events` where the desktop supports it.
    pub fn interactive(app_name: impl Into<String>, events: mpsc::Sender<NativeEvent>) -> Self {
        Self::build(app_name.into(), events, true, true)
    }

    /// Scheduling and bookkeeping only; nothing reaches the desktop.
    #[cfg(test)]
    fn headless(events: mpsc::Sender<NativeEvent>) -> Self {
        Self::build("nb-test".to_string(), events, false, false)
    }

    fn build(
        app_name: String,
        events: mpsc::Sender<NativeEvent>,
        display: bool,
        responses: bool,
    ) -> Self {
        #[cfg(target_os = "macos")]
        {
            // Pre-set the application bundle identifier so mac-notification-sys
            // skips its NSAppleScript lookup (which blocks forever in processes
            // that lack Automation permissions).
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self {
            inner: Arc::new(DesktopInner {
                app_name,
                events,
                state: Mutex::new(DesktopState::default()),
                display,
                responses,
            }),
        }
    }

    fn arm(&self, request: NativeRequest, trigger: NativeTrigger) {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        let generation = state.generation;
        let inner = Arc::clone(&self.inner);
        let armed_request = request.clone();
        let task = tokio::spawn(async move {
            run_trigger(inner, armed_request, trigger, generation).await;
        })
        .abort_handle();

        if let Some(previous) = state.pending.insert(
            request.identifier.clone(),
            Armed {
                request,
                generation,
                task,
            },
        ) {
            previous.task.abort();
        }
    }
}

/// Delay from now until `at`, zero if it already passed.
fn until(at: DateTime<Utc>) -> Duration {
    (at - Utc::now()).to_std().unwrap_or(Duration::ZERO)
}

/// Repeating date triggers recur daily at the time of day of `at`.
fn repeat_period() -> chrono::Duration {
    chrono::Duration::days(1)
}

/// The first of `first + k * period` (k >= 0) that is not before `now`.
fn next_occurrence(
    first: DateTime<Utc>,
    period: chrono::Duration,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if first >= now {
        return Some(first);
    }
    let period_ms = period.num_milliseconds().max(1);
    let behind = (now - first).num_milliseconds();
    let steps = behind.div_euclid(period_ms) + i64::from(behind.rem_euclid(period_ms) != 0);
    let skip = chrono::Duration::try_milliseconds(steps.checked_mul(period_ms)?)?;
    first.checked_add_signed(skip)
}

/// The first interval step after `from` that is not before `now`.
fn advance_past(
    unit: ScheduleEvery,
    count: u8,
    from: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let mut next = unit.advance(from, count)?;
    while next < now {
        next = unit.advance(next, count)?;
    }
    Some(next)
}

/// When a freshly armed trigger fires first.
fn first_fire(trigger: &NativeTrigger, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match trigger {
        NativeTrigger::Date { at, repeats: false } => Some(*at),
        NativeTrigger::Date { at, repeats: true } => next_occurrence(*at, repeat_period(), now),
        NativeTrigger::Interval { unit, count } => unit.advance(now, *count),
    }
}

/// When a trigger that just fired at `fired` fires again.
fn next_fire(
    trigger: &NativeTrigger,
    fired: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match trigger {
        NativeTrigger::Date { repeats: false, .. } => None,
        NativeTrigger::Date { repeats: true, .. } => {
            let period = repeat_period();
            next_occurrence(fired.checked_add_signed(period)?, period, now)
        }
        NativeTrigger::Interval { unit, count } => advance_past(*unit, *count, fired, now),
    }
}

async fn run_trigger(
    inner: Arc<DesktopInner>,
    request: NativeRequest,
    trigger: NativeTrigger,
    generation: u64,
) {
    let mut next = first_fire(&trigger, Utc::now());
    while let Some(at) = next {
        tokio::time::sleep(until(at)).await;
        present(&inner, &request);
        next = next_fire(&trigger, at, Utc::now());
    }

    let mut state = inner.state.lock();
    if state
        .pending
        .get(&request.identifier)
        .is_some_and(|armed| armed.generation == generation)
    {
        state.pending.remove(&request.identifier);
    }
}

fn present(inner: &Arc<DesktopInner>, request: &NativeRequest) {
    let delivered = NativeNotification {
        request: request.clone(),
        date: Utc::now(),
    };
    let actions = {
        let mut state = inner.state.lock();
        state
            .active
            .insert(request.identifier.clone(), delivered.clone());
        state
            .categories
            .get(&request.content.category_identifier)
            .cloned()
            .unwrap_or_default()
    };

    if inner.display {
        show(inner, delivered.clone(), actions);
    }

    // The OS callback thread must never block on a slow consumer.
    send_event(inner, NativeEvent::Presented(delivered));
}

fn send_event(inner: &DesktopInner, event: NativeEvent) {
    if let Err(e) = inner.events.try_send(event) {
        tracing::warn!(error = %e, "dropping native event");
    }
}

fn show(
    inner: &Arc<DesktopInner>,
    delivered: NativeNotification,
    actions: Vec<NotificationAction>,
) {
    let inner = Arc::clone(inner);
    // notify_rust::Notification::show() is synchronous on macOS.
    // Fire-and-forget on tokio's bounded blocking thread pool to avoid
    // blocking the async runtime while capping OS thread count.
    tokio::task::spawn_blocking(move || {
        let content = &delivered.request.content;
        let title = content.title.clone();
        tracing::info!(%title, "sending desktop notification");
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(&inner.app_name)
            .summary(&content.title)
            .body(&content.body);
        if let Some(sound) = &content.sound {
            notification.sound_name(sound);
        }
        for action in &actions {
            notification.action(&action.id, &action.title);
        }
        match notification.show() {
            Ok(handle) => {
                tracing::info!(%title, "desktop notification sent");
                if inner.responses {
                    watch_responses(inner, delivered, handle);
                }
            }
            Err(e) => {
                tracing::warn!(%title, error = %e, "desktop notification failed");
            }
        }
    });
}

/// Map a freedesktop action key onto the native action identifier.
#[cfg(all(unix, not(target_os = "macos")))]
fn response_event(notification: NativeNotification, action: &str) -> NativeEvent {
    let action_identifier = match action {
        "__closed" => nb_core::DISMISS_ACTION_IDENTIFIER,
        "default" => nb_core::DEFAULT_ACTION_IDENTIFIER,
        other => other,
    };
    NativeEvent::Responded(nb_core::NativeResponse {
        notification,
        action_identifier: action_identifier.to_string(),
        user_text: None,
    })
}

#[cfg(all(unix, not(target_os = "macos")))]
fn watch_responses(
    inner: Arc<DesktopInner>,
    delivered: NativeNotification,
    handle: notify_rust::NotificationHandle,
) {
    // The wait lasts until the user acts or the daemon closes the
    // notification. A detached thread keeps runtime shutdown from waiting.
    let spawned = std::thread::Builder::new()
        .name("nb-response".to_string())
        .spawn(move || {
            handle.wait_for_action(|action| {
                if action == "__closed" {
                    let mut state = inner.state.lock();
                    let identifier = &delivered.request.identifier;
                    if state
                        .active
                        .get(identifier)
                        .is_some_and(|shown| shown.date == delivered.date)
                    {
                        state.active.remove(identifier);
                    }
                }
                tracing::info!(
                    identifier = %delivered.request.identifier,
                    action,
                    "desktop notification response"
                );
                send_event(&inner, response_event(delivered.clone(), action));
            });
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot wait for notification response");
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn watch_responses(
    _inner: Arc<DesktopInner>,
    _delivered: NativeNotification,
    _handle: notify_rust::NotificationHandle,
) {
}

fn keys(ids: &[NotificationId]) -> impl Iterator<Item = String> + '_ {
    ids.iter().map(|id| id.to_string())
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn schedule(&self, requests: Vec<NativeRequest>) -> Result<(), NotifyError> {
        for request in requests {
            match request.trigger.clone() {
                Some(trigger) => self.arm(request, trigger),
                None => present(&self.inner, &request),
            }
        }
        Ok(())
    }

    async fn cancel(&self, ids: &[NotificationId]) -> Result<(), NotifyError> {
        let mut state = self.inner.state.lock();
        for key in keys(ids) {
            if let Some(armed) = state.pending.remove(&key) {
                armed.task.abort();
            }
        }
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotifyError> {
        let mut state = self.inner.state.lock();
        for (_, armed) in state.pending.drain() {
            armed.task.abort();
        }
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<NativeRequest>, NotifyError> {
        let state = self.inner.state.lock();
        let mut requests: Vec<_> = state.pending.values().map(|a| a.request.clone()).collect();
        requests.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(requests)
    }

    async fn active(&self) -> Result<Vec<NativeNotification>, NotifyError> {
        Ok(self.inner.state.lock().active.values().cloned().collect())
    }

    async fn remove_active(&self, ids: &[NotificationId]) -> Result<(), NotifyError> {
        // Desktop daemons offer no portable way to retract a shown
        // notification; forget it so it is no longer reported as active.
        let mut state = self.inner.state.lock();
        for key in keys(ids) {
            state.active.remove(&key);
        }
        Ok(())
    }

    async fn remove_all_active(&self) -> Result<(), NotifyError> {
        self.inner.state.lock().active.clear();
        Ok(())
    }

    async fn register_action_types(&self, types: &[ActionType]) -> Result<(), NotifyError> {
        let mut state = self.inner.state.lock();
        for action_type in types {
            state
                .categories
                .insert(action_type.id.clone(), action_type.actions.clone());
        }
        Ok(())
    }

    async fn permission_state(&self) -> Result<PermissionState, NotifyError> {
        Ok(PermissionState::Granted)
    }

    async fn request_permission(&self) -> Result<PermissionState, NotifyError> {
        Ok(PermissionState::Granted)
    }

    async fn create_channel(&self, channel: Channel) -> Result<(), NotifyError> {
        self.inner
            .state
            .lock()
            .channels
            .insert(channel.id.clone(), channel);
        Ok(())
    }

    async fn delete_channel(&self, id: &str) -> Result<(), NotifyError> {
        self.inner.state.lock().channels.remove(id);
        Ok(())
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, NotifyError> {
        Ok(self.inner.state.lock().channels.values().cloned().collect())
    }
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
