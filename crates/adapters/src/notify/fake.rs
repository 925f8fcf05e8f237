// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use chrono::Utc;
use nb_core::{
    ActionType, Channel, NativeEvent, NativeNotification, NativeRequest, NotificationId,
    PermissionState,
};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Recorded adapter call
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyCall {
    Schedule { identifiers: Vec<String> },
    Cancel { ids: Vec<NotificationId> },
    CancelAll,
    RemoveActive { ids: Vec<NotificationId> },
    RemoveAllActive,
    RegisterActionTypes { ids: Vec<String> },
    RequestPermission,
    CreateChannel { id: String },
    DeleteChannel { id: String },
}

struct FakeNotifyState {
    calls: Vec<NotifyCall>,
    pending: BTreeMap<String, NativeRequest>,
    active: BTreeMap<String, NativeNotification>,
    action_types: Vec<ActionType>,
    channels: BTreeMap<String, Channel>,
    permission: PermissionState,
    fail_schedule: Option<String>,
}

/// Fake notification adapter for testing
#[derive(Clone)]
pub struct FakeNotifyAdapter {
    inner: Arc<Mutex<FakeNotifyState>>,
}

impl Default for FakeNotifyAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeNotifyState {
                calls: Vec::new(),
                pending: BTreeMap::new(),
                active: BTreeMap::new(),
                action_types: Vec::new(),
                channels: BTreeMap::new(),
                permission: PermissionState::Granted,
                fail_schedule: None,
            })),
        }
    }
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.inner.lock().calls.clone()
    }

    /// Action types registered so far, in registration order
    pub fn action_types(&self) -> Vec<ActionType> {
        self.inner.lock().action_types.clone()
    }

    /// Set the state reported by `permission_state` and `request_permission`
    pub fn set_permission(&self, permission: PermissionState) {
        self.inner.lock().permission = permission;
    }

    /// Make the next `schedule` calls fail with `reason`
    pub fn fail_schedule(&self, reason: impl Into<String>) {
        self.inner.lock().fail_schedule = Some(reason.into());
    }

    /// Simulate the OS firing a pending request.
    ///
    /// Moves the request to the active set (repeating ones stay pending)
    /// and returns the callback the OS would deliver.
    pub fn deliver(&self, identifier: &str) -> Option<NativeEvent> {
        let mut state = self.inner.lock();
        let request = state.pending.get(identifier).cloned()?;
        let repeats = match &request.trigger {
            Some(nb_core::NativeTrigger::Date { repeats, .. }) => *repeats,
            Some(nb_core::NativeTrigger::Interval { .. }) => true,
            None => false,
        };
        if !repeats {
            state.pending.remove(identifier);
        }
        let delivered = NativeNotification {
            request,
            date: Utc::now(),
        };
        state
            .active
            .insert(identifier.to_string(), delivered.clone());
        Some(NativeEvent::Presented(delivered))
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn schedule(&self, requests: Vec<NativeRequest>) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state.calls.push(NotifyCall::Schedule {
            identifiers: requests.iter().map(|r| r.identifier.clone()).collect(),
        });
        if let Some(reason) = &state.fail_schedule {
            return Err(NotifyError::SendFailed(reason.clone()));
        }
        for request in requests {
            if request.trigger.is_some() {
                state.pending.insert(request.identifier.clone(), request);
            } else {
                let delivered = NativeNotification {
                    request,
                    date: Utc::now(),
                };
                state
                    .active
                    .insert(delivered.request.identifier.clone(), delivered);
            }
        }
        Ok(())
    }

    async fn cancel(&self, ids: &[NotificationId]) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state.calls.push(NotifyCall::Cancel { ids: ids.to_vec() });
        for id in ids {
            state.pending.remove(&id.to_string());
        }
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state.calls.push(NotifyCall::CancelAll);
        state.pending.clear();
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<NativeRequest>, NotifyError> {
        Ok(self.inner.lock().pending.values().cloned().collect())
    }

    async fn active(&self) -> Result<Vec<NativeNotification>, NotifyError> {
        Ok(self.inner.lock().active.values().cloned().collect())
    }

    async fn remove_active(&self, ids: &[NotificationId]) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state
            .calls
            .push(NotifyCall::RemoveActive { ids: ids.to_vec() });
        for id in ids {
            state.active.remove(&id.to_string());
        }
        Ok(())
    }

    async fn remove_all_active(&self) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state.calls.push(NotifyCall::RemoveAllActive);
        state.active.clear();
        Ok(())
    }

    async fn register_action_types(&self, types: &[ActionType]) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state.calls.push(NotifyCall::RegisterActionTypes {
            ids: types.iter().map(|t| t.id.clone()).collect(),
        });
        state.action_types.extend_from_slice(types);
        Ok(())
    }

    async fn permission_state(&self) -> Result<PermissionState, NotifyError> {
        Ok(self.inner.lock().permission)
    }

    async fn request_permission(&self) -> Result<PermissionState, NotifyError> {
        let mut state = self.inner.lock();
        state.calls.push(NotifyCall::RequestPermission);
        Ok(state.permission)
    }

    async fn create_channel(&self, channel: Channel) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state.calls.push(NotifyCall::CreateChannel {
            id: channel.id.clone(),
        });
        state.channels.insert(channel.id.clone(), channel);
        Ok(())
    }

    async fn delete_channel(&self, id: &str) -> Result<(), NotifyError> {
        let mut state = self.inner.lock();
        state
            .calls
            .push(NotifyCall::DeleteChannel { id: id.to_string() });
        state.channels.remove(id);
        Ok(())
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, NotifyError> {
        Ok(self.inner.lock().channels.values().cloned().collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
