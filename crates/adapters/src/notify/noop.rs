// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notification adapter.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use nb_core::{
    ActionType, Channel, NativeNotification, NativeRequest, NotificationId, PermissionState,
};

/// Notification adapter that silently discards all notifications.
///
/// Used when notifications are disabled or no notification daemon is
/// reachable (headless hosts, CI).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifyAdapter;

impl NoOpNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for NoOpNotifyAdapter {
    async fn schedule(&self, _requests: Vec<NativeRequest>) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn cancel(&self, _ids: &[NotificationId]) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn pending(&self) -> Result<Vec<NativeRequest>, NotifyError> {
        Ok(Vec::new())
    }

    async fn active(&self) -> Result<Vec<NativeNotification>, NotifyError> {
        Ok(Vec::new())
    }

    async fn remove_active(&self, _ids: &[NotificationId]) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn remove_all_active(&self) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn register_action_types(&self, _types: &[ActionType]) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn permission_state(&self) -> Result<PermissionState, NotifyError> {
        Ok(PermissionState::Granted)
    }

    async fn request_permission(&self) -> Result<PermissionState, NotifyError> {
        Ok(PermissionState::Granted)
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, NotifyError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
