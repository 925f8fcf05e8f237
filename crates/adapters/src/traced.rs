// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::notify::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use nb_core::{
    ActionType, Channel, NativeNotification, NativeRequest, NotificationId, PermissionState,
};
use tracing::Instrument;

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotify<A> {
    inner: A,
}

impl<A> TracedNotify<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

fn log_result<T>(op: &str, result: &Result<T, NotifyError>) {
    if let Err(e) = result {
        tracing::error!(op, error = %e, "notify call failed");
    }
}

#[async_trait]
impl<A: NotifyAdapter> NotifyAdapter for TracedNotify<A> {
    async fn schedule(&self, requests: Vec<NativeRequest>) -> Result<(), NotifyError> {
        let count = requests.len();
        let scheduled = requests.iter().filter(|r| r.trigger.is_some()).count();
        async {
            tracing::info!(count, scheduled, "starting");
            let start = std::time::Instant::now();
            let result = self.inner.schedule(requests).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "requests submitted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "schedule failed"),
            }
            result
        }
        .instrument(tracing::info_span!("notify.schedule"))
        .await
    }

    async fn cancel(&self, ids: &[NotificationId]) -> Result<(), NotifyError> {
        tracing::info_span!("notify.cancel", ?ids).in_scope(|| tracing::debug!("cancelling"));
        let result = self.inner.cancel(ids).await;
        log_result("cancel", &result);
        result
    }

    async fn cancel_all(&self) -> Result<(), NotifyError> {
        tracing::info!("cancelling all pending notifications");
        let result = self.inner.cancel_all().await;
        log_result("cancel_all", &result);
        result
    }

    async fn pending(&self) -> Result<Vec<NativeRequest>, NotifyError> {
        let result = self.inner.pending().await;
        match &result {
            Ok(requests) => tracing::debug!(count = requests.len(), "listed pending"),
            Err(e) => tracing::error!(error = %e, "pending failed"),
        }
        result
    }

    async fn active(&self) -> Result<Vec<NativeNotification>, NotifyError> {
        let result = self.inner.active().await;
        match &result {
            Ok(delivered) => tracing::debug!(count = delivered.len(), "listed active"),
            Err(e) => tracing::error!(error = %e, "active failed"),
        }
        result
    }

    async fn remove_active(&self, ids: &[NotificationId]) -> Result<(), NotifyError> {
        let result = self.inner.remove_active(ids).await;
        tracing::info_span!("notify.remove_active", ?ids).in_scope(|| match &result {
            Ok(()) => tracing::info!("removed"),
            Err(e) => tracing::warn!(error = %e, "remove failed"),
        });
        result
    }

    async fn remove_all_active(&self) -> Result<(), NotifyError> {
        let result = self.inner.remove_all_active().await;
        log_result("remove_all_active", &result);
        result
    }

    async fn register_action_types(&self, types: &[ActionType]) -> Result<(), NotifyError> {
        let result = self.inner.register_action_types(types).await;
        match &result {
            Ok(()) => tracing::info!(count = types.len(), "action types registered"),
            Err(e) => tracing::error!(error = %e, "register_action_types failed"),
        }
        result
    }

    async fn permission_state(&self) -> Result<PermissionState, NotifyError> {
        let result = self.inner.permission_state().await;
        log_result("permission_state", &result);
        result
    }

    async fn request_permission(&self) -> Result<PermissionState, NotifyError> {
        let result = self.inner.request_permission().await;
        match &result {
            Ok(state) => tracing::info!(?state, "permission requested"),
            Err(e) => tracing::error!(error = %e, "request_permission failed"),
        }
        result
    }

    async fn create_channel(&self, channel: Channel) -> Result<(), NotifyError> {
        let id = channel.id.clone();
        let result = self.inner.create_channel(channel).await;
        tracing::info_span!("notify.create_channel", %id).in_scope(|| match &result {
            Ok(()) => tracing::info!("channel created"),
            Err(e) => tracing::warn!(error = %e, "create_channel failed"),
        });
        result
    }

    async fn delete_channel(&self, id: &str) -> Result<(), NotifyError> {
        let result = self.inner.delete_channel(id).await;
        log_result("delete_channel", &result);
        result
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, NotifyError> {
        let result = self.inner.list_channels().await;
        log_result("list_channels", &result);
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
