// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform notification adapters

mod desktop;
mod noop;

pub use desktop::DesktopNotifyAdapter;
pub use noop::NoOpNotifyAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

use async_trait::async_trait;
use nb_core::{
    ActionType, Channel, NativeNotification, NativeRequest, NotificationId, PermissionState,
};
use thiserror::Error;

/// Errors from the platform notification API
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("notification permission not granted")]
    PermissionDenied,
    #[error("notification {id} rejected: {reason}")]
    Rejected { id: String, reason: String },
    #[error("{0} not supported on this platform")]
    Unsupported(&'static str),
}

/// The platform's notification center.
///
/// Requests are keyed by their decimal identifier; callers pass numeric ids.
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Deliver immediate requests now and arm scheduled ones.
    ///
    /// A request whose identifier is already pending replaces it.
    async fn schedule(&self, requests: Vec<NativeRequest>) -> Result<(), NotifyError>;

    /// Disarm pending requests. Unknown ids are ignored.
    async fn cancel(&self, ids: &[NotificationId]) -> Result<(), NotifyError>;

    async fn cancel_all(&self) -> Result<(), NotifyError>;

    /// Requests armed but not yet delivered (repeating ones stay listed).
    async fn pending(&self) -> Result<Vec<NativeRequest>, NotifyError>;

    /// Notifications currently shown to the user.
    async fn active(&self) -> Result<Vec<NativeNotification>, NotifyError>;

    async fn remove_active(&self, ids: &[NotificationId]) -> Result<(), NotifyError>;

    async fn remove_all_active(&self) -> Result<(), NotifyError>;

    /// Make action categories known to the platform.
    async fn register_action_types(&self, types: &[ActionType]) -> Result<(), NotifyError>;

    async fn permission_state(&self) -> Result<PermissionState, NotifyError>;

    /// Prompt the user if the platform requires it.
    async fn request_permission(&self) -> Result<PermissionState, NotifyError>;

    async fn create_channel(&self, _channel: Channel) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported("channels"))
    }

    async fn delete_channel(&self, _id: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported("channels"))
    }

    async fn list_channels(&self) -> Result<Vec<Channel>, NotifyError> {
        Err(NotifyError::Unsupported("channels"))
    }
}
