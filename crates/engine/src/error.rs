// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the notification service

use nb_adapters::NotifyError;
use nb_storage::StoreError;
use thiserror::Error;

/// Errors that can occur in the service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),
}
