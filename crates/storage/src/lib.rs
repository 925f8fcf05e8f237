// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for notification records and action groups

mod action_store;
mod file;
mod memory;
mod notification_store;
mod store;

pub use action_store::{ActionGroupStore, ACTION_TYPE_STORE};
pub use file::{FileBackend, FileStore};
pub use memory::{MemoryBackend, MemoryStore};
pub use notification_store::{Checkpoint, NotificationStore, NOTIFICATION_STORE};
pub use store::{Edit, Store, StoreBackend, StoreError, StoredValue};
