// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Notification bridge engine: event bridge, service and command dispatch

pub mod bridge;
pub mod commands;
mod config;
pub mod env;
mod error;
mod listeners;
mod service;

pub use bridge::{translate, EventBridge, Presentation};
pub use commands::{dispatch, CommandError, Invoke, Response};
pub use config::{AdapterKind, Config, ConfigError, StoreKind};
pub use error::ServiceError;
pub use listeners::{ListenerId, Listeners};
pub use service::NotificationService;
