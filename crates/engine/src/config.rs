// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration resolved from the environment.

use crate::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory (set NB_STATE_DIR)")]
    NoStateDir,
    #[error("invalid {var}: {value:?} (expected one of: {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Where records and action groups are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    File,
    /// Process-local; nothing survives a restart.
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(StoreKind::File),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::InvalidValue {
                var: "NB_STORE",
                value: other.to_string(),
                expected: "file, memory",
            }),
        }
    }
}

/// Which platform adapter delivers notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdapterKind {
    #[default]
    Desktop,
    NoOp,
}

impl FromStr for AdapterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(AdapterKind::Desktop),
            "noop" => Ok(AdapterKind::NoOp),
            other => Err(ConfigError::InvalidValue {
                var: "NB_ADAPTER",
                value: other.to_string(),
                expected: "desktop, noop",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub state_dir: PathBuf,
    pub store: StoreKind,
    pub adapter: AdapterKind,
    pub app_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let state_dir = env::state_dir().ok_or(ConfigError::NoStateDir)?;
        let store = env::store_kind()
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or_default();
        let adapter = env::adapter_kind()
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            state_dir,
            store,
            adapter,
            app_name: env::app_name().unwrap_or_else(|| "nb".to_string()),
        })
    }

    /// Directory holding one JSON file per store namespace.
    pub fn store_dir(&self) -> PathBuf {
        self.state_dir.join("store")
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join("nb.log")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
