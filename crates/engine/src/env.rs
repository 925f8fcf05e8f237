// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use std::path::PathBuf;

/// Resolve state directory: NB_STATE_DIR > XDG_STATE_HOME/nb > ~/.local/state/nb
pub fn state_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("NB_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("nb"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/nb"))
}

/// Store backend override (`file` or `memory`)
pub fn store_kind() -> Option<String> {
    std::env::var("NB_STORE").ok().filter(|s| !s.is_empty())
}

/// Adapter override (`desktop` or `noop`)
pub fn adapter_kind() -> Option<String> {
    std::env::var("NB_ADAPTER").ok().filter(|s| !s.is_empty())
}

/// Application name shown by desktop notifications
pub fn app_name() -> Option<String> {
    std::env::var("NB_APP_NAME").ok().filter(|s| !s.is_empty())
}
