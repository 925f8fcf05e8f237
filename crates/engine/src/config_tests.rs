// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::path::Path;

const VARS: &[&str] = &[
    "NB_STATE_DIR",
    "XDG_STATE_HOME",
    "NB_STORE",
    "NB_ADAPTER",
    "NB_APP_NAME",
];

/// Run `f` with only the given NB variables set, restoring afterwards.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let saved: Vec<_> = VARS.iter().map(|k| (*k, std::env::var(k).ok())).collect();
    for key in VARS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let result = f();
    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
    result
}

#[test]
#[serial(env)]
fn state_dir_prefers_explicit_override() {
    let config = with_env(
        &[("NB_STATE_DIR", "/tmp/nb-a"), ("XDG_STATE_HOME", "/tmp/xdg")],
        Config::from_env,
    )
    .unwrap();
    assert_eq!(config.state_dir, Path::new("/tmp/nb-a"));
    assert_eq!(config.store_dir(), Path::new("/tmp/nb-a/store"));
    assert_eq!(config.log_path(), Path::new("/tmp/nb-a/nb.log"));
}

#[test]
#[serial(env)]
fn state_dir_falls_back_to_xdg() {
    let config = with_env(&[("XDG_STATE_HOME", "/tmp/xdg")], Config::from_env).unwrap();
    assert_eq!(config.state_dir, Path::new("/tmp/xdg/nb"));
}

#[test]
#[serial(env)]
fn defaults_apply_when_unset() {
    let config = with_env(&[("NB_STATE_DIR", "/tmp/nb")], Config::from_env).unwrap();
    assert_eq!(config.store, StoreKind::File);
    assert_eq!(config.adapter, AdapterKind::Desktop);
    assert_eq!(config.app_name, "nb");
}

#[test]
#[serial(env)]
fn kinds_are_read_from_env() {
    let config = with_env(
        &[
            ("NB_STATE_DIR", "/tmp/nb"),
            ("NB_STORE", "memory"),
            ("NB_ADAPTER", "noop"),
            ("NB_APP_NAME", "demo"),
        ],
        Config::from_env,
    )
    .unwrap();
    assert_eq!(config.store, StoreKind::Memory);
    assert_eq!(config.adapter, AdapterKind::NoOp);
    assert_eq!(config.app_name, "demo");
}

#[test]
#[serial(env)]
fn unknown_store_kind_is_rejected() {
    let err = with_env(
        &[("NB_STATE_DIR", "/tmp/nb"), ("NB_STORE", "sqlite")],
        Config::from_env,
    )
    .unwrap_err();
    assert!(err.to_string().contains("NB_STORE"), "{err}");
}

#[yare::parameterized(
    file = { "file", StoreKind::File },
    memory = { "memory", StoreKind::Memory },
)]
fn store_kind_parses(input: &str, expected: StoreKind) {
    assert_eq!(input.parse::<StoreKind>().unwrap(), expected);
}

#[yare::parameterized(
    desktop = { "desktop", AdapterKind::Desktop },
    noop = { "noop", AdapterKind::NoOp },
)]
fn adapter_kind_parses(input: &str, expected: AdapterKind) {
    assert_eq!(input.parse::<AdapterKind>().unwrap(), expected);
}
