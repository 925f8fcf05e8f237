//! CLI error specs
//!
//! Verify bad input and bad configuration fail with a readable message.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails().stderr_has("frobnicate");
}

#[test]
fn invalid_store_kind_is_reported() {
    let state = State::empty();
    state
        .nb()
        .env("NB_STORE", "sqlite")
        .args(&["saved"])
        .fails()
        .stderr_has("NB_STORE");
}

#[test]
fn invalid_adapter_kind_is_reported() {
    let state = State::empty();
    state
        .nb()
        .env("NB_ADAPTER", "carrier-pigeon")
        .args(&["saved"])
        .fails()
        .stderr_has("NB_ADAPTER");
}

#[test]
fn saved_with_unknown_id_fails() {
    let state = State::empty();
    state
        .nb()
        .args(&["saved", "--id", "99"])
        .fails()
        .stderr_has("no saved notification with id 99");
}

#[test]
fn send_without_title_fails() {
    let state = State::empty();
    state
        .nb()
        .args(&["send", "--body", "x"])
        .fails()
        .stderr_has("--title");
}
