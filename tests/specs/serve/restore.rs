//! Restart specs
//!
//! Saved records outlive the process that scheduled them.

use crate::prelude::*;
use serde_json::json;

#[test]
fn records_survive_restart_and_can_be_cancelled_later() {
    let state = State::empty();
    state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[
            r#"{"cmd":"notify","args":{"id":1,"title":"a","schedule":{"at":"2030-01-01T09:00:00Z"}}}"#,
            r#"{"cmd":"notify","args":{"id":2,"title":"b","schedule":{"every":"week","count":2}}}"#,
        ])
        .passes();

    // Second process restores both, then cancels one.
    state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[r#"{"cmd":"cancel","args":{"notifications":[1]}}"#])
        .passes();

    let out = state.nb().args(&["saved"]).passes();
    similar_asserts::assert_eq!(
        out.json(),
        json!([{ "id": 2, "title": "b", "schedule": { "every": "week", "count": 2 } }])
    );
}

#[test]
fn cancel_all_clears_saved_records() {
    let state = State::empty();
    state.write_store(
        "NOTIFICATION_STORE",
        &json!({
            "5": json!({ "id": 5, "schedule": { "every": "minute" } }).to_string()
        }),
    );

    state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[r#"{"cmd":"cancel"}"#])
        .passes();

    state.nb().args(&["saved"]).passes().stdout_eq("[]\n");
}

#[test]
fn serve_writes_log_file() {
    let state = State::empty();
    state.nb().args(&["serve"]).stdin_lines(&[]).passes();
    assert!(state.path().join("nb.log").exists());
}
