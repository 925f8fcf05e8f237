//! `nb serve` command-loop specs
//!
//! Each stdin line is one invoke; each response is one stdout line.

use crate::prelude::*;
use serde_json::json;

const STANDUP: &str =
    r#"{"id":1,"cmd":"notify","args":{"id":7,"title":"Standup","schedule":{"every":"day"}}}"#;

#[test]
fn serve_answers_each_line_in_order() {
    let state = State::empty();
    let out = state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[
            STANDUP,
            r#"{"id":2,"cmd":"is_permission_granted"}"#,
            r#"{"id":3,"cmd":"get_pending"}"#,
        ])
        .passes();

    similar_asserts::assert_eq!(
        out.json_lines(),
        vec![
            json!({ "id": 1, "ok": true }),
            json!({ "id": 2, "ok": true, "data": true }),
            json!({ "id": 3, "ok": true, "data": [] }),
        ]
    );
}

#[test]
fn scheduled_notifications_are_saved() {
    let state = State::empty();
    state.nb().args(&["serve"]).stdin_lines(&[STANDUP]).passes();

    let saved = state.nb().args(&["saved"]).passes();
    similar_asserts::assert_eq!(
        saved.json(),
        json!([{ "id": 7, "title": "Standup", "schedule": { "every": "day" } }])
    );
}

#[test]
fn immediate_notifications_are_not_saved() {
    let state = State::empty();
    state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[r#"{"cmd":"notify","args":{"id":8,"title":"Now"}}"#])
        .passes();

    state.nb().args(&["saved"]).passes().stdout_eq("[]\n");
}

#[test]
fn cancel_removes_saved_record() {
    let state = State::empty();
    state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[
            STANDUP,
            r#"{"cmd":"cancel","args":{"notifications":[7]}}"#,
        ])
        .passes();

    state.nb().args(&["saved"]).passes().stdout_eq("[]\n");
    assert!(!state.store_file("NOTIFICATION_STORE").exists());
}

#[test]
fn register_action_types_is_saved() {
    let state = State::empty();
    state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[
            r#"{"cmd":"register_action_types","args":{"types":[{"id":"chat","actions":[{"id":"reply","title":"Reply","input":true}]}]}}"#,
        ])
        .passes();

    let out = state.nb().args(&["action-types", "chat"]).passes();
    similar_asserts::assert_eq!(
        out.json(),
        json!([{ "id": "reply", "title": "Reply", "input": true }])
    );
}

#[test]
fn bad_lines_get_error_responses() {
    let state = State::empty();
    let out = state
        .nb()
        .args(&["serve"])
        .stdin_lines(&[
            "this is not json",
            r#"{"id":"x","cmd":"explode"}"#,
            r#"{"id":"y","cmd":"notify","args":{"title":"missing id"}}"#,
            "",
        ])
        .passes();

    let lines = out.json_lines();
    assert_eq!(lines.len(), 3, "{lines:?}");
    assert!(lines.iter().all(|line| line["ok"] == json!(false)));
    assert_eq!(lines[1]["id"], json!("x"));
    assert_eq!(lines[1]["error"], json!("unknown command: explode"));
    assert!(lines[0]["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request"));
    assert!(lines[2]["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid arguments for notify"));
}

#[test]
fn memory_store_keeps_nothing_between_runs() {
    let state = State::empty();
    state
        .nb()
        .env("NB_STORE", "memory")
        .args(&["serve"])
        .stdin_lines(&[STANDUP])
        .passes();

    state.nb().args(&["saved"]).passes().stdout_eq("[]\n");
}
