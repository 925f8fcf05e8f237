//! Saved-record inspection specs
//!
//! `nb saved` and `nb action-types` read the persisted stores directly.

use crate::prelude::*;
use serde_json::json;

#[test]
fn saved_on_empty_state_prints_empty_list() {
    let state = State::empty();
    state.nb().args(&["saved"]).passes().stdout_eq("[]\n");
}

#[test]
fn saved_prints_stored_records() {
    let state = State::empty();
    let record = json!({
        "id": 3,
        "title": "Standup",
        "schedule": { "every": "day" }
    });
    state.write_store(
        "NOTIFICATION_STORE",
        &json!({ "3": record.to_string() }),
    );

    let out = state.nb().args(&["saved"]).passes();
    similar_asserts::assert_eq!(out.json(), json!([record]));

    let one = state.nb().args(&["saved", "--id", "3"]).passes();
    similar_asserts::assert_eq!(one.json(), record);
}

#[test]
fn saved_skips_unreadable_entries() {
    let state = State::empty();
    state.write_store(
        "NOTIFICATION_STORE",
        &json!({
            "1": "{not json",
            "2": json!({ "id": 2, "schedule": { "every": "hour" } }).to_string(),
            "3": 17
        }),
    );

    let out = state.nb().args(&["saved"]).passes();
    similar_asserts::assert_eq!(
        out.json(),
        json!([{ "id": 2, "schedule": { "every": "hour" } }])
    );
}

#[test]
fn corrupt_store_file_is_set_aside() {
    let state = State::empty();
    let path = state.store_file("NOTIFICATION_STORE");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "definitely not json").unwrap();

    state.nb().args(&["saved"]).passes().stdout_eq("[]\n");
    assert!(path.with_extension("bak").exists());
}

#[test]
fn action_types_prints_group_with_gaps() {
    let state = State::empty();
    state.write_store(
        "ACTION_TYPE_STOREchat",
        &json!({
            "count": 3,
            "id0": "reply",
            "title0": "Reply",
            "input0": true,
            "title1": "orphan title",
            "id2": "open"
        }),
    );

    let out = state.nb().args(&["action-types", "chat"]).passes();
    similar_asserts::assert_eq!(
        out.json(),
        json!([
            { "id": "reply", "title": "Reply", "input": true },
            null,
            { "id": "open", "title": "", "input": false }
        ])
    );
}

#[test]
fn action_types_for_unknown_group_is_empty() {
    let state = State::empty();
    state
        .nb()
        .args(&["action-types", "nope"])
        .passes()
        .stdout_eq("[]\n");
}
