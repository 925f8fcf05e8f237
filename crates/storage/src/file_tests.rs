// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn commit_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ns.json");

    let store = FileStore::open(&path).unwrap();
    store
        .commit(Edit::new().put("a", "text").put("b", 3_i64).put("c", true))
        .unwrap();

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("a").unwrap(), Some(StoredValue::from("text")));
    assert_eq!(reopened.get("b").unwrap(), Some(StoredValue::Int(3)));
    assert_eq!(reopened.get("c").unwrap(), Some(StoredValue::Bool(true)));
}

#[test]
fn missing_file_is_empty_store() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(&dir.path().join("absent.json")).unwrap();
    assert!(store.keys().unwrap().is_empty());
}

#[test]
fn atomic_write_leaves_no_tmp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ns.json");
    let store = FileStore::open(&path).unwrap();
    store.set("k", StoredValue::from("v")).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn emptied_store_removes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ns.json");
    let store = FileStore::open(&path).unwrap();
    store.set("k", StoredValue::from("v")).unwrap();
    store.commit(Edit::new().clear()).unwrap();

    assert!(!path.exists());
    assert!(FileStore::open(&path).unwrap().keys().unwrap().is_empty());
}

#[test]
fn corrupt_file_is_moved_to_bak() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ns.json");
    let mut f = File::create(&path).unwrap();
    f.write_all(b"{not json").unwrap();
    drop(f);

    let store = FileStore::open(&path).unwrap();
    assert!(store.keys().unwrap().is_empty());
    assert!(!path.exists());
    assert!(path.with_extension("bak").exists());
}

#[test]
fn unsupported_entry_types_are_dropped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ns.json");
    fs::write(&path, r#"{"good":"yes","list":[1,2],"float":1.5,"null":null}"#).unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.keys().unwrap(), vec!["good"]);
}

#[test]
fn bak_rotation_keeps_three() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ns.json");
    for _ in 0..4 {
        fs::write(&path, "garbage").unwrap();
        FileStore::open(&path).unwrap();
    }
    assert!(path.with_extension("bak").exists());
    assert!(path.with_extension("bak.2").exists());
    assert!(path.with_extension("bak.3").exists());
    assert!(!path.with_extension("bak.4").exists());
}

#[yare::parameterized(
    plain       = { "NOTIFICATION_STORE",    "NOTIFICATION_STORE.json" },
    category    = { "ACTION_TYPE_STOREchat", "ACTION_TYPE_STOREchat.json" },
    slash       = { "ACTION_TYPE_STOREa/b",  "ACTION_TYPE_STOREa%2Fb.json" },
    parent_dir  = { "..",                    "%2E..json" },
    inner_dot   = { "a.b",                   "a.b.json" },
)]
fn namespace_file_names(namespace: &str, expected: &str) {
    assert_eq!(file_name(namespace), expected);
}

#[test]
fn backend_shares_handles_per_namespace() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path());
    let first = backend.open("ns").unwrap();
    let second = backend.open("ns").unwrap();
    first.set("k", StoredValue::from("v")).unwrap();
    assert_eq!(second.get("k").unwrap(), Some(StoredValue::from("v")));
    assert_eq!(first.path(), dir.path().join("ns.json"));
}

#[test]
fn backend_creates_directory_on_first_write() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path().join("nested/store"));
    let store = backend.open("ns").unwrap();
    store.set("k", StoredValue::from("v")).unwrap();
    assert!(backend.dir().join("ns.json").exists());
}

#[test]
fn backend_forgets_namespaces_nobody_holds() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path());
    let held = backend.open("held").unwrap();
    for i in 0..50 {
        drop(backend.open(&format!("ACTION_TYPE_STORE{i}")).unwrap());
    }
    drop(backend.open("last").unwrap());

    assert_eq!(backend.cached(), 2);
    held.set("k", StoredValue::from("v")).unwrap();
    assert_eq!(
        backend.open("held").unwrap().get("k").unwrap(),
        Some(StoredValue::from("v"))
    );
}

#[test]
fn reopening_a_forgotten_namespace_reads_its_file() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path());
    backend
        .open("ns")
        .unwrap()
        .set("k", StoredValue::Int(7))
        .unwrap();
    drop(backend.open("other").unwrap());

    assert_eq!(
        backend.open("ns").unwrap().get("k").unwrap(),
        Some(StoredValue::Int(7))
    );
}
