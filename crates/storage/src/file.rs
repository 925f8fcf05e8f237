// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-file store backend.
//!
//! Each namespace is one JSON object at `<dir>/<namespace>.json`. The file
//! is loaded once when the namespace is opened and rewritten atomically
//! (write to `.tmp`, then rename) on every commit.

use crate::store::{Edit, Store, StoreBackend, StoreError, StoredValue};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

struct FileState {
    path: PathBuf,
    entries: BTreeMap<String, StoredValue>,
}

/// One namespace backed by a JSON file. Clones share the same lock.
#[derive(Clone)]
pub struct FileStore {
    inner: Arc<Mutex<FileState>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A file that is not a JSON object is moved to `.bak` and the store
    /// starts empty. Entries of unsupported JSON types are dropped.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let entries = load(path)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(FileState {
                path: path.to_owned(),
                entries,
            })),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.inner.lock().path.clone()
    }

    /// Whether a handle other than this one is alive.
    fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(self.inner.lock().entries.get(key).cloned())
    }

    fn entries(&self) -> Result<BTreeMap<String, StoredValue>, StoreError> {
        Ok(self.inner.lock().entries.clone())
    }

    fn commit(&self, edit: Edit) -> Result<(), StoreError> {
        if edit.is_empty() {
            return Ok(());
        }
        let mut state = self.inner.lock();
        let mut next = state.entries.clone();
        edit.apply_to(&mut next);
        // Only publish in memory once the file is durable.
        save(&state.path, &next)?;
        state.entries = next;
        Ok(())
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, StoredValue>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            quarantine(path, &e.to_string())?;
            return Ok(BTreeMap::new());
        }
        Err(e) => return Err(e.into()),
    };

    let object: Map<String, Value> = match serde_json::from_str(&text) {
        Ok(object) => object,
        Err(e) => {
            quarantine(path, &e.to_string())?;
            return Ok(BTreeMap::new());
        }
    };

    let mut entries = BTreeMap::new();
    for (key, value) in object {
        match serde_json::from_value::<StoredValue>(value) {
            Ok(value) => {
                entries.insert(key, value);
            }
            Err(_) => {
                warn!(path = %path.display(), key = %key, "dropping entry of unsupported type");
            }
        }
    }
    Ok(entries)
}

fn quarantine(path: &Path, error: &str) -> Result<(), StoreError> {
    let bak_path = rotate_bak_path(path);
    warn!(
        error,
        path = %path.display(),
        bak = %bak_path.display(),
        "Corrupt store file, moving to .bak and starting empty",
    );
    fs::rename(path, &bak_path)?;
    Ok(())
}

fn save(path: &Path, entries: &BTreeMap<String, StoredValue>) -> Result<(), StoreError> {
    if entries.is_empty() {
        return match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        };
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, entries)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

/// File name for a namespace. Bytes outside `[A-Za-z0-9_.-]` are
/// percent-encoded so category ids cannot escape the directory.
pub(crate) fn file_name(namespace: &str) -> String {
    let mut name = String::with_capacity(namespace.len() + 5);
    for byte in namespace.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => name.push(byte as char),
            b'.' if !name.is_empty() => name.push('.'),
            _ => name.push_str(&format!("%{byte:02X}")),
        }
    }
    name.push_str(".json");
    name
}

/// Opens [`FileStore`]s under one directory, one shared handle per namespace.
#[derive(Clone)]
pub struct FileBackend {
    dir: PathBuf,
    open: Arc<Mutex<HashMap<String, FileStore>>>,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            open: Arc::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.open.lock().len()
    }
}

impl StoreBackend for FileBackend {
    type Store = FileStore;

    /// Namespaces nobody holds are dropped from the cache first; their
    /// state is already on disk and reloads on the next open.
    fn open(&self, namespace: &str) -> Result<FileStore, StoreError> {
        let mut open = self.open.lock();
        open.retain(|_, store| store.is_shared());
        if let Some(store) = open.get(namespace) {
            return Ok(store.clone());
        }
        let store = FileStore::open(&self.dir.join(file_name(namespace)))?;
        open.insert(namespace.to_string(), store.clone());
        Ok(store)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
