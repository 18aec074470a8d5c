//! In-memory record stores for tests.
//!
//! Compiled for this crate's own tests and, through the `test-utils` feature,
//! for dependent crates' tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::errors::{DatabaseError, Result};
use crate::settings::{RecordStoreTrait, SettingRecord};

/// A `RecordStoreTrait` backed by a sorted map. Keys are listed in order.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<BTreeMap<String, String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Inserts a row directly, bypassing the write counter.
    pub fn put(&self, record: SettingRecord) {
        self.rows.write().unwrap().insert(record.key, record.value);
    }

    /// The stored text for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.rows.read().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successful `update_or_create` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every following `update_or_create` fail with a query error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl RecordStoreTrait for MemoryStore {
    fn find_by_key(&self, key: &str) -> Result<Option<SettingRecord>> {
        Ok(self.raw(key).map(|value| SettingRecord {
            key: key.to_string(),
            value,
        }))
    }

    fn update_or_create(&self, key: &str, value: &str) -> Result<SettingRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed("disk I/O error".to_string()).into());
        }
        let record = SettingRecord {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.put(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.rows.read().unwrap().keys().cloned().collect())
    }
}

/// A store whose every call fails as if the database were unreachable.
pub struct FailingStore;

impl FailingStore {
    fn unreachable<T>() -> Result<T> {
        Err(DatabaseError::ConnectionFailed("unable to open database file".to_string()).into())
    }
}

impl RecordStoreTrait for FailingStore {
    fn find_by_key(&self, _: &str) -> Result<Option<SettingRecord>> {
        Self::unreachable()
    }

    fn update_or_create(&self, _: &str, _: &str) -> Result<SettingRecord> {
        Self::unreachable()
    }

    fn keys(&self) -> Result<Vec<String>> {
        Self::unreachable()
    }
}
