//! 测试辅助工具模块
//! Test utilities module

#![cfg(test)]

use crate::bed::{Bed, BedId, BedState};
use crate::error::{Error, Result};
use crate::store::{BedStore, MemoryBedStore, memory::MemoryRowLock};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A `MemoryBedStore` wrapper that can be told to fail.
///
/// Lets tests drive the `Persistence` error paths and check that a failed
/// operation leaves the record untouched and the lock released.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryBedStore,
    fail_lock: AtomicBool,
    fail_commit: AtomicBool,
    fail_page: AtomicBool,
    aborts: AtomicUsize,
    pages: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_lock(&self, fail: bool) {
        self.fail_lock.store(fail, Ordering::SeqCst);
    }

    pub fn fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn fail_page(&self, fail: bool) {
        self.fail_page.store(fail, Ordering::SeqCst);
    }

    /// How many times `abort` was called.
    pub fn aborts(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }

    /// How many pages were read.
    pub fn pages(&self) -> usize {
        self.pages.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BedStore for FlakyStore {
    type RowLock = MemoryRowLock;

    async fn lock_and_read(&self, id: BedId) -> Result<(MemoryRowLock, Bed)> {
        if self.fail_lock.load(Ordering::SeqCst) {
            return Err(Error::Persistence("connection lost while locking".into()));
        }
        self.inner.lock_and_read(id).await
    }

    async fn commit(&self, lock: MemoryRowLock, bed: Bed) -> Result<Bed> {
        if self.fail_commit.load(Ordering::SeqCst) {
            drop(lock);
            return Err(Error::Persistence("connection lost during commit".into()));
        }
        self.inner.commit(lock, bed).await
    }

    async fn abort(&self, lock: MemoryRowLock) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
        self.inner.abort(lock).await
    }

    async fn insert(&self, bed_number: &str, now: DateTime<Utc>) -> Result<Bed> {
        self.inner.insert(bed_number, now).await
    }

    async fn get(&self, id: BedId) -> Result<Bed> {
        self.inner.get(id).await
    }

    async fn page_after(&self, after: Option<&str>, limit: usize) -> Result<Vec<Bed>> {
        if self.fail_page.load(Ordering::SeqCst) {
            return Err(Error::Persistence("connection lost while paging".into()));
        }
        self.pages.fetch_add(1, Ordering::SeqCst);
        self.inner.page_after(after, limit).await
    }

    async fn in_state(&self, state: BedState) -> Result<Vec<Bed>> {
        self.inner.in_state(state).await
    }
}
