//! 内存床位存储
//! In-memory bed store
//!
//! 职责：
//! - 已提交记录的存储和查询
//! - 床号唯一索引维护
//! - 每床位排他锁管理
//!
//! Committed rows live behind one `RwLock` that is only held for the short
//! read or write of a row. Transition locks are separate per-bed mutexes kept
//! in a `DashMap`, so readers never wait for an in-progress transition and
//! transitions on different beds never wait for each other.

use super::BedStore;
use crate::bed::{Bed, BedId, BedState};
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, trace};

/// Committed rows plus the unique bed-number index.
/// 已提交的记录以及床号唯一索引。
#[derive(Debug, Default)]
struct Tables {
    /// 主存储：床位ID -> 记录
    /// Main storage: bed id -> record
    rows: HashMap<BedId, Bed>,
    /// 床号索引：床号 -> 床位ID，按床号排序
    /// Bed-number index: bed number -> bed id, sorted by bed number
    by_number: BTreeMap<String, BedId>,
}

/// An exclusive hold on one bed in a [`MemoryBedStore`].
///
/// 对 [`MemoryBedStore`] 中某个床位的排他持有。
#[derive(Debug)]
pub struct MemoryRowLock {
    id: BedId,
    _guard: OwnedMutexGuard<()>,
}

impl MemoryRowLock {
    pub fn id(&self) -> BedId {
        self.id
    }
}

/// In-memory implementation of [`BedStore`].
///
/// 基于内存的 [`BedStore`] 实现。
#[derive(Debug)]
pub struct MemoryBedStore {
    tables: RwLock<Tables>,
    row_locks: DashMap<BedId, Arc<Mutex<()>>>,
    next_id: AtomicU64,
}

impl MemoryBedStore {
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            row_locks: DashMap::with_capacity(config.initial_capacity),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of beds in the store.
    pub async fn len(&self) -> usize {
        self.tables.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn row_lock(&self, id: BedId) -> Result<Arc<Mutex<()>>> {
        self.row_locks
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(Error::NotFound(id))
    }
}

impl Default for MemoryBedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BedStore for MemoryBedStore {
    type RowLock = MemoryRowLock;

    async fn lock_and_read(&self, id: BedId) -> Result<(MemoryRowLock, Bed)> {
        let mutex = self.row_lock(id)?;
        trace!(bed = %id, "等待床位锁 | Waiting for bed lock");
        let guard = mutex.lock_owned().await;
        let lock = MemoryRowLock { id, _guard: guard };

        let bed = self
            .tables
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(id))?;
        debug!(bed = %id, state = %bed.state(), "已获取床位锁 | Bed lock acquired");
        Ok((lock, bed))
    }

    async fn commit(&self, lock: MemoryRowLock, bed: Bed) -> Result<Bed> {
        if lock.id != bed.id() {
            return Err(Error::Persistence(format!(
                "lock on bed {} cannot commit bed {}",
                lock.id,
                bed.id()
            )));
        }

        let mut tables = self.tables.write().await;
        let row = tables
            .rows
            .get_mut(&lock.id)
            .ok_or(Error::NotFound(lock.id))?;
        if row.bed_number() != bed.bed_number() {
            return Err(Error::Persistence(format!(
                "bed number of bed {} is immutable",
                lock.id
            )));
        }
        *row = bed.clone();
        drop(tables);

        trace!(bed = %lock.id, "床位记录已提交 | Bed record committed");
        drop(lock);
        Ok(bed)
    }

    async fn abort(&self, lock: MemoryRowLock) {
        trace!(bed = %lock.id, "床位锁已释放（未写入） | Bed lock released without write");
        drop(lock);
    }

    async fn insert(&self, bed_number: &str, now: DateTime<Utc>) -> Result<Bed> {
        let bed_number = Bed::normalize_bed_number(bed_number)?;
        let mut tables = self.tables.write().await;
        if tables.by_number.contains_key(bed_number) {
            return Err(Error::DuplicateBedNumber(bed_number.to_string()));
        }

        let id = BedId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let bed = Bed::provisioned(id, bed_number, now)?;
        tables.by_number.insert(bed.bed_number().to_string(), id);
        tables.rows.insert(id, bed.clone());
        self.row_locks.insert(id, Arc::new(Mutex::new(())));

        debug!(bed = %id, number = bed.bed_number(), "新床位已开通 | Bed provisioned");
        Ok(bed)
    }

    async fn get(&self, id: BedId) -> Result<Bed> {
        self.tables
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }

    async fn page_after(&self, after: Option<&str>, limit: usize) -> Result<Vec<Bed>> {
        let lower = match after {
            Some(number) => Bound::Excluded(number),
            None => Bound::Unbounded,
        };
        let tables = self.tables.read().await;
        Ok(tables
            .by_number
            .range::<str, _>((lower, Bound::Unbounded))
            .take(limit)
            .filter_map(|(_, id)| tables.rows.get(id).cloned())
            .collect())
    }

    async fn in_state(&self, state: BedState) -> Result<Vec<Bed>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_number
            .values()
            .filter_map(|id| tables.rows.get(id))
            .filter(|bed| bed.state() == state)
            .cloned()
            .collect())
    }
}
