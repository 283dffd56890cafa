//! Traits for abstracting over the bed record store.
//! 床位记录存储的抽象。
//!
//! The store owns the committed records and the per-bed exclusive locks. The
//! manager never caches records; every transition goes through
//! [`BedStore::lock_and_read`] followed by [`BedStore::commit`] or
//! [`BedStore::abort`].
use crate::bed::{Bed, BedId, BedState};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod memory;

pub use memory::MemoryBedStore;

/// A persisted set of beds with row-level exclusive locking.
///
/// Implementations must guarantee:
/// - at most one `RowLock` exists per bed id at a time; a second
///   `lock_and_read` for the same id waits until the first lock is released;
/// - locks on different ids never wait on each other;
/// - `commit` writes the whole record or nothing;
/// - dropping a `RowLock` releases it, so every exit path unlocks.
///
/// 带行级排他锁的持久化床位集合。
#[async_trait]
pub trait BedStore: Send + Sync + 'static {
    /// Exclusive hold on one bed record. Released when dropped.
    /// 单个床位记录的排他持有，释放于 drop。
    type RowLock: Send + 'static;

    /// Locks the bed's record and reads its committed state under the lock.
    /// 锁定床位记录并在锁内读取其已提交状态。
    async fn lock_and_read(&self, id: BedId) -> Result<(Self::RowLock, Bed)>;

    /// Writes `bed` as the new committed record and releases the lock.
    /// 将 `bed` 写入为新的已提交记录并释放锁。
    async fn commit(&self, lock: Self::RowLock, bed: Bed) -> Result<Bed>;

    /// Releases the lock without writing.
    /// 不写入直接释放锁。
    async fn abort(&self, lock: Self::RowLock);

    /// Creates a new `Available` bed with a store-assigned id.
    async fn insert(&self, bed_number: &str, now: DateTime<Utc>) -> Result<Bed>;

    /// Reads the committed record without locking.
    async fn get(&self, id: BedId) -> Result<Bed>;

    /// Up to `limit` beds whose bed number sorts strictly after `after`
    /// (from the beginning when `None`), in bed-number order.
    async fn page_after(&self, after: Option<&str>, limit: usize) -> Result<Vec<Bed>>;

    /// All beds in `state`, in bed-number order.
    async fn in_state(&self, state: BedState) -> Result<Vec<Bed>>;
}
