//! 床位生命周期管理器
//! Bed lifecycle manager
//!
//! The entry point a request layer talks to. Every transition runs the same
//! protocol against the store: lock the bed, re-read it under the lock, check
//! the guard, apply the mutation, then commit (or abort on any failure).

pub mod export;

pub use export::BedExport;

use crate::{
    bed::{Bed, BedId, BedState, Transition},
    config::Config,
    error::Result,
    store::BedStore,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Executes guarded, lock-protected transitions on beds held by a [`BedStore`].
///
/// The manager keeps no state of its own beyond the store handle and its
/// configuration, so it is cheap to clone and share between request handlers.
///
/// 在 [`BedStore`] 中的床位上执行受守卫、受锁保护的迁移。
#[derive(Debug)]
pub struct BedManager<S> {
    store: Arc<S>,
    config: Arc<Config>,
}

impl<S> Clone for BedManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: BedStore> BedManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, Config::default())
    }

    pub fn with_config(store: Arc<S>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates a new bed in state `Available`.
    ///
    /// 开通一个处于 `Available` 状态的新床位。
    pub async fn provision(&self, bed_number: &str) -> Result<Bed> {
        let bed = self.store.insert(bed_number, Utc::now()).await?;
        info!(bed = %bed.id(), number = bed.bed_number(), "床位已开通 | Bed provisioned");
        Ok(bed)
    }

    /// Reads one bed's committed record.
    pub async fn bed(&self, id: BedId) -> Result<Bed> {
        self.store.get(id).await
    }

    /// All beds ordered by bed number.
    ///
    /// Reads page by page through the store with the configured export batch
    /// size, but collects everything; use [`export_all`](Self::export_all) for
    /// large wards.
    ///
    /// 按床号排序的所有床位。
    pub async fn list_beds(&self) -> Result<Vec<Bed>> {
        let mut export = self.export_all();
        let mut beds = Vec::new();
        while let Some(bed) = export.next().await? {
            beds.push(bed);
        }
        Ok(beds)
    }

    /// All beds currently in `state`, ordered by bed number.
    pub async fn beds_in_state(&self, state: BedState) -> Result<Vec<Bed>> {
        self.store.in_state(state).await
    }

    /// Moves an `Available` bed to `Occupied` with the given patient.
    ///
    /// Fails with `InvalidTransition("bed not available")` from any other
    /// state, and with `InvalidRecord` if either field is blank.
    ///
    /// 将 `Available` 床位分配给病人，迁移到 `Occupied`。
    pub async fn assign_patient(
        &self,
        id: BedId,
        patient_name: impl Into<String>,
        urgency_level: impl Into<String>,
    ) -> Result<Bed> {
        self.transition(id, Transition::assign(patient_name, urgency_level))
            .await
    }

    /// Moves an `Occupied` bed to `Maintenance`. Patient data is retained
    /// until the bed is cleaned.
    ///
    /// 病人出院，床位从 `Occupied` 迁移到 `Maintenance`。
    pub async fn discharge_patient(&self, id: BedId) -> Result<Bed> {
        self.transition(id, Transition::Discharge).await
    }

    /// Moves a `Maintenance` bed back to `Available`, clearing all occupancy
    /// fields.
    ///
    /// 清洁完成，床位从 `Maintenance` 回到 `Available`。
    pub async fn mark_cleaned(&self, id: BedId) -> Result<Bed> {
        self.transition(id, Transition::Clean).await
    }

    /// A lazy, bed-number ordered cursor over every bed.
    ///
    /// 按床号排序、惰性读取所有床位的游标。
    pub fn export_all(&self) -> BedExport<S> {
        BedExport::new(Arc::clone(&self.store), self.config.export.page_size())
    }

    async fn transition(&self, id: BedId, transition: Transition) -> Result<Bed> {
        let (lock, current) = self.store.lock_and_read(id).await?;

        let next = match transition.apply(&current, Utc::now()) {
            Ok(next) => next,
            Err(e) => {
                self.store.abort(lock).await;
                warn!(
                    bed = %id,
                    transition = transition.label(),
                    state = %current.state(),
                    error = %e,
                    "床位迁移被拒绝 | Bed transition rejected"
                );
                return Err(e);
            }
        };

        let committed = self.store.commit(lock, next).await.inspect_err(|e| {
            warn!(
                bed = %id,
                transition = transition.label(),
                error = %e,
                "床位迁移提交失败 | Bed transition commit failed"
            )
        })?;
        info!(
            bed = %id,
            transition = transition.label(),
            from = %current.state(),
            to = %committed.state(),
            "床位状态已迁移 | Bed transitioned"
        );
        Ok(committed)
    }
}
