#![deny(clippy::expect_used, clippy::unwrap_used)]

//! Hospital bed lifecycle tracking with lock-protected state transitions.
//! 带锁保护状态迁移的医院床位生命周期跟踪。
//!
//! A bed cycles `Available -> Occupied -> Maintenance -> Available`. Each
//! transition runs under an exclusive per-bed lock held by the [`store`], so
//! concurrent requests against the same bed are serialized while different
//! beds proceed in parallel.

pub mod bed;
pub mod config;
pub mod error;
pub mod manager;
pub mod store;

mod testing;

pub use bed::{Bed, BedId, BedState, Transition};
pub use config::Config;
pub use error::{Error, Result};
pub use manager::{BedExport, BedManager};
pub use store::{BedStore, MemoryBedStore};
