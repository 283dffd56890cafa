//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use crate::bed::{BedId, BedState};
use thiserror::Error;

/// The primary error type for the bed lifecycle library.
/// 床位生命周期库的主要错误类型。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The referenced bed does not exist.
    /// 引用的床位不存在。
    #[error("bed {0} not found")]
    NotFound(BedId),

    /// The bed's current state does not satisfy the guard of the requested
    /// transition. The message is the human-readable reason.
    ///
    /// 床位当前状态不满足请求迁移的守卫条件。消息为可读的原因。
    #[error("{reason}")]
    InvalidTransition {
        /// Label of the rejected transition (`assign`, `discharge`, `clean`).
        transition: &'static str,
        /// State observed under the lock.
        state: BedState,
        reason: &'static str,
    },

    /// A record failed validation: a blank bed number, or a mutation that
    /// would break the occupancy invariant.
    ///
    /// 记录校验失败：床号为空，或变更将破坏占用不变式。
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Another bed already carries this bed number.
    /// 已有其他床位使用该床号。
    #[error("bed number {0:?} is already taken")]
    DuplicateBedNumber(String),

    /// A state label could not be parsed.
    /// 无法解析状态标签。
    #[error("unknown bed state {0:?}")]
    UnknownState(String),

    /// The underlying store failed while locking, reading or committing.
    /// 底层存储在加锁、读取或提交时失败。
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl Error {
    /// Whether the error is caused by the request rather than the system.
    ///
    /// A request layer maps these to a client-facing status; the caller must
    /// re-query state before trying again. `Persistence` is the only server-side
    /// failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Persistence(_))
    }
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;
