//! 定义了床位管理器和存储的可配置参数。
//! Defines configurable parameters for the bed manager and its store.

/// A structure containing all configurable parameters.
///
/// 包含所有可配置参数的结构体。
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Export-related parameters.
    /// 导出相关参数。
    pub export: ExportConfig,

    /// In-memory store parameters.
    /// 内存存储相关参数。
    pub store: StoreConfig,
}

/// Export-related parameters.
///
/// 导出相关参数。
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// The number of beds fetched from the store per page while exporting.
    /// Bounds the memory held by an export cursor. Zero is treated as one.
    ///
    /// 导出时每页从存储中读取的床位数。限制导出游标占用的内存。零按一处理。
    pub batch_size: usize,
}

/// In-memory store parameters.
///
/// 内存存储相关参数。
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Initial capacity of the per-bed lock table.
    /// 每床位锁表的初始容量。
    pub initial_capacity: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
        }
    }
}

impl ExportConfig {
    /// The effective page size, never zero.
    pub(crate) fn page_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
