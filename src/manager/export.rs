//! 床位导出游标
//! Bed export cursor
//!
//! Pages through the store in bed-number order, holding at most one page in
//! memory. Each page is read after the last bed number seen, so beds
//! provisioned during an export show up if they sort after the cursor.

use crate::{
    bed::Bed,
    error::{Error, Result},
    store::BedStore,
};
use futures::Stream;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// A lazy, memory-bounded iteration over all beds in bed-number order.
///
/// 按床号顺序、内存受限的惰性床位遍历。
#[derive(Debug)]
pub struct BedExport<S> {
    store: Arc<S>,
    page_size: usize,
    /// 当前页中尚未产出的床位
    /// Beds of the current page not yet yielded
    buffer: VecDeque<Bed>,
    /// 最后读取的床号
    /// Bed number of the last bed fetched
    cursor: Option<String>,
    exhausted: bool,
}

impl<S: BedStore> BedExport<S> {
    pub(crate) fn new(store: Arc<S>, page_size: usize) -> Self {
        Self {
            store,
            page_size,
            buffer: VecDeque::new(),
            cursor: None,
            exhausted: false,
        }
    }

    /// Yields the next bed, fetching a new page when the current one is used up.
    /// Returns `Ok(None)` once every bed has been yielded.
    ///
    /// 产出下一个床位，当前页用尽时读取新页。
    pub async fn next(&mut self) -> Result<Option<Bed>> {
        if self.buffer.is_empty() && !self.exhausted {
            self.fetch_page().await?;
        }
        Ok(self.buffer.pop_front())
    }

    /// Adapts the cursor into a `Stream` for a streaming consumer.
    ///
    /// 将游标适配为 `Stream`，供流式消费者使用。
    pub fn into_stream(self) -> impl Stream<Item = Result<Bed>> + Send {
        futures::stream::try_unfold(self, |mut export| async move {
            Ok::<_, Error>(export.next().await?.map(|bed| (bed, export)))
        })
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let page = self
            .store
            .page_after(self.cursor.as_deref(), self.page_size)
            .await?;
        debug!(
            after = self.cursor.as_deref().unwrap_or("<start>"),
            fetched = page.len(),
            "读取导出页 | Fetched export page"
        );

        if page.len() < self.page_size {
            self.exhausted = true;
        }
        if let Some(last) = page.last() {
            self.cursor = Some(last.bed_number().to_string());
        }
        self.buffer.extend(page);
        Ok(())
    }
}
