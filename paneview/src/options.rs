use alloc::sync::Arc;

use crate::LoadRequest;

/// A callback that asks the data source for more ids.
///
/// Fire-and-forget: the loader only learns about the result through later snapshots of the
/// ordered id sequence (or an explicit `settle`/`mark_exhausted`).
pub type LoadMoreCallback<K> = Arc<dyn Fn(&LoadRequest<K>) + Send + Sync>;

/// Default single-flight re-arm timeout.
pub const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 10_000;

/// Configuration for [`crate::WindowedLoader`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
pub struct LoaderOptions<K> {
    /// Ids per page. Clamped to at least 1.
    pub page_size: usize,
    /// Caps the window at this many pages; further triggers slide the window instead of
    /// growing it.
    pub max_pages: Option<usize>,
    /// Whether the data source can prepend ids (enables start-edge load requests).
    pub load_backwards: bool,
    /// Re-arms a pending edge after this long even if no completion signal arrived.
    ///
    /// `None` disables the fallback; the caller must then always `settle` or
    /// `mark_exhausted`, or the edge stays blocked.
    pub settle_timeout_ms: Option<u64>,
    /// Fixed size of one row in the scroll axis.
    pub item_extent: u32,
    /// Distance from a window edge (in scroll units) that counts as "near" in `on_scroll`.
    pub sensitive_area: u32,
    pub on_load_more: Option<LoadMoreCallback<K>>,
}

impl<K> Clone for LoaderOptions<K> {
    fn clone(&self) -> Self {
        Self {
            page_size: self.page_size,
            max_pages: self.max_pages,
            load_backwards: self.load_backwards,
            settle_timeout_ms: self.settle_timeout_ms,
            item_extent: self.item_extent,
            sensitive_area: self.sensitive_area,
            on_load_more: self.on_load_more.clone(),
        }
    }
}

impl<K> LoaderOptions<K> {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: None,
            load_backwards: false,
            settle_timeout_ms: Some(DEFAULT_SETTLE_TIMEOUT_MS),
            item_extent: 1,
            sensitive_area: 0,
            on_load_more: None,
        }
    }

    pub(crate) fn page(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages.map(|m| m.max(1));
        self
    }

    pub fn with_load_backwards(mut self, load_backwards: bool) -> Self {
        self.load_backwards = load_backwards;
        self
    }

    pub fn with_settle_timeout_ms(mut self, settle_timeout_ms: Option<u64>) -> Self {
        self.settle_timeout_ms = settle_timeout_ms;
        self
    }

    pub fn with_item_extent(mut self, item_extent: u32) -> Self {
        self.item_extent = item_extent;
        self
    }

    pub fn with_sensitive_area(mut self, sensitive_area: u32) -> Self {
        self.sensitive_area = sensitive_area;
        self
    }

    pub fn with_on_load_more(
        mut self,
        on_load_more: Option<impl Fn(&LoadRequest<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_load_more = on_load_more.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> core::fmt::Debug for LoaderOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("load_backwards", &self.load_backwards)
            .field("settle_timeout_ms", &self.settle_timeout_ms)
            .field("item_extent", &self.item_extent)
            .field("sensitive_area", &self.sensitive_area)
            .finish_non_exhaustive()
    }
}
