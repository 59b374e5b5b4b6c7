use paneview::{
    Edge, ListKey, LoadOutcome, LoaderOptions, OrderDiff, OrderDiffOptions, OrderDiffResult,
    ScrollEdgeObserver, ViewportWindow, WindowedLoader,
};

/// Which order the transition tags are computed over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffScope {
    /// Only the rendered window; ids entering through window growth count as added.
    #[default]
    Window,
    /// The full order, regardless of what is rendered.
    FullOrder,
}

/// What the list body should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListStatus {
    /// Nothing known yet and more may arrive (a spinner).
    Loading,
    /// Nothing known and nothing more to load (an empty state).
    Empty,
    Ready,
}

/// One render pass: what to draw and how to animate it.
#[derive(Debug)]
pub struct ListFrame<'a, K> {
    pub window: &'a ViewportWindow<K>,
    pub diff: &'a OrderDiffResult<K>,
    pub is_scrolled: bool,
    pub status: ListStatus,
}

/// A framework-neutral controller for an animated, incrementally loaded list.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `render(full_order, total_hint)` whenever the store publishes a new order
/// - `on_scroll` when the UI reports a scroll offset change
/// - `tick(now_ms)` each frame/timer tick (scroll-edge throttle, load timeout)
/// - `settle` / `mark_exhausted` when the data source reports a load result
#[derive(Clone, Debug)]
pub struct ListController<K> {
    loader: WindowedLoader<K>,
    diff: OrderDiff<K>,
    scroll_edge: ScrollEdgeObserver,
    scope: DiffScope,
}

impl<K: ListKey> ListController<K> {
    pub fn new(loader_options: LoaderOptions<K>, diff_options: OrderDiffOptions) -> Self {
        let sentinel = loader_options.item_extent;
        Self {
            loader: WindowedLoader::new(loader_options),
            diff: OrderDiff::new(diff_options),
            scroll_edge: ScrollEdgeObserver::new(sentinel),
            scope: DiffScope::Window,
        }
    }

    pub fn with_scope(mut self, scope: DiffScope) -> Self {
        self.scope = scope;
        self
    }

    /// Overrides the top sentinel size (defaults to one item).
    pub fn with_sentinel_extent(mut self, sentinel_extent: u32) -> Self {
        self.scroll_edge = ScrollEdgeObserver::new(sentinel_extent);
        self
    }

    pub fn scope(&self) -> DiffScope {
        self.scope
    }

    pub fn loader(&self) -> &WindowedLoader<K> {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut WindowedLoader<K> {
        &mut self.loader
    }

    pub fn order_diff(&self) -> &OrderDiff<K> {
        &self.diff
    }

    pub fn order_diff_mut(&mut self) -> &mut OrderDiff<K> {
        &mut self.diff
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll_edge.is_scrolled()
    }

    /// Window, then tags. Rendering the same order twice yields the same frame.
    pub fn render(&mut self, full_order: &[K], total_hint: Option<usize>) -> ListFrame<'_, K> {
        self.loader.compute_window(full_order, total_hint);
        let status = if !self.loader.window().is_empty() {
            ListStatus::Ready
        } else if self.loader.is_exhausted(Edge::End) {
            ListStatus::Empty
        } else {
            ListStatus::Loading
        };

        let window = self.loader.window();
        let diff = match self.scope {
            DiffScope::Window => self.diff.update(&window.ids),
            DiffScope::FullOrder => self.diff.update(full_order),
        };
        ListFrame {
            window,
            diff,
            is_scrolled: self.scroll_edge.is_scrolled(),
            status,
        }
    }

    /// Feeds a scroll sample to the edge triggers and the scroll-edge observer.
    pub fn on_scroll(
        &mut self,
        scroll_offset: u64,
        viewport_extent: u32,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        self.scroll_edge.observe(scroll_offset, now_ms);
        self.loader.on_scroll(scroll_offset, viewport_extent, now_ms)
    }

    /// Explicit "near edge" trigger, e.g. from a sentinel observer.
    pub fn request_more(&mut self, edge: Edge, now_ms: u64) -> LoadOutcome {
        self.loader.request_more(edge, now_ms)
    }

    /// Returns `true` if anything observable changed (scroll-edge state or a re-armed edge).
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let edge_changed = self.scroll_edge.tick(now_ms);
        let rearmed = self.loader.tick(now_ms);
        edge_changed || rearmed
    }

    pub fn settle(&mut self, edge: Edge) {
        self.loader.settle(edge);
    }

    pub fn mark_exhausted(&mut self, edge: Edge) {
        self.loader.mark_exhausted(edge);
    }

    /// Exit animations finished for these ids.
    pub fn complete_removals<'a>(&mut self, ids: impl IntoIterator<Item = &'a K>)
    where
        K: 'a,
    {
        for id in ids {
            self.diff.complete_removal(id);
        }
    }

    /// Back to the first page at the top, with no diff history.
    pub fn reset(&mut self) {
        vdebug!("ListController::reset");
        self.loader.reset();
        self.diff.reset();
        self.scroll_edge.reset();
    }
}
