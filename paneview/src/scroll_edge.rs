/// Fixed throttle interval for scroll-edge recomputation.
pub const SCROLL_EDGE_THROTTLE_MS: u64 = 200;

/// Reports whether a sentinel at the very top of scrollable content is inside the viewport.
///
/// Samples are throttled: the first sample after a quiet interval applies immediately, later
/// ones within [`SCROLL_EDGE_THROTTLE_MS`] are held and applied by [`ScrollEdgeObserver::tick`]
/// (only the latest held sample counts). The observer never touches the scroll position.
#[derive(Clone, Debug)]
pub struct ScrollEdgeObserver {
    sentinel_extent: u32,
    intersecting: bool,
    last_applied_ms: Option<u64>,
    held: Option<u64>,
}

impl ScrollEdgeObserver {
    /// `sentinel_extent` is the sentinel's size in the scroll axis (clamped to at least 1).
    pub fn new(sentinel_extent: u32) -> Self {
        Self {
            sentinel_extent: sentinel_extent.max(1),
            intersecting: true,
            last_applied_ms: None,
            held: None,
        }
    }

    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    /// The "scrolled" visual state: content is scrolled past its top sentinel.
    pub fn is_scrolled(&self) -> bool {
        !self.intersecting
    }

    pub fn has_held_sample(&self) -> bool {
        self.held.is_some()
    }

    fn ready(&self, now_ms: u64) -> bool {
        match self.last_applied_ms {
            Some(last) => now_ms.saturating_sub(last) >= SCROLL_EDGE_THROTTLE_MS,
            None => true,
        }
    }

    fn apply(&mut self, scroll_offset: u64, now_ms: u64) -> bool {
        let intersecting = scroll_offset < self.sentinel_extent as u64;
        self.last_applied_ms = Some(now_ms);
        self.held = None;
        if intersecting == self.intersecting {
            return false;
        }
        vtrace!(intersecting, scroll_offset, "ScrollEdgeObserver: edge changed");
        self.intersecting = intersecting;
        true
    }

    /// Feeds a scroll sample. Returns `true` if the reported state changed.
    pub fn observe(&mut self, scroll_offset: u64, now_ms: u64) -> bool {
        if self.ready(now_ms) {
            return self.apply(scroll_offset, now_ms);
        }
        self.held = Some(scroll_offset);
        false
    }

    /// Applies a held sample once the throttle interval has elapsed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.held {
            Some(offset) if self.ready(now_ms) => self.apply(offset, now_ms),
            _ => false,
        }
    }

    /// Back to "at top" with no throttle history, e.g. when the panel switches containers.
    pub fn reset(&mut self) {
        self.intersecting = true;
        self.last_applied_ms = None;
        self.held = None;
    }
}
