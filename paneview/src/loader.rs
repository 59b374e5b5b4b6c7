use alloc::vec::Vec;

use crate::key::ListKey;
use crate::{Edge, LoadOutcome, LoadRequest, LoaderOptions, ViewportWindow};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingLoad {
    requested_at_ms: u64,
    known: usize,
}

/// Single-flight gate for one edge.
#[derive(Clone, Copy, Debug, Default)]
struct Gate {
    pending: Option<PendingLoad>,
    // Set by `mark_exhausted`; cleared as soon as the sequence grows.
    exhausted: bool,
}

/// Maintains a contiguous, page-granular window over an ordered id sequence and asks the data
/// source for more ids when the window reaches the end of what is known.
///
/// The loader owns two pieces of state across passes: how many pages are materialized and where
/// the window starts. The start is re-anchored by id on every `compute_window`, so a wholesale
/// reorder of the sequence keeps the same items in view instead of the same indexes.
///
/// Each edge has a single-flight gate: while a request for an edge is in flight, further
/// triggers on that edge report [`LoadOutcome::Pending`]. The gate re-arms when the sequence
/// grows past the size it had at request time, on [`WindowedLoader::settle`], on
/// [`WindowedLoader::mark_exhausted`], or after `settle_timeout_ms` (see
/// [`WindowedLoader::tick`]).
#[derive(Clone, Debug)]
pub struct WindowedLoader<K> {
    options: LoaderOptions<K>,
    pages: usize,
    offset: usize,
    anchor: Option<K>,
    order: Vec<K>,
    total_hint: Option<usize>,
    gates: [Gate; 2],
    window: ViewportWindow<K>,
}

impl<K: ListKey> WindowedLoader<K> {
    pub fn new(options: LoaderOptions<K>) -> Self {
        vdebug!(
            page_size = options.page_size,
            max_pages = ?options.max_pages,
            "WindowedLoader::new"
        );
        Self {
            options,
            pages: 1,
            offset: 0,
            anchor: None,
            order: Vec::new(),
            total_hint: None,
            gates: [Gate::default(); 2],
            window: ViewportWindow::empty(),
        }
    }

    pub fn options(&self) -> &LoaderOptions<K> {
        &self.options
    }

    /// Replaces the options. The window is not recomputed until the next `compute_window`.
    pub fn set_options(&mut self, options: LoaderOptions<K>) {
        self.options = options;
        if let Some(max) = self.options.max_pages {
            self.pages = self.pages.min(max.max(1));
        }
    }

    pub fn page_size(&self) -> usize {
        self.options.page()
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    fn capacity(&self) -> usize {
        self.pages.saturating_mul(self.options.page())
    }

    /// Materialized id count, clamped to the known sequence.
    pub fn loaded_count(&self) -> usize {
        self.capacity().min(self.order.len())
    }

    pub fn total_hint(&self) -> Option<usize> {
        self.total_hint
    }

    /// The window from the last `compute_window`.
    pub fn window(&self) -> &ViewportWindow<K> {
        &self.window
    }

    pub fn is_pending(&self, edge: Edge) -> bool {
        self.gates[edge.slot()].pending.is_some()
    }

    /// `true` when the window can neither grow toward `edge` over known ids nor request more.
    pub fn is_exhausted(&self, edge: Edge) -> bool {
        let room = match edge {
            Edge::Start => self.offset > 0,
            Edge::End => self.offset.saturating_add(self.capacity()) < self.order.len(),
        };
        !room && !self.can_load(edge)
    }

    /// Recomputes the window over a fresh snapshot of the full order.
    pub fn compute_window(
        &mut self,
        full_order: &[K],
        total_hint: Option<usize>,
    ) -> &ViewportWindow<K> {
        let len = full_order.len();
        let prev_len = self.order.len();

        if len > prev_len {
            for gate in self.gates.iter_mut() {
                gate.exhausted = false;
                if gate.pending.is_some_and(|p| len > p.known) {
                    vtrace!(len, "WindowedLoader: load settled by growth");
                    gate.pending = None;
                }
            }
        }

        if self.offset > 0 {
            let anchored = self
                .anchor
                .as_ref()
                .and_then(|a| full_order.iter().position(|k| k == a));
            if let Some(i) = anchored {
                self.offset = i;
            }
        }
        // A capped window stays full wherever its anchor moved.
        self.offset = self.offset.min(len.saturating_sub(self.capacity()));

        let end = self.offset.saturating_add(self.capacity()).min(len);
        self.order.clear();
        self.order.extend_from_slice(full_order);
        self.total_hint = total_hint;
        self.anchor = full_order.get(self.offset).cloned();
        self.window = ViewportWindow {
            ids: full_order[self.offset..end].to_vec(),
            offset: self.offset,
            total: len,
        };

        vtrace!(
            len,
            offset = self.offset,
            window = self.window.len(),
            "WindowedLoader::compute_window"
        );
        &self.window
    }

    /// The "near edge" trigger.
    ///
    /// Grows the window by one page toward `edge` when the sequence already holds more ids
    /// there. Otherwise, when more ids may exist, dispatches a single load request for that
    /// edge. The returned window is only updated by the next `compute_window`.
    pub fn request_more(&mut self, edge: Edge, now_ms: u64) -> LoadOutcome {
        self.tick(now_ms);

        let known = self.order.len();
        let page = self.options.page();
        let at_max = self.options.max_pages.is_some_and(|m| self.pages >= m);

        let outcome = match edge {
            Edge::End => {
                let window_end = self.offset.saturating_add(self.capacity()).min(known);
                if window_end < known {
                    if at_max {
                        // Slide, keeping the window full.
                        let last_start = known.saturating_sub(self.capacity());
                        self.offset = (self.offset + page).min(last_start);
                    } else {
                        self.pages += 1;
                    }
                    LoadOutcome::Grew
                } else {
                    self.dispatch(edge, now_ms)
                }
            }
            Edge::Start => {
                if self.offset > 0 {
                    self.offset -= page.min(self.offset);
                    if !at_max {
                        self.pages += 1;
                    }
                    LoadOutcome::Grew
                } else {
                    self.dispatch(edge, now_ms)
                }
            }
        };

        self.anchor = self.order.get(self.offset).cloned();
        vtrace!(
            edge = ?edge,
            outcome = ?outcome,
            pages = self.pages,
            offset = self.offset,
            "WindowedLoader::request_more"
        );
        outcome
    }

    fn can_load(&self, edge: Edge) -> bool {
        if self.gates[edge.slot()].exhausted {
            return false;
        }
        if edge == Edge::Start && !self.options.load_backwards {
            return false;
        }
        match self.total_hint {
            Some(total) => self.order.len() < total,
            None => true,
        }
    }

    fn dispatch(&mut self, edge: Edge, now_ms: u64) -> LoadOutcome {
        if !self.can_load(edge) {
            return LoadOutcome::Exhausted;
        }
        let known = self.order.len();
        let gate = &mut self.gates[edge.slot()];
        if gate.pending.is_some() {
            return LoadOutcome::Pending;
        }
        gate.pending = Some(PendingLoad {
            requested_at_ms: now_ms,
            known,
        });

        let request = LoadRequest {
            edge,
            known,
            cursor: match edge {
                Edge::Start => self.order.first().cloned(),
                Edge::End => self.order.last().cloned(),
            },
        };
        vdebug!(edge = ?edge, known, now_ms, "WindowedLoader: load requested");
        match &self.options.on_load_more {
            Some(cb) => cb(&request),
            None => {
                vwarn!("WindowedLoader: no on_load_more callback");
            }
        }
        LoadOutcome::Requested
    }

    /// Converts a scroll position into an edge trigger.
    ///
    /// The end edge is tried first; when it is exhausted and the viewport is also near the
    /// start, the start edge is triggered instead. Returns `None` when the viewport is not
    /// within `sensitive_area` of either window edge.
    pub fn on_scroll(
        &mut self,
        scroll_offset: u64,
        viewport_extent: u32,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        let extent = self.options.item_extent as u64;
        let sensitive = self.options.sensitive_area as u64;
        let top = self.window.offset as u64 * extent;
        let bottom = self.window.end() as u64 * extent;
        let viewport_end = scroll_offset.saturating_add(viewport_extent as u64);

        let mut end = None;
        if viewport_end.saturating_add(sensitive) >= bottom {
            let outcome = self.request_more(Edge::End, now_ms);
            if outcome != LoadOutcome::Exhausted {
                return Some(outcome);
            }
            end = Some(outcome);
        }
        // An exhausted end falls through to the start edge.
        if (self.window.offset > 0 || self.options.load_backwards)
            && scroll_offset <= top.saturating_add(sensitive)
        {
            return Some(self.request_more(Edge::Start, now_ms));
        }
        end
    }

    /// Explicit load-completion signal for `edge` (success or failure).
    pub fn settle(&mut self, edge: Edge) {
        self.gates[edge.slot()].pending = None;
    }

    /// The data source reported that nothing more exists on `edge`.
    ///
    /// Requests on that edge stop until the sequence grows.
    pub fn mark_exhausted(&mut self, edge: Edge) {
        vdebug!(edge = ?edge, "WindowedLoader::mark_exhausted");
        let gate = &mut self.gates[edge.slot()];
        gate.pending = None;
        gate.exhausted = true;
    }

    /// Applies the settle timeout. Returns `true` if a stuck edge was re-armed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(timeout) = self.options.settle_timeout_ms else {
            return false;
        };
        let mut rearmed = false;
        for gate in self.gates.iter_mut() {
            let Some(pending) = gate.pending else {
                continue;
            };
            if now_ms.saturating_sub(pending.requested_at_ms) >= timeout {
                vwarn!(
                    requested_at_ms = pending.requested_at_ms,
                    now_ms,
                    "WindowedLoader: load never settled, re-arming"
                );
                gate.pending = None;
                rearmed = true;
            }
        }
        rearmed
    }

    /// Back to a single page at the top; pending requests are forgotten.
    pub fn reset(&mut self) {
        self.pages = 1;
        self.offset = 0;
        self.anchor = None;
        self.gates = [Gate::default(); 2];
        self.window = ViewportWindow {
            ids: self.order.iter().take(self.options.page()).cloned().collect(),
            offset: 0,
            total: self.order.len(),
        };
    }
}
