use alloc::vec::Vec;

/// How an item's presence or position changed between two orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionTag {
    Unchanged,
    Added,
    /// Gone from the new order; kept for one animation cycle so the renderer can play an exit.
    RemovedPending,
    MovedUp,
    MovedDown,
}

impl TransitionTag {
    /// `true` for tags that ask the renderer to animate the item.
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// An end of the viewport window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// Toward index 0 (top of a vertical list).
    Start,
    /// Toward the last index.
    End,
}

impl Edge {
    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Lifecycle phase of a slide-in panel (or ribbon).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanelPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelPhase {
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// `true` while the panel is (or is becoming) visible.
    pub fn is_shown(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

/// A contiguous slice of the full ordered id sequence, materialized for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportWindow<K> {
    pub ids: Vec<K>,
    /// Index of `ids[0]` in the full sequence.
    pub offset: usize,
    /// Length of the full sequence the window was cut from.
    pub total: usize,
}

impl<K> ViewportWindow<K> {
    pub fn empty() -> Self {
        Self {
            ids: Vec::new(),
            offset: 0,
            total: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Exclusive end index of the window in the full sequence.
    pub fn end(&self) -> usize {
        self.offset + self.ids.len()
    }

    pub fn touches_start(&self) -> bool {
        self.offset == 0
    }

    pub fn touches_end(&self) -> bool {
        self.end() >= self.total
    }

    /// Absolute start of the `i`-th window item for fixed-height rows.
    pub fn item_start(&self, i: usize, extent: u32) -> u64 {
        (self.offset + i) as u64 * extent as u64
    }

    /// Height of the whole (not only materialized) list for fixed-height rows.
    pub fn total_extent(&self, extent: u32) -> u64 {
        self.total as u64 * extent as u64
    }

    /// Pairs each id with its detail record, or marks it pending when the record hasn't
    /// arrived yet.
    pub fn slots<'a, T: 'a>(
        &'a self,
        mut lookup: impl FnMut(&K) -> Option<&'a T> + 'a,
    ) -> impl Iterator<Item = ItemSlot<'a, K, T>> + 'a {
        self.ids.iter().map(move |id| match lookup(id) {
            Some(item) => ItemSlot::Ready(item),
            None => ItemSlot::Pending(id),
        })
    }
}

impl<K> Default for ViewportWindow<K> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A window entry resolved against the detail store.
#[derive(Debug, PartialEq, Eq)]
pub enum ItemSlot<'a, K, T> {
    Ready(&'a T),
    /// Detail record not loaded yet; render a placeholder.
    Pending(&'a K),
}

/// A "load more items" request handed to the data source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadRequest<K> {
    pub edge: Edge,
    /// Number of ids known when the request was made.
    pub known: usize,
    /// The outermost known id on `edge`; the source loads beyond it.
    pub cursor: Option<K>,
}

/// Result of a near-edge trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadOutcome {
    /// The window grew (or slid) by one page over ids that were already known.
    Grew,
    /// A load request was dispatched.
    Requested,
    /// A request for this edge is already in flight.
    Pending,
    /// Nothing more can be shown or loaded on this edge.
    Exhausted,
}
