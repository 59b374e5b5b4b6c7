use alloc::vec::Vec;
use core::cmp;

use crate::TransitionTag;
use crate::key::{KeyMap, ListKey};

/// Configuration for [`OrderDiff`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderDiffOptions {
    /// Tag every id `Added` on the first computation of a list instance.
    ///
    /// Off by default: an initial bulk appearance usually should not animate.
    pub animate_initial: bool,
}

impl OrderDiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animate_initial(mut self, animate_initial: bool) -> Self {
        self.animate_initial = animate_initial;
        self
    }
}

/// Classification of one id plus the indexes it moved between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTransition {
    pub tag: TransitionTag,
    /// Index in the previous order (or, for a reappearing id, before it was removed).
    pub from: Option<usize>,
    /// Index in the current order. `None` for `RemovedPending`.
    pub to: Option<usize>,
}

impl ItemTransition {
    /// `from - to`: positive when the item moved up, negative when it moved down.
    pub fn index_delta(&self) -> isize {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from as isize - to as isize,
            _ => 0,
        }
    }
}

/// Per-id transitions of one diff computation.
#[derive(Clone, Debug)]
pub struct OrderDiffResult<K> {
    entries: KeyMap<K, ItemTransition>,
    removed: Vec<K>,
    generation: u64,
}

impl<K: ListKey> OrderDiffResult<K> {
    fn empty(generation: u64) -> Self {
        Self {
            entries: KeyMap::new(),
            removed: Vec::new(),
            generation,
        }
    }

    pub fn tag(&self, id: &K) -> Option<TransitionTag> {
        self.entries.get(id).map(|t| t.tag)
    }

    pub fn transition(&self, id: &K) -> Option<&ItemTransition> {
        self.entries.get(id)
    }

    /// See [`ItemTransition::index_delta`]. `0` for unknown ids.
    pub fn index_delta(&self, id: &K) -> isize {
        self.entries.get(id).map_or(0, ItemTransition::index_delta)
    }

    /// Ids waiting for their exit animation, in previous-order sequence.
    pub fn removed(&self) -> &[K] {
        &self.removed
    }

    /// Bumped on every computation that produced new tags. Repeating a diff of the same pair
    /// keeps the generation, so renderers keyed on it don't restart animations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_animations(&self) -> bool {
        self.entries.values().any(|t| t.tag.is_animated())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &ItemTransition)> {
        self.entries.iter()
    }
}

/// Detects additions, removals and moves between successive orders of a list.
///
/// The engine keeps the last order it saw (for [`OrderDiff::update`] and idempotent repeats)
/// and the ids still playing an exit animation. Everything else is recomputed per call.
#[derive(Clone, Debug)]
pub struct OrderDiff<K> {
    options: OrderDiffOptions,
    last_previous: Option<Vec<K>>,
    last_order: Option<Vec<K>>,
    // id -> index before removal
    pending: KeyMap<K, usize>,
    result: OrderDiffResult<K>,
}

impl<K: ListKey> Default for OrderDiff<K> {
    fn default() -> Self {
        Self::new(OrderDiffOptions::default())
    }
}

impl<K: ListKey> OrderDiff<K> {
    pub fn new(options: OrderDiffOptions) -> Self {
        Self {
            options,
            last_previous: None,
            last_order: None,
            pending: KeyMap::new(),
            result: OrderDiffResult::empty(0),
        }
    }

    pub fn options(&self) -> OrderDiffOptions {
        self.options
    }

    pub fn set_options(&mut self, options: OrderDiffOptions) {
        self.options = options;
    }

    /// The result of the last computation.
    pub fn result(&self) -> &OrderDiffResult<K> {
        &self.result
    }

    /// The last order the engine classified, if any.
    pub fn last_order(&self) -> Option<&[K]> {
        self.last_order.as_deref()
    }

    pub fn pending_removals(&self) -> usize {
        self.pending.len()
    }

    /// Classifies every id of `current` (and every id that left `previous`).
    pub fn diff(&mut self, previous: &[K], current: &[K]) -> &OrderDiffResult<K> {
        let repeat = match (&self.last_previous, &self.last_order) {
            (Some(p), Some(c)) => p.as_slice() == previous && c.as_slice() == current,
            _ => false,
        };
        if repeat {
            vtrace!(len = current.len(), "OrderDiff::diff repeat");
            return &self.result;
        }

        let initial = self.last_order.is_none() && previous.is_empty();
        let generation = self.result.generation.wrapping_add(1);
        let mut result = OrderDiffResult::empty(generation);

        let mut prev_index = KeyMap::new();
        for (i, id) in previous.iter().enumerate() {
            prev_index.entry(id.clone()).or_insert(i);
        }

        // Removals from the last cycle had their chance; only a reappearance keeps them.
        let stale = core::mem::take(&mut self.pending);

        for (to, id) in current.iter().enumerate() {
            if result.entries.contains_key(id) {
                // Keep the first occurrence; a well-formed order never repeats an id.
                vwarn!(index = to, "OrderDiff::diff: duplicate id in current order");
                continue;
            }

            let (tag, from) = if initial {
                let tag = if self.options.animate_initial {
                    TransitionTag::Added
                } else {
                    TransitionTag::Unchanged
                };
                (tag, None)
            } else if let Some(&from) = prev_index.get(id) {
                (classify(from, to), Some(from))
            } else if let Some(&from) = stale.get(id) {
                vdebug!(from, to, "OrderDiff::diff: pending removal reappeared");
                (classify(from, to), Some(from))
            } else {
                (TransitionTag::Added, None)
            };

            result.entries.insert(
                id.clone(),
                ItemTransition {
                    tag,
                    from,
                    to: Some(to),
                },
            );
        }

        for (from, id) in previous.iter().enumerate() {
            if result.entries.contains_key(id) {
                continue;
            }
            self.pending.insert(id.clone(), from);
            result.entries.insert(
                id.clone(),
                ItemTransition {
                    tag: TransitionTag::RemovedPending,
                    from: Some(from),
                    to: None,
                },
            );
            result.removed.push(id.clone());
        }

        vtrace!(
            previous = previous.len(),
            current = current.len(),
            removed = result.removed.len(),
            purged = stale.len(),
            generation,
            "OrderDiff::diff"
        );

        self.result = result;
        self.last_previous = Some(previous.to_vec());
        self.last_order = Some(current.to_vec());
        &self.result
    }

    /// Diffs `current` against the last order this engine saw.
    ///
    /// Calling this again with an unchanged order returns the previous result as is.
    pub fn update(&mut self, current: &[K]) -> &OrderDiffResult<K> {
        let previous = match &self.last_order {
            Some(last) if last.as_slice() == current => return &self.result,
            Some(last) => last.clone(),
            None => Vec::new(),
        };
        self.diff(&previous, current)
    }

    /// Purges an id whose exit animation finished. Returns `false` if it wasn't pending.
    pub fn complete_removal(&mut self, id: &K) -> bool {
        if self.pending.remove(id).is_none() {
            return false;
        }
        self.result.entries.remove(id);
        self.result.removed.retain(|r| r != id);
        true
    }

    /// Purges every pending removal (all exit animations finished).
    pub fn complete_all_removals(&mut self) {
        for id in self.result.removed.drain(..) {
            self.result.entries.remove(&id);
        }
        self.pending.clear();
    }

    /// Forgets all history; the next computation counts as a first paint again.
    pub fn reset(&mut self) {
        vdebug!("OrderDiff::reset");
        self.last_previous = None;
        self.last_order = None;
        self.pending.clear();
        self.result = OrderDiffResult::empty(self.result.generation);
    }
}

fn classify(from: usize, to: usize) -> TransitionTag {
    match to.cmp(&from) {
        cmp::Ordering::Equal => TransitionTag::Unchanged,
        cmp::Ordering::Less => TransitionTag::MovedUp,
        cmp::Ordering::Greater => TransitionTag::MovedDown,
    }
}
