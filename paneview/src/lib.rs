//! A headless engine for animated, incrementally loaded list panels.
//!
//! For time-driven controllers (panel/ribbon animation coordination, gesture closing, the
//! combined list controller), see the `paneview-adapter` crate.
//!
//! This crate holds the pure parts of an ordered-list panel:
//! - [`OrderDiff`]: classifies every id as unchanged, added, removed or moved between two
//!   orders, so a renderer can animate it.
//! - [`WindowedLoader`]: a contiguous, page-granular window over the full order, with
//!   single-flight "load more" requests per edge.
//! - [`ScrollEdgeObserver`]: a throttled "scrolled past the top" flag.
//! - [`SwipeClassifier`]: dominant-direction swipe detection for gesture closing.
//! - [`preview_peers`] / [`unseen_privileged`]: ribbon preview aggregation.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - snapshots of the ordered id sequence (and an optional total count hint)
//! - scroll offsets and viewport size
//! - a monotonic `now_ms` clock
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod diff;
mod gesture;
mod key;
mod loader;
mod options;
mod preview;
mod scroll_edge;
mod types;


pub use diff::{ItemTransition, OrderDiff, OrderDiffOptions, OrderDiffResult};
pub use gesture::{SwipeClassifier, SwipeConfig, close_direction};
pub use key::{KeyMap, KeySet, ListKey};
pub use loader::WindowedLoader;
pub use options::{DEFAULT_SETTLE_TIMEOUT_MS, LoadMoreCallback, LoaderOptions};
pub use preview::{PeerStories, StoryEntry, preview_peers, unseen_privileged};
pub use scroll_edge::{SCROLL_EDGE_THROTTLE_MS, ScrollEdgeObserver};
pub use types::{
    Edge, ItemSlot, LoadOutcome, LoadRequest, PanelPhase, SwipeDirection, TextDirection,
    TransitionTag, ViewportWindow,
};
