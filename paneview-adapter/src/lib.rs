//! Time-driven controllers for the `paneview` crate.
//!
//! The `paneview` crate is UI-agnostic and holds the pure list logic (diffing, windowing,
//! swipe classification). This crate adds the stateful pieces an adapter drives with a
//! monotonic `now_ms` clock:
//!
//! - [`PanelCoordinator`]: open/close phases of a slide-in panel, heavy-animation tokens and
//!   the transition-end fallback
//! - [`HeavyAnimations`]: the shared "heavy animation in flight" counter
//! - [`MutationQueue`]: mutations deferred to the next paint opportunity
//! - [`GestureCloser`]: swipe-to-close on touch platforms
//! - [`RibbonToggler`]: the collapsed story ribbon with preview avatars and preloading
//! - [`ListController`]: window, tags and scroll-edge state in one render pass
//!
//! Nothing here owns UI objects; everything is single-threaded.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod deferred;
mod gesture;
mod heavy;
mod panel;
mod ribbon;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::{DiffScope, ListController, ListFrame, ListStatus};
pub use deferred::MutationQueue;
pub use gesture::{
    CaptureGuard, CaptureOptions, GestureCapture, GestureCloser, GestureCloserOptions,
    SwipeOrigin, SwipeResponse,
};
pub use heavy::{HeavyAnimationToken, HeavyAnimations};
pub use panel::{
    DEFAULT_END_GRACE_MS, DEFAULT_PANEL_DURATION_MS, NotifyCallback, PanelCoordinator,
    PanelOptions, PanelTransform, PhaseCallback,
};
pub use ribbon::{
    ANIMATION_END_DELAY_MS, DEFAULT_PRELOAD_COUNT, DEFAULT_PREVIEW_COUNT, PreloadCallback,
    RIBBON_ANIMATION_DURATION_MS, RibbonOptions, RibbonPreview, RibbonSlide, RibbonToggler,
    SlideCallback,
};
pub use tween::{Easing, PROGRESS_SHOWN, Tween};
