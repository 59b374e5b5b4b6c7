use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use paneview::{PanelPhase, SwipeClassifier, SwipeConfig, SwipeDirection, TextDirection};

use crate::NotifyCallback;

/// What the capture primitive should intercept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Drags starting inside this region (e.g. the inner scrollable list) are never intercepted.
    pub exclude_selector: Option<String>,
}

/// Registration handle returned by a [`GestureCapture`]. Unregisters on drop.
pub struct CaptureGuard {
    unregister: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    pub fn new(unregister: impl FnOnce() + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("registered", &self.unregister.is_some())
            .finish()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

/// The platform's raw pointer-capture primitive, attached to the panel's root region.
pub trait GestureCapture {
    fn register(&mut self, options: &CaptureOptions) -> CaptureGuard;
}

/// Where a drag started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeOrigin {
    Root,
    /// Inside the excluded sub-region.
    Excluded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeResponse {
    /// The swipe closed the panel; the platform's default handling should be prevented.
    Consumed,
    /// Let the event propagate normally.
    Ignored,
}

/// Configuration for [`GestureCloser`].
pub struct GestureCloserOptions {
    pub text_direction: TextDirection,
    /// `false` on platforms without touch input: nothing is ever registered.
    pub enabled: bool,
    pub swipe: SwipeConfig,
    pub exclude_selector: Option<String>,
    pub on_close: Option<NotifyCallback>,
}

impl Clone for GestureCloserOptions {
    fn clone(&self) -> Self {
        Self {
            text_direction: self.text_direction,
            enabled: self.enabled,
            swipe: self.swipe,
            exclude_selector: self.exclude_selector.clone(),
            on_close: self.on_close.clone(),
        }
    }
}

impl Default for GestureCloserOptions {
    fn default() -> Self {
        Self::new(TextDirection::Ltr)
    }
}

impl GestureCloserOptions {
    pub fn new(text_direction: TextDirection) -> Self {
        Self {
            text_direction,
            enabled: true,
            swipe: SwipeConfig::default(),
            exclude_selector: None,
            on_close: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    pub fn with_exclude_selector(mut self, selector: impl Into<String>) -> Self {
        self.exclude_selector = Some(selector.into());
        self
    }

    pub fn with_on_close(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_close = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl fmt::Debug for GestureCloserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCloserOptions")
            .field("text_direction", &self.text_direction)
            .field("enabled", &self.enabled)
            .field("swipe", &self.swipe)
            .field("exclude_selector", &self.exclude_selector)
            .finish_non_exhaustive()
    }
}

/// Closes a panel on a horizontal swipe toward the edge it slid in from.
///
/// The capture is registered only while the panel is shown; [`GestureCloser::sync`] drops the
/// registration as soon as the panel starts closing, and dropping the closer drops it too.
#[derive(Debug)]
pub struct GestureCloser {
    options: GestureCloserOptions,
    classifier: SwipeClassifier,
    guard: Option<CaptureGuard>,
}

impl GestureCloser {
    pub fn new(options: GestureCloserOptions) -> Self {
        let classifier = SwipeClassifier::new(options.swipe);
        Self {
            options,
            classifier,
            guard: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    pub fn close_direction(&self) -> SwipeDirection {
        paneview::close_direction(self.options.text_direction)
    }

    pub fn set_text_direction(&mut self, text_direction: TextDirection) {
        self.options.text_direction = text_direction;
    }

    /// Registers or drops the capture to match the panel phase.
    pub fn sync(&mut self, phase: PanelPhase, capture: &mut impl GestureCapture) {
        let want = self.options.enabled && phase.is_shown();
        match (want, self.guard.is_some()) {
            (true, false) => {
                vtrace!("GestureCloser: capture registered");
                let options = CaptureOptions {
                    exclude_selector: self.options.exclude_selector.clone(),
                };
                self.guard = Some(capture.register(&options));
            }
            (false, true) => self.detach(),
            _ => {}
        }
    }

    /// Drops the capture registration, if any.
    pub fn detach(&mut self) {
        if self.guard.take().is_some() {
            vtrace!("GestureCloser: capture released");
        }
    }

    /// A completed swipe reported by the capture primitive.
    pub fn on_swipe(&self, direction: SwipeDirection, origin: SwipeOrigin) -> SwipeResponse {
        if !self.is_active() || origin == SwipeOrigin::Excluded {
            return SwipeResponse::Ignored;
        }
        if direction != self.close_direction() {
            return SwipeResponse::Ignored;
        }
        vdebug!(direction = ?direction, "GestureCloser: closing");
        if let Some(cb) = &self.options.on_close {
            cb();
        }
        SwipeResponse::Consumed
    }

    /// A completed drag; ambiguous drags are ignored.
    pub fn on_drag(&self, dx: f32, dy: f32, origin: SwipeOrigin) -> SwipeResponse {
        match self.classifier.classify(dx, dy) {
            Some(direction) => self.on_swipe(direction, origin),
            None => SwipeResponse::Ignored,
        }
    }
}
