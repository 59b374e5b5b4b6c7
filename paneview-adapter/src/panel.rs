use alloc::sync::Arc;

use paneview::PanelPhase;

use crate::{HeavyAnimationToken, HeavyAnimations, MutationQueue};

/// A callback fired when an animation is applied; receives the phase it animates toward.
pub type PhaseCallback = Arc<dyn Fn(PanelPhase) + Send + Sync>;

/// A notification or fire-and-forget action without arguments.
pub type NotifyCallback = Arc<dyn Fn() + Send + Sync>;

pub const DEFAULT_PANEL_DURATION_MS: u64 = 250;
pub const DEFAULT_END_GRACE_MS: u64 = 100;

/// The transform a renderer should have applied to the panel's root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanelTransform {
    /// Off-screen (the stylesheet default).
    #[default]
    Hidden,
    /// Slid in (`transform: none`).
    Shown,
}

/// Configuration for [`PanelCoordinator`].
pub struct PanelOptions {
    /// Declared duration of the open/close transition.
    pub duration_ms: u64,
    /// Extra wait before a missing transition-end signal is assumed.
    pub end_grace_ms: u64,
    /// When `false`, phases jump straight to `Open`/`Closed`.
    pub animations_enabled: bool,
    pub on_animation_start: Option<PhaseCallback>,
    pub on_open: Option<NotifyCallback>,
    /// Fired once the panel is fully closed (e.g. so a parent can unmount it).
    pub on_close_animation_end: Option<NotifyCallback>,
    /// Dispatches "close this panel" (escape key, history back, swipe).
    pub on_close_request: Option<NotifyCallback>,
}

impl Clone for PanelOptions {
    fn clone(&self) -> Self {
        Self {
            duration_ms: self.duration_ms,
            end_grace_ms: self.end_grace_ms,
            animations_enabled: self.animations_enabled,
            on_animation_start: self.on_animation_start.clone(),
            on_open: self.on_open.clone(),
            on_close_animation_end: self.on_close_animation_end.clone(),
            on_close_request: self.on_close_request.clone(),
        }
    }
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PANEL_DURATION_MS)
    }
}

impl PanelOptions {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms: duration_ms.max(1),
            end_grace_ms: DEFAULT_END_GRACE_MS,
            animations_enabled: true,
            on_animation_start: None,
            on_open: None,
            on_close_animation_end: None,
            on_close_request: None,
        }
    }

    pub fn with_end_grace_ms(mut self, end_grace_ms: u64) -> Self {
        self.end_grace_ms = end_grace_ms;
        self
    }

    pub fn with_animations_enabled(mut self, animations_enabled: bool) -> Self {
        self.animations_enabled = animations_enabled;
        self
    }

    pub fn with_on_animation_start(
        mut self,
        f: Option<impl Fn(PanelPhase) + Send + Sync + 'static>,
    ) -> Self {
        self.on_animation_start = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_open(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_open = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_close_animation_end(
        mut self,
        f: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_close_animation_end = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_close_request(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_close_request = f.map(|f| Arc::new(f) as _);
        self
    }

    fn fallback_ms(&self) -> u64 {
        self.duration_ms.saturating_add(self.end_grace_ms)
    }
}

impl core::fmt::Debug for PanelOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanelOptions")
            .field("duration_ms", &self.duration_ms)
            .field("end_grace_ms", &self.end_grace_ms)
            .field("animations_enabled", &self.animations_enabled)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PanelMutation {
    Animate { show: bool },
}

fn notify(cb: &Option<NotifyCallback>) {
    if let Some(cb) = cb {
        cb();
    }
}

/// Open/close lifecycle of one slide-in panel.
///
/// Adapters drive it by calling:
/// - `set_open` / `set_hidden` when the store's visibility flags change
/// - `flush_mutations(now_ms)` at the next paint opportunity (applies the transform)
/// - `on_transition_end()` when the renderer reports the transform finished
/// - `tick(now_ms)` each frame/timer tick (transition-end fallback)
///
/// A heavy-animation token is held from the moment the transform is applied until the phase
/// settles. At most one token per panel is held; dropping the coordinator (or `unmount`)
/// releases it and discards scheduled mutations.
#[derive(Debug)]
pub struct PanelCoordinator {
    options: PanelOptions,
    heavy: HeavyAnimations,
    phase: PanelPhase,
    is_open: bool,
    is_hidden: bool,
    transform: PanelTransform,
    should_render_content: bool,
    token: Option<HeavyAnimationToken>,
    started_at_ms: Option<u64>,
    // Bumped per applied animation.
    generation: u64,
    queue: MutationQueue<PanelMutation>,
    mounted: bool,
}

impl PanelCoordinator {
    pub fn new(options: PanelOptions, heavy: HeavyAnimations) -> Self {
        vdebug!(
            duration_ms = options.duration_ms,
            animations_enabled = options.animations_enabled,
            "PanelCoordinator::new"
        );
        Self {
            options,
            heavy,
            phase: PanelPhase::Closed,
            is_open: false,
            is_hidden: false,
            transform: PanelTransform::Hidden,
            should_render_content: false,
            token: None,
            started_at_ms: None,
            generation: 0,
            queue: MutationQueue::new(),
            mounted: true,
        }
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn transform(&self) -> PanelTransform {
        self.transform
    }

    /// `open && !hidden`.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_hidden
    }

    /// Whether content should be rendered inside the panel: set once the open transform is
    /// applied, cleared as soon as visibility flips.
    pub fn should_render_content(&self) -> bool {
        self.should_render_content
    }

    /// Whether this panel currently holds a heavy-animation token.
    pub fn holds_heavy_animation(&self) -> bool {
        self.token.is_some()
    }

    /// The animation currently in flight, if any.
    ///
    /// Renderers that can tag their transitions should capture this after `flush_mutations`
    /// and report completion through [`PanelCoordinator::on_transition_end_of`].
    pub fn animation_generation(&self) -> Option<u64> {
        self.started_at_ms.map(|_| self.generation)
    }

    pub fn has_scheduled_mutations(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn set_open(&mut self, is_open: bool) {
        self.is_open = is_open;
        self.sync_visibility();
    }

    /// Keeps the panel logically open while something covers it.
    pub fn set_hidden(&mut self, is_hidden: bool) {
        self.is_hidden = is_hidden;
        self.sync_visibility();
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        if self.options.animations_enabled == enabled {
            return;
        }
        self.options.animations_enabled = enabled;
        if !enabled && (self.phase.is_transitioning() || !self.queue.is_empty()) {
            self.settle_immediately();
        }
    }

    fn sync_visibility(&mut self) {
        let visible = self.is_visible();
        if !self.mounted || visible == self.phase.is_shown() {
            return;
        }
        self.should_render_content = false;
        self.phase = if visible {
            PanelPhase::Opening
        } else {
            PanelPhase::Closing
        };

        if !self.options.animations_enabled {
            self.settle_immediately();
            return;
        }

        vtrace!(visible, "PanelCoordinator: visibility flipped");
        self.queue.push(PanelMutation::Animate { show: visible });
    }

    /// Skips the rest of the current transition.
    fn settle_immediately(&mut self) {
        self.queue.cancel_all();
        self.token = None;
        self.started_at_ms = None;
        let show = self.phase.is_shown();
        self.transform = if show {
            PanelTransform::Shown
        } else {
            PanelTransform::Hidden
        };
        self.should_render_content = show;
        self.complete_phase();
    }

    fn complete_phase(&mut self) {
        match self.phase {
            PanelPhase::Opening => {
                self.phase = PanelPhase::Open;
                notify(&self.options.on_open);
            }
            PanelPhase::Closing => {
                self.phase = PanelPhase::Closed;
                notify(&self.options.on_close_animation_end);
            }
            PanelPhase::Open | PanelPhase::Closed => {}
        }
    }

    /// Applies scheduled mutations in order. Returns how many were applied.
    pub fn flush_mutations(&mut self, now_ms: u64) -> usize {
        let mut applied = 0usize;
        while let Some(mutation) = self.queue.pop() {
            match mutation {
                PanelMutation::Animate { show } => self.apply_animation(show, now_ms),
            }
            applied += 1;
        }
        applied
    }

    fn apply_animation(&mut self, show: bool, now_ms: u64) {
        // One token per panel: a superseded animation gives its token back first.
        self.token = None;
        self.token = Some(self.heavy.acquire(self.options.duration_ms, now_ms));
        self.started_at_ms = Some(now_ms);
        self.generation = self.generation.wrapping_add(1);

        if let Some(cb) = &self.options.on_animation_start {
            cb(if show {
                PanelPhase::Opening
            } else {
                PanelPhase::Closing
            });
        }

        self.should_render_content = show;
        self.transform = if show {
            PanelTransform::Shown
        } else {
            PanelTransform::Hidden
        };
        vtrace!(show, now_ms, "PanelCoordinator: transform applied");
    }

    /// The renderer reports the transform finished. Signals that don't match an applied
    /// animation (stale, or arriving before the next paint) are ignored.
    pub fn on_transition_end(&mut self) -> bool {
        if !self.phase.is_transitioning() || self.started_at_ms.is_none() || !self.queue.is_empty()
        {
            vtrace!(phase = ?self.phase, "PanelCoordinator: stale transition end");
            return false;
        }
        self.token = None;
        self.started_at_ms = None;
        self.complete_phase();
        true
    }

    /// Like [`PanelCoordinator::on_transition_end`], for a specific animation: the end of a
    /// superseded one is ignored.
    pub fn on_transition_end_of(&mut self, generation: u64) -> bool {
        if self.animation_generation() != Some(generation) {
            vtrace!(
                generation,
                current = self.generation,
                "PanelCoordinator: superseded transition end"
            );
            return false;
        }
        self.on_transition_end()
    }

    /// Transition-end fallback. Returns `true` if the phase was completed by timeout.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(started) = self.started_at_ms else {
            return false;
        };
        if !self.phase.is_transitioning()
            || now_ms.saturating_sub(started) < self.options.fallback_ms()
        {
            return false;
        }
        vwarn!(
            phase = ?self.phase,
            started_at_ms = started,
            now_ms,
            "PanelCoordinator: transition end never arrived, completing"
        );
        self.on_transition_end()
    }

    /// Escape key, history back, or swipe: asks the store to close the panel.
    ///
    /// Returns `false` if the panel isn't visible.
    pub fn request_close(&mut self) -> bool {
        if !self.is_visible() {
            return false;
        }
        vdebug!("PanelCoordinator::request_close");
        notify(&self.options.on_close_request);
        true
    }

    /// Tears the panel down: scheduled mutations are discarded and the token is released.
    pub fn unmount(&mut self) {
        vdebug!(
            scheduled = self.queue.len(),
            held = self.token.is_some(),
            "PanelCoordinator::unmount"
        );
        self.queue.cancel_all();
        self.mounted = false;
        self.token = None;
        self.started_at_ms = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}
