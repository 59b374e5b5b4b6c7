use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use paneview::{KeyMap, KeySet, ListKey, PanelPhase, PeerStories, preview_peers, unseen_privileged};

use crate::tween::{Easing, PROGRESS_SHOWN, Tween};
use crate::{HeavyAnimations, PanelCoordinator, PanelOptions};

pub const RIBBON_ANIMATION_DURATION_MS: u64 = 150;
/// Wait after the declared duration before the slide is assumed finished.
pub const ANIMATION_END_DELAY_MS: u64 = 100;
pub const DEFAULT_PRELOAD_COUNT: usize = 5;
pub const DEFAULT_PREVIEW_COUNT: usize = 3;

/// Asks for the stories of these peers to be fetched ahead of time.
pub type PreloadCallback<K> = Arc<dyn Fn(&[K]) + Send + Sync>;

/// A callback fired when the ribbon starts sliding.
pub type SlideCallback = Arc<dyn Fn(RibbonSlide) + Send + Sync>;

/// Which way the ribbon moves. The toggler appears as the ribbon collapses into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RibbonSlide {
    Collapse,
    Expand,
}

/// Configuration for [`RibbonToggler`].
pub struct RibbonOptions<K> {
    /// User preference for ribbon animations.
    pub animations_enabled: bool,
    /// Whether this toggler belongs to the archived list.
    pub archived: bool,
    pub preload_count: usize,
    pub preview_count: usize,
    pub easing: Easing,
    pub on_preload: Option<PreloadCallback<K>>,
    pub on_slide: Option<SlideCallback>,
    /// Dispatches "show the ribbon" when the toggler is activated.
    pub on_expand: Option<crate::NotifyCallback>,
}

impl<K> Clone for RibbonOptions<K> {
    fn clone(&self) -> Self {
        Self {
            animations_enabled: self.animations_enabled,
            archived: self.archived,
            preload_count: self.preload_count,
            preview_count: self.preview_count,
            easing: self.easing,
            on_preload: self.on_preload.clone(),
            on_slide: self.on_slide.clone(),
            on_expand: self.on_expand.clone(),
        }
    }
}

impl<K> Default for RibbonOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RibbonOptions<K> {
    pub fn new() -> Self {
        Self {
            animations_enabled: true,
            archived: false,
            preload_count: DEFAULT_PRELOAD_COUNT,
            preview_count: DEFAULT_PREVIEW_COUNT,
            easing: Easing::default(),
            on_preload: None,
            on_slide: None,
            on_expand: None,
        }
    }

    pub fn with_animations_enabled(mut self, animations_enabled: bool) -> Self {
        self.animations_enabled = animations_enabled;
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    pub fn with_preload_count(mut self, preload_count: usize) -> Self {
        self.preload_count = preload_count;
        self
    }

    pub fn with_preview_count(mut self, preview_count: usize) -> Self {
        self.preview_count = preview_count;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_on_preload(mut self, f: Option<impl Fn(&[K]) + Send + Sync + 'static>) -> Self {
        self.on_preload = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_slide(mut self, f: Option<impl Fn(RibbonSlide) + Send + Sync + 'static>) -> Self {
        self.on_slide = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_expand(mut self, f: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_expand = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> fmt::Debug for RibbonOptions<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RibbonOptions")
            .field("animations_enabled", &self.animations_enabled)
            .field("archived", &self.archived)
            .field("preload_count", &self.preload_count)
            .field("preview_count", &self.preview_count)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

/// What the toggler draws: preview avatars (bottom-most first) and their privileged rings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RibbonPreview<K: ListKey> {
    pub peers: Vec<K>,
    pub unseen_privileged: KeyMap<K, bool>,
}

/// The collapsed stand-in for the story ribbon.
///
/// Visible while `can_show && is_shown`. The slide between ribbon and toggler is script-driven,
/// so there is no transition-end signal: the phase completes through the tick fallback at
/// `RIBBON_ANIMATION_DURATION_MS + ANIMATION_END_DELAY_MS`, holding a heavy-animation token
/// meanwhile. While another panel is open (`set_blocked(true)`) the toggler flips without
/// animating.
#[derive(Debug)]
pub struct RibbonToggler<K: ListKey> {
    options: RibbonOptions<K>,
    panel: PanelCoordinator,
    can_show: bool,
    is_shown: bool,
    blocked: bool,
    warmed: KeySet<K>,
    tween: Option<Tween>,
}

impl<K: ListKey> RibbonToggler<K> {
    pub fn new(options: RibbonOptions<K>, heavy: HeavyAnimations) -> Self {
        let on_start = options.on_slide.clone().map(|cb| {
            move |phase: PanelPhase| {
                cb(if phase == PanelPhase::Opening {
                    RibbonSlide::Collapse
                } else {
                    RibbonSlide::Expand
                })
            }
        });
        let panel_options = PanelOptions::new(RIBBON_ANIMATION_DURATION_MS)
            .with_end_grace_ms(ANIMATION_END_DELAY_MS)
            .with_animations_enabled(options.animations_enabled)
            .with_on_animation_start(on_start)
            .with_on_close_request(options.on_expand.clone().map(|cb| move || cb()));
        let panel = PanelCoordinator::new(panel_options, heavy);

        Self {
            options,
            panel,
            can_show: false,
            is_shown: false,
            blocked: false,
            warmed: KeySet::default(),
            tween: None,
        }
    }

    pub fn options(&self) -> &RibbonOptions<K> {
        &self.options
    }

    pub fn phase(&self) -> PanelPhase {
        self.panel.phase()
    }

    pub fn is_visible(&self) -> bool {
        self.can_show && self.is_shown
    }

    /// `false` once fully closed; the toggler stays rendered while it slides away.
    pub fn should_render(&self) -> bool {
        self.panel.phase() != PanelPhase::Closed
    }

    pub fn holds_heavy_animation(&self) -> bool {
        self.panel.holds_heavy_animation()
    }

    pub fn set_can_show(&mut self, can_show: bool) {
        self.can_show = can_show;
        self.panel.set_open(self.is_visible());
    }

    pub fn set_shown(&mut self, is_shown: bool) {
        self.is_shown = is_shown;
        self.panel.set_open(self.is_visible());
    }

    /// Another panel (e.g. a forum panel) is open over the list.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
        self.sync_animations();
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.options.animations_enabled = enabled;
        self.sync_animations();
    }

    fn sync_animations(&mut self) {
        let enabled = self.options.animations_enabled && !self.blocked;
        self.panel.set_animations_enabled(enabled);
        if !enabled {
            self.tween = None;
        }
    }

    /// Warms the stories of the first `preload_count` peers. Only ids not warmed before are
    /// passed to `on_preload`; returns how many.
    pub fn preload(&mut self, ordered_peer_ids: &[K]) -> usize {
        let fresh: Vec<K> = ordered_peer_ids
            .iter()
            .take(self.options.preload_count)
            .filter(|id| !self.warmed.contains(*id))
            .cloned()
            .collect();
        if fresh.is_empty() {
            return 0;
        }
        self.warmed.extend(fresh.iter().cloned());
        vdebug!(count = fresh.len(), "RibbonToggler: preloading");
        if let Some(cb) = &self.options.on_preload {
            cb(&fresh);
        }
        fresh.len()
    }

    /// Preview avatars and their privileged-story flags.
    pub fn preview<'a, S: ListKey + Ord + 'a>(
        &self,
        ordered_peer_ids: &[K],
        current_user: &K,
        is_resolvable: impl FnMut(&K) -> bool,
        stories: impl FnMut(&K) -> Option<&'a PeerStories<S>>,
    ) -> RibbonPreview<K> {
        let peers = preview_peers(
            ordered_peer_ids,
            current_user,
            self.options.preview_count,
            is_resolvable,
        );
        let unseen_privileged = unseen_privileged(&peers, stories);
        RibbonPreview {
            peers,
            unseen_privileged,
        }
    }

    /// Activating the toggler asks for the ribbon to be shown.
    pub fn expand(&mut self) -> bool {
        self.panel.request_close()
    }

    /// Applies scheduled slides and completes finished ones.
    ///
    /// Returns `true` when a slide completed on this tick.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let from = self.progress(now_ms);
        if self.panel.flush_mutations(now_ms) > 0 {
            let to = self.target();
            match self.tween.as_mut() {
                // Reversed mid-slide: continue from where it is.
                Some(tween) => tween.retarget(now_ms, to, RIBBON_ANIMATION_DURATION_MS),
                None => {
                    self.tween = Some(Tween::new(
                        from,
                        to,
                        now_ms,
                        RIBBON_ANIMATION_DURATION_MS,
                        self.options.easing,
                    ));
                }
            }
        }
        let settled = self.panel.tick(now_ms);
        if settled {
            self.tween = None;
        }
        settled
    }

    fn target(&self) -> u32 {
        if self.panel.phase().is_shown() {
            PROGRESS_SHOWN
        } else {
            0
        }
    }

    /// How far the toggler is shown, in `0..=PROGRESS_SHOWN`.
    pub fn progress(&self, now_ms: u64) -> u32 {
        match self.tween {
            Some(tween) if self.panel.phase().is_transitioning() => tween.sample(now_ms),
            _ => match self.panel.phase() {
                PanelPhase::Open | PanelPhase::Closing => PROGRESS_SHOWN,
                PanelPhase::Closed | PanelPhase::Opening => 0,
            },
        }
    }

    pub fn unmount(&mut self) {
        self.tween = None;
        self.panel.unmount();
    }
}
