use crate::*;

use paneview::{
    Edge, LoadOutcome, LoadRequest, LoaderOptions, OrderDiffOptions, PanelPhase, PeerStories,
    StoryEntry, SwipeDirection, TextDirection, TransitionTag,
};

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn bump(c: &Arc<AtomicUsize>) -> impl Fn() + Send + Sync + 'static {
    let c = Arc::clone(c);
    move || {
        c.fetch_add(1, Ordering::SeqCst);
    }
}

fn count(c: &Arc<AtomicUsize>) -> usize {
    c.load(Ordering::SeqCst)
}

// ---- HeavyAnimations / MutationQueue ----

#[test]
fn heavy_animations_count_live_tokens() {
    let heavy = HeavyAnimations::new();
    let a = heavy.acquire(100, 0);
    let b = heavy.clone().acquire(100, 0);
    assert_eq!(heavy.active_count(), 2);
    assert!(heavy.is_animating());

    heavy.release(a);
    assert_eq!(heavy.active_count(), 1);
    drop(b);
    assert_eq!(heavy.active_count(), 0);
    assert!(!heavy.is_animating());
}

#[test]
fn heavy_animations_double_release_is_a_no_op() {
    let heavy = HeavyAnimations::new();
    let t = heavy.acquire(10, 0);
    let id = t.id();
    heavy.release(t);
    assert!(!heavy.release_id(id));
    assert_eq!(heavy.active_count(), 0);
}

#[test]
fn heavy_animations_report_overdue_acquisitions() {
    let heavy = HeavyAnimations::new();
    let _t = heavy.acquire(100, 0);
    assert_eq!(heavy.overdue(50), 0);
    assert_eq!(heavy.overdue(100), 0);
    assert_eq!(heavy.overdue(101), 1);
}

#[test]
fn mutation_queue_is_fifo_and_cancellable() {
    let mut q = MutationQueue::new();
    q.push(1);
    q.push(2);
    q.push(3);
    assert_eq!(q.pop(), Some(1));
    assert_eq!(q.drain().collect::<Vec<_>>(), vec![2, 3]);
    assert!(q.is_empty());

    q.push(4);
    q.push(5);
    assert_eq!(q.cancel_all(), 2);
    assert_eq!(q.len(), 0);
}

// ---- PanelCoordinator ----

#[test]
fn panel_open_close_cycle_balances_tokens() {
    let heavy = HeavyAnimations::new();
    let opened = counter();
    let closed = counter();
    let mut p = PanelCoordinator::new(
        PanelOptions::new(250)
            .with_on_open(Some(bump(&opened)))
            .with_on_close_animation_end(Some(bump(&closed))),
        heavy.clone(),
    );
    assert_eq!(p.phase(), PanelPhase::Closed);

    p.set_open(true);
    assert_eq!(p.phase(), PanelPhase::Opening);
    assert!(p.has_scheduled_mutations());
    assert_eq!(p.transform(), PanelTransform::Hidden);
    assert_eq!(heavy.active_count(), 0);

    assert_eq!(p.flush_mutations(0), 1);
    assert_eq!(p.transform(), PanelTransform::Shown);
    assert!(p.should_render_content());
    assert_eq!(heavy.active_count(), 1);

    assert!(p.on_transition_end());
    assert_eq!(p.phase(), PanelPhase::Open);
    assert_eq!(heavy.active_count(), 0);
    assert_eq!(count(&opened), 1);

    p.set_open(false);
    assert_eq!(p.phase(), PanelPhase::Closing);
    assert!(!p.should_render_content());
    assert_eq!(p.flush_mutations(500), 1);
    assert_eq!(p.transform(), PanelTransform::Hidden);
    assert_eq!(heavy.active_count(), 1);

    assert!(p.on_transition_end());
    assert_eq!(p.phase(), PanelPhase::Closed);
    assert_eq!(heavy.active_count(), 0);
    assert_eq!(count(&closed), 1);
}

#[test]
fn panel_rapid_toggle_settles_open_with_one_token() {
    let heavy = HeavyAnimations::new();
    let mut p = PanelCoordinator::new(PanelOptions::default(), heavy.clone());

    p.set_open(true);
    assert_eq!(p.flush_mutations(0), 1);
    p.set_open(false);
    p.set_open(true);
    assert_eq!(p.phase(), PanelPhase::Opening);

    assert_eq!(p.flush_mutations(16), 2);
    assert_eq!(heavy.active_count(), 1);

    assert!(p.on_transition_end());
    assert_eq!(p.phase(), PanelPhase::Open);
    assert_eq!(heavy.active_count(), 0);
}

#[test]
fn panel_toggles_before_first_paint_keep_one_token() {
    let heavy = HeavyAnimations::new();
    let mut p = PanelCoordinator::new(PanelOptions::default(), heavy.clone());

    p.set_open(true);
    p.set_open(false);
    p.set_open(true);
    assert_eq!(p.flush_mutations(0), 3);
    assert_eq!(heavy.active_count(), 1);
    assert_eq!(p.phase(), PanelPhase::Opening);
    assert_eq!(p.transform(), PanelTransform::Shown);
}

#[test]
fn panel_reports_animation_start_phases() {
    let heavy = HeavyAnimations::new();
    let log: Arc<Mutex<Vec<PanelPhase>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let mut p = PanelCoordinator::new(
        PanelOptions::default().with_on_animation_start(Some(move |phase: PanelPhase| {
            sink.lock().unwrap().push(phase);
        })),
        heavy,
    );

    p.set_open(true);
    p.flush_mutations(0);
    p.on_transition_end();
    p.set_open(false);
    p.flush_mutations(300);

    assert_eq!(
        *log.lock().unwrap(),
        vec![PanelPhase::Opening, PanelPhase::Closing]
    );
}

#[test]
fn panel_ignores_stale_transition_end() {
    let heavy = HeavyAnimations::new();
    let mut p = PanelCoordinator::new(PanelOptions::default(), heavy.clone());
    assert!(!p.on_transition_end());

    p.set_open(true);
    // Not painted yet.
    assert!(!p.on_transition_end());
    assert_eq!(p.phase(), PanelPhase::Opening);

    p.flush_mutations(0);
    p.set_open(false);
    // The opening transform's end arrives after a close was scheduled.
    assert!(!p.on_transition_end());
    assert_eq!(p.phase(), PanelPhase::Closing);
    assert_eq!(heavy.active_count(), 1);

    p.flush_mutations(16);
    assert!(p.on_transition_end());
    assert_eq!(p.phase(), PanelPhase::Closed);
    assert_eq!(heavy.active_count(), 0);
}

#[test]
fn panel_ignores_transition_end_of_superseded_animation() {
    let heavy = HeavyAnimations::new();
    let mut p = PanelCoordinator::new(PanelOptions::default(), heavy.clone());
    assert_eq!(p.animation_generation(), None);

    p.set_open(true);
    p.flush_mutations(0);
    let opening = p.animation_generation().unwrap();

    p.set_open(false);
    p.flush_mutations(16);
    let closing = p.animation_generation().unwrap();
    assert_ne!(opening, closing);

    // The opening transform's end arrives late.
    assert!(!p.on_transition_end_of(opening));
    assert_eq!(p.phase(), PanelPhase::Closing);
    assert_eq!(heavy.active_count(), 1);

    assert!(p.on_transition_end_of(closing));
    assert_eq!(p.phase(), PanelPhase::Closed);
    assert_eq!(heavy.active_count(), 0);
    assert_eq!(p.animation_generation(), None);
    assert!(!p.on_transition_end_of(closing));
}

#[test]
fn panel_tick_completes_missing_transition_end() {
    let heavy = HeavyAnimations::new();
    let opened = counter();
    let mut p = PanelCoordinator::new(
        PanelOptions::new(250)
            .with_end_grace_ms(100)
            .with_on_open(Some(bump(&opened))),
        heavy.clone(),
    );
    assert!(!p.tick(0));

    p.set_open(true);
    p.flush_mutations(100);
    assert!(!p.tick(449));
    assert_eq!(p.phase(), PanelPhase::Opening);

    assert!(p.tick(450));
    assert_eq!(p.phase(), PanelPhase::Open);
    assert_eq!(heavy.active_count(), 0);
    assert_eq!(count(&opened), 1);
    assert!(!p.tick(10_000));
}

#[test]
fn panel_without_animations_settles_synchronously() {
    let heavy = HeavyAnimations::new();
    let opened = counter();
    let closed = counter();
    let mut p = PanelCoordinator::new(
        PanelOptions::default()
            .with_animations_enabled(false)
            .with_on_open(Some(bump(&opened)))
            .with_on_close_animation_end(Some(bump(&closed))),
        heavy.clone(),
    );

    p.set_open(true);
    assert_eq!(p.phase(), PanelPhase::Open);
    assert_eq!(p.transform(), PanelTransform::Shown);
    assert!(!p.has_scheduled_mutations());
    assert_eq!(count(&opened), 1);

    p.set_open(false);
    assert_eq!(p.phase(), PanelPhase::Closed);
    assert_eq!(count(&closed), 1);
    assert_eq!(heavy.active_count(), 0);
}

#[test]
fn panel_disabling_animations_mid_flight_releases_token() {
    let heavy = HeavyAnimations::new();
    let opened = counter();
    let mut p = PanelCoordinator::new(
        PanelOptions::default().with_on_open(Some(bump(&opened))),
        heavy.clone(),
    );

    p.set_open(true);
    p.flush_mutations(0);
    assert_eq!(heavy.active_count(), 1);

    p.set_animations_enabled(false);
    assert_eq!(p.phase(), PanelPhase::Open);
    assert_eq!(heavy.active_count(), 0);
    assert_eq!(count(&opened), 1);
}

#[test]
fn panel_hidden_counts_as_not_visible() {
    let heavy = HeavyAnimations::new();
    let mut p = PanelCoordinator::new(
        PanelOptions::default().with_animations_enabled(false),
        heavy,
    );

    p.set_open(true);
    assert!(p.is_visible());
    p.set_hidden(true);
    assert!(!p.is_visible());
    assert_eq!(p.phase(), PanelPhase::Closed);
    p.set_hidden(false);
    assert_eq!(p.phase(), PanelPhase::Open);
}

#[test]
fn panel_teardown_mid_animation_releases_token() {
    let heavy = HeavyAnimations::new();

    let mut p = PanelCoordinator::new(PanelOptions::default(), heavy.clone());
    p.set_open(true);
    p.flush_mutations(0);
    assert_eq!(heavy.active_count(), 1);
    drop(p);
    assert_eq!(heavy.active_count(), 0);

    let mut p = PanelCoordinator::new(PanelOptions::default(), heavy.clone());
    p.set_open(true);
    p.unmount();
    assert!(!p.is_mounted());
    assert!(!p.has_scheduled_mutations());
    assert_eq!(p.flush_mutations(0), 0);
    assert_eq!(heavy.active_count(), 0);
}

#[test]
fn panel_request_close_only_when_visible() {
    let heavy = HeavyAnimations::new();
    let requests = counter();
    let mut p = PanelCoordinator::new(
        PanelOptions::default().with_on_close_request(Some(bump(&requests))),
        heavy,
    );

    assert!(!p.request_close());
    assert_eq!(count(&requests), 0);

    p.set_open(true);
    assert!(p.request_close());
    assert_eq!(count(&requests), 1);
}

// ---- GestureCloser ----

#[derive(Default)]
struct FakeCapture {
    live: Rc<Cell<usize>>,
    registrations: usize,
    last: Option<CaptureOptions>,
}

impl GestureCapture for FakeCapture {
    fn register(&mut self, options: &CaptureOptions) -> CaptureGuard {
        self.registrations += 1;
        self.last = Some(options.clone());
        self.live.set(self.live.get() + 1);
        let live = Rc::clone(&self.live);
        CaptureGuard::new(move || live.set(live.get() - 1))
    }
}

#[test]
fn gesture_closer_ltr_closes_on_right_swipe() {
    let closes = counter();
    let mut capture = FakeCapture::default();
    let mut closer = GestureCloser::new(
        GestureCloserOptions::new(TextDirection::Ltr)
            .with_exclude_selector(".list")
            .with_on_close(Some(bump(&closes))),
    );

    closer.sync(PanelPhase::Closed, &mut capture);
    assert!(!closer.is_active());

    closer.sync(PanelPhase::Opening, &mut capture);
    closer.sync(PanelPhase::Open, &mut capture);
    assert!(closer.is_active());
    assert_eq!(capture.registrations, 1);
    assert_eq!(capture.live.get(), 1);
    assert_eq!(
        capture.last.as_ref().and_then(|o| o.exclude_selector.clone()),
        Some(String::from(".list"))
    );

    assert_eq!(
        closer.on_swipe(SwipeDirection::Right, SwipeOrigin::Root),
        SwipeResponse::Consumed
    );
    assert_eq!(
        closer.on_swipe(SwipeDirection::Left, SwipeOrigin::Root),
        SwipeResponse::Ignored
    );
    assert_eq!(
        closer.on_swipe(SwipeDirection::Right, SwipeOrigin::Excluded),
        SwipeResponse::Ignored
    );
    assert_eq!(count(&closes), 1);

    assert_eq!(closer.on_drag(40.0, 5.0, SwipeOrigin::Root), SwipeResponse::Consumed);
    // Too short, then ambiguous.
    assert_eq!(closer.on_drag(10.0, 0.0, SwipeOrigin::Root), SwipeResponse::Ignored);
    assert_eq!(closer.on_drag(30.0, 25.0, SwipeOrigin::Root), SwipeResponse::Ignored);
    assert_eq!(count(&closes), 2);

    closer.sync(PanelPhase::Closing, &mut capture);
    assert!(!closer.is_active());
    assert_eq!(capture.live.get(), 0);
}

#[test]
fn gesture_closer_rtl_closes_on_left_swipe() {
    let closes = counter();
    let mut capture = FakeCapture::default();
    let mut closer = GestureCloser::new(
        GestureCloserOptions::new(TextDirection::Rtl).with_on_close(Some(bump(&closes))),
    );
    closer.sync(PanelPhase::Open, &mut capture);

    assert_eq!(closer.close_direction(), SwipeDirection::Left);
    assert_eq!(closer.on_drag(40.0, 0.0, SwipeOrigin::Root), SwipeResponse::Ignored);
    assert_eq!(closer.on_drag(-40.0, 0.0, SwipeOrigin::Root), SwipeResponse::Consumed);
    assert_eq!(count(&closes), 1);

    closer.set_text_direction(TextDirection::Ltr);
    assert_eq!(closer.close_direction(), SwipeDirection::Right);
}

#[test]
fn gesture_closer_disabled_never_registers() {
    let mut capture = FakeCapture::default();
    let mut closer =
        GestureCloser::new(GestureCloserOptions::new(TextDirection::Ltr).with_enabled(false));
    closer.sync(PanelPhase::Open, &mut capture);
    assert!(!closer.is_active());
    assert_eq!(capture.registrations, 0);
    assert_eq!(
        closer.on_swipe(SwipeDirection::Right, SwipeOrigin::Root),
        SwipeResponse::Ignored
    );
}

#[test]
fn gesture_closer_unregisters_on_drop() {
    let mut capture = FakeCapture::default();
    let mut closer = GestureCloser::new(GestureCloserOptions::default());
    closer.sync(PanelPhase::Open, &mut capture);
    assert_eq!(capture.live.get(), 1);
    drop(closer);
    assert_eq!(capture.live.get(), 0);
}

// ---- RibbonToggler ----

#[test]
fn ribbon_preloads_only_new_peers() {
    let log: Arc<Mutex<Vec<Vec<u32>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let mut r = RibbonToggler::new(
        RibbonOptions::new().with_on_preload(Some(move |ids: &[u32]| {
            sink.lock().unwrap().push(ids.to_vec());
        })),
        HeavyAnimations::new(),
    );

    assert_eq!(r.preload(&[1, 2, 3, 4, 5, 6, 7]), 5);
    assert_eq!(r.preload(&[1, 2, 3, 4, 5, 6]), 0);
    assert_eq!(r.preload(&[9, 1, 2, 3, 4]), 1);
    assert_eq!(
        *log.lock().unwrap(),
        vec![vec![1, 2, 3, 4, 5], vec![9]]
    );
}

#[test]
fn ribbon_preview_picks_peers_and_privileged_flags() {
    let me = 1u32;
    let r: RibbonToggler<u32> = RibbonToggler::new(RibbonOptions::new(), HeavyAnimations::new());

    let mut stories: HashMap<u32, PeerStories<u32>> = HashMap::new();
    stories.insert(
        3,
        PeerStories::new(vec![10, 11], Some(10)).with_entry(11, StoryEntry { privileged: true }),
    );
    stories.insert(
        4,
        PeerStories::new(vec![10], Some(10)).with_entry(10, StoryEntry { privileged: true }),
    );

    let preview = r.preview(&[me, 2, 3, 4, 5], &me, |_: &u32| true, |p: &u32| stories.get(p));
    assert_eq!(preview.peers, vec![4, 3, 2]);
    assert_eq!(preview.unseen_privileged.get(&3), Some(&true));
    assert_eq!(preview.unseen_privileged.get(&4), Some(&false));
    assert_eq!(preview.unseen_privileged.get(&2), Some(&false));
    assert_eq!(preview.unseen_privileged.get(&5), None);

    let only = r.preview(&[me], &me, |_: &u32| true, |p: &u32| stories.get(p));
    assert_eq!(only.peers, vec![me]);
}

#[test]
fn ribbon_slides_with_token_and_completes_on_tick() {
    let heavy = HeavyAnimations::new();
    let slides: Arc<Mutex<Vec<RibbonSlide>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&slides);
    let mut r: RibbonToggler<u32> = RibbonToggler::new(
        RibbonOptions::new().with_on_slide(Some(move |s: RibbonSlide| {
            sink.lock().unwrap().push(s);
        })),
        heavy.clone(),
    );

    r.set_can_show(true);
    assert_eq!(r.phase(), PanelPhase::Closed);
    assert!(!r.should_render());

    r.set_shown(true);
    assert!(r.is_visible());
    assert_eq!(r.phase(), PanelPhase::Opening);
    assert!(!r.tick(0));
    assert!(r.holds_heavy_animation());
    assert_eq!(heavy.active_count(), 1);
    assert_eq!(*slides.lock().unwrap(), vec![RibbonSlide::Collapse]);

    assert_eq!(r.progress(0), 0);
    let mid = r.progress(75);
    assert!(mid > 0 && mid < PROGRESS_SHOWN);

    assert!(!r.tick(249));
    assert!(r.tick(250));
    assert_eq!(r.phase(), PanelPhase::Open);
    assert_eq!(heavy.active_count(), 0);
    assert_eq!(r.progress(250), PROGRESS_SHOWN);

    r.set_shown(false);
    r.tick(300);
    assert_eq!(
        *slides.lock().unwrap(),
        vec![RibbonSlide::Collapse, RibbonSlide::Expand]
    );
    r.unmount();
    assert_eq!(heavy.active_count(), 0);
}

#[test]
fn ribbon_reversed_mid_slide_continues_from_current_progress() {
    let heavy = HeavyAnimations::new();
    let mut r: RibbonToggler<u32> = RibbonToggler::new(RibbonOptions::new(), heavy.clone());
    r.set_can_show(true);
    r.set_shown(true);
    r.tick(0);
    let mid = r.progress(75);
    assert!(mid > 0 && mid < PROGRESS_SHOWN);

    r.set_shown(false);
    assert!(!r.tick(75));
    assert_eq!(r.phase(), PanelPhase::Closing);
    assert_eq!(r.progress(75), mid);
    assert!(r.progress(150) < mid);
    assert_eq!(heavy.active_count(), 1);

    assert!(!r.tick(324));
    assert!(r.tick(325));
    assert_eq!(r.phase(), PanelPhase::Closed);
    assert_eq!(r.progress(325), 0);
    assert_eq!(heavy.active_count(), 0);
}

#[test]
fn ribbon_blocked_by_open_panel_skips_animation() {
    let heavy = HeavyAnimations::new();
    let slides = counter();
    let s = Arc::clone(&slides);
    let mut r: RibbonToggler<u32> = RibbonToggler::new(
        RibbonOptions::new().with_on_slide(Some(move |_: RibbonSlide| {
            s.fetch_add(1, Ordering::SeqCst);
        })),
        heavy.clone(),
    );

    r.set_blocked(true);
    r.set_can_show(true);
    r.set_shown(true);
    assert_eq!(r.phase(), PanelPhase::Open);
    assert!(!r.tick(0));
    assert_eq!(heavy.active_count(), 0);
    assert_eq!(count(&slides), 0);
    assert_eq!(r.progress(0), PROGRESS_SHOWN);

    r.set_blocked(false);
    r.set_shown(false);
    assert_eq!(r.phase(), PanelPhase::Closing);
    r.tick(10);
    assert_eq!(count(&slides), 1);
}

#[test]
fn ribbon_expand_dispatches_when_visible() {
    let expands = counter();
    let mut r: RibbonToggler<u32> = RibbonToggler::new(
        RibbonOptions::new()
            .with_animations_enabled(false)
            .with_on_expand(Some(bump(&expands))),
        HeavyAnimations::new(),
    );
    assert!(!r.expand());

    r.set_can_show(true);
    r.set_shown(true);
    assert!(r.expand());
    assert_eq!(count(&expands), 1);
}

// ---- Tween ----

#[test]
fn tween_linear_samples_and_clamps() {
    let t = Tween::new(0, PROGRESS_SHOWN, 100, 100, Easing::Linear);
    assert_eq!(t.sample(0), 0);
    assert_eq!(t.sample(100), 0);
    assert_eq!(t.sample(150), 500);
    assert_eq!(t.sample(300), PROGRESS_SHOWN);
    assert!(!t.is_done(199));
    assert!(t.is_done(200));

    let over = Tween::new(0, 5000, 0, 10, Easing::Linear);
    assert_eq!(over.sample(10), PROGRESS_SHOWN);
}

#[test]
fn tween_retarget_continues_from_current_progress() {
    let mut t = Tween::new(0, PROGRESS_SHOWN, 0, 100, Easing::Linear);
    t.retarget(50, 0, 100);
    assert_eq!(t.from, 500);
    assert_eq!(t.sample(50), 500);
    assert_eq!(t.sample(150), 0);
}

#[test]
fn easing_endpoints_are_fixed() {
    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
    ] {
        assert!(easing.sample(0.0).abs() < 1e-6);
        assert!((easing.sample(1.0) - 1.0).abs() < 1e-6);
    }
}

// ---- ListController ----

fn recorder() -> (Arc<Mutex<Vec<LoadRequest<u32>>>>, LoaderOptions<u32>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let options = LoaderOptions::new(5).with_on_load_more(Some(move |r: &LoadRequest<u32>| {
        sink.lock().unwrap().push(r.clone());
    }));
    (log, options)
}

#[test]
fn list_controller_grows_window_and_tags_new_rows() {
    let (log, options) = recorder();
    let mut c = ListController::new(options.with_item_extent(10), OrderDiffOptions::new());
    let order: Vec<u32> = (1..=10).collect();

    {
        let frame = c.render(&order, Some(10));
        assert_eq!(frame.window.ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(frame.diff.tag(&1), Some(TransitionTag::Unchanged));
        assert!(!frame.diff.has_animations());
        assert!(!frame.is_scrolled);
        assert_eq!(frame.status, ListStatus::Ready);
    }

    assert_eq!(c.on_scroll(0, 30, 0), None);
    assert_eq!(c.on_scroll(20, 30, 0), Some(LoadOutcome::Grew));

    {
        let frame = c.render(&order, Some(10));
        assert_eq!(frame.window.len(), 10);
        assert_eq!(frame.diff.tag(&3), Some(TransitionTag::Unchanged));
        assert_eq!(frame.diff.tag(&6), Some(TransitionTag::Added));
        assert_eq!(frame.diff.tag(&10), Some(TransitionTag::Added));
    }

    // The second sample was throttled.
    assert!(!c.is_scrolled());
    assert!(!c.tick(199));
    assert!(c.tick(200));
    assert!(c.is_scrolled());

    assert_eq!(c.on_scroll(60, 40, 400), Some(LoadOutcome::Exhausted));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn list_controller_requests_more_single_flight() {
    let (log, options) = recorder();
    let mut c = ListController::new(options, OrderDiffOptions::new());
    let order: Vec<u32> = (1..=5).collect();
    let _ = c.render(&order, None);

    assert_eq!(c.request_more(Edge::End, 0), LoadOutcome::Requested);
    assert_eq!(c.request_more(Edge::End, 1), LoadOutcome::Pending);
    {
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].edge, Edge::End);
        assert_eq!(log[0].known, 5);
        assert_eq!(log[0].cursor, Some(5));
    }

    c.settle(Edge::End);
    assert_eq!(c.request_more(Edge::End, 2), LoadOutcome::Requested);
    c.mark_exhausted(Edge::End);
    assert_eq!(c.request_more(Edge::End, 3), LoadOutcome::Exhausted);

    let grown: Vec<u32> = (1..=8).collect();
    let _ = c.render(&grown, None);
    assert_eq!(c.request_more(Edge::End, 4), LoadOutcome::Grew);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn list_controller_full_order_scope_sees_hidden_moves() {
    let mut c = ListController::new(LoaderOptions::new(2), OrderDiffOptions::new())
        .with_scope(DiffScope::FullOrder);
    let _ = c.render(&[1u32, 2, 3, 4], None);

    let frame = c.render(&[4, 1, 2, 3], None);
    assert_eq!(frame.window.ids, vec![4, 1]);
    assert_eq!(frame.diff.len(), 4);
    assert_eq!(frame.diff.tag(&4), Some(TransitionTag::MovedUp));
    assert_eq!(frame.diff.tag(&3), Some(TransitionTag::MovedDown));
}

#[test]
fn list_controller_completes_removals_and_resets() {
    let mut c = ListController::new(LoaderOptions::new(5), OrderDiffOptions::new());
    let _ = c.render(&[1u32, 2, 3], None);

    {
        let frame = c.render(&[1, 3], None);
        assert_eq!(frame.diff.tag(&2), Some(TransitionTag::RemovedPending));
        assert_eq!(frame.diff.removed(), &[2]);
    }
    c.complete_removals([&2]);
    assert_eq!(c.order_diff().pending_removals(), 0);
    assert_eq!(c.order_diff().result().tag(&2), None);

    c.reset();
    assert_eq!(c.loader().pages(), 1);
    let frame = c.render(&[5, 1, 3], None);
    assert_eq!(frame.diff.tag(&5), Some(TransitionTag::Unchanged));
}

#[test]
fn list_controller_tells_loading_from_empty() {
    let (_log, options) = recorder();
    let mut c = ListController::new(options, OrderDiffOptions::new());
    assert_eq!(c.render(&[], None).status, ListStatus::Loading);

    c.mark_exhausted(Edge::End);
    assert_eq!(c.render(&[], None).status, ListStatus::Empty);
    assert_eq!(c.render(&[7], None).status, ListStatus::Ready);

    let mut c = ListController::new(LoaderOptions::<u32>::new(5), OrderDiffOptions::new());
    assert_eq!(c.render(&[], Some(0)).status, ListStatus::Empty);
}
