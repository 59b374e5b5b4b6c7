use paneview::{PanelPhase, TextDirection};
use paneview_adapter::{
    CaptureGuard, CaptureOptions, GestureCapture, GestureCloser, GestureCloserOptions,
    HeavyAnimations, PanelCoordinator, PanelOptions, SwipeOrigin,
};

struct PrintCapture;

impl GestureCapture for PrintCapture {
    fn register(&mut self, options: &CaptureOptions) -> CaptureGuard {
        println!("capture registered (exclude={:?})", options.exclude_selector);
        CaptureGuard::new(|| println!("capture released"))
    }
}

fn main() {
    // Example: a slide-in panel driven by a frame loop.
    //
    // An adapter would:
    // - forward store flags with set_open / set_hidden
    // - call flush_mutations(now_ms) at the next paint and apply transform()
    // - report the renderer's transition end (or rely on tick's fallback)
    let heavy = HeavyAnimations::new();
    let mut panel = PanelCoordinator::new(
        PanelOptions::new(250)
            .with_on_open(Some(|| println!("opened")))
            .with_on_close_animation_end(Some(|| println!("closed"))),
        heavy.clone(),
    );
    let mut closer = GestureCloser::new(
        GestureCloserOptions::new(TextDirection::Ltr)
            .with_exclude_selector(".list")
            .with_on_close(Some(|| println!("swipe close requested"))),
    );
    let mut capture = PrintCapture;

    panel.set_open(true);
    let mut now_ms = 0u64;
    while panel.phase() != PanelPhase::Open {
        now_ms += 16;
        panel.flush_mutations(now_ms);
        closer.sync(panel.phase(), &mut capture);
        // No transition-end events here: the fallback completes the phase.
        panel.tick(now_ms);
        if now_ms % 80 == 0 {
            println!(
                "t={now_ms} phase={:?} heavy={}",
                panel.phase(),
                heavy.is_animating()
            );
        }
    }

    closer.on_drag(60.0, 4.0, SwipeOrigin::Root);
    panel.set_open(false);
    closer.sync(panel.phase(), &mut capture);
    panel.flush_mutations(now_ms);
    panel.on_transition_end();
    println!("final phase={:?} heavy={}", panel.phase(), heavy.active_count());
}
