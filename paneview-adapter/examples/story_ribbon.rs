use std::collections::HashMap;

use paneview::{PeerStories, StoryEntry};
use paneview_adapter::{HeavyAnimations, RibbonOptions, RibbonSlide, RibbonToggler};

fn main() {
    // Example: the collapsed story ribbon with preview avatars.
    let me = 1u32;
    let peers = [me, 7, 3, 9, 4, 12, 5];

    let mut stories: HashMap<u32, PeerStories<u64>> = HashMap::new();
    stories.insert(
        3,
        PeerStories::new(vec![100, 101], Some(100)).with_entry(101, StoryEntry { privileged: true }),
    );

    let mut ribbon = RibbonToggler::new(
        RibbonOptions::new()
            .with_on_preload(Some(|ids: &[u32]| println!("preload {ids:?}")))
            .with_on_slide(Some(|slide: RibbonSlide| println!("slide {slide:?}"))),
        HeavyAnimations::new(),
    );

    ribbon.preload(&peers);
    let preview = ribbon.preview(&peers, &me, |_| true, |p| stories.get(p));
    for peer in &preview.peers {
        println!(
            "avatar {peer} privileged_ring={}",
            preview.unseen_privileged.get(peer).copied().unwrap_or(false)
        );
    }

    ribbon.set_can_show(true);
    ribbon.set_shown(true);
    let mut now_ms = 0u64;
    loop {
        let done = ribbon.tick(now_ms);
        println!("t={now_ms} progress={}", ribbon.progress(now_ms));
        if done {
            break;
        }
        now_ms += 50;
    }
}
