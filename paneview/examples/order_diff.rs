use paneview::{OrderDiff, TransitionTag};

fn main() {
    // Example: tag a reordered chat list so rows can slide instead of jumping.
    let mut d = OrderDiff::default();
    d.update(&["A", "B", "C"]);

    let r = d.update(&["C", "A", "D"]);
    for id in ["A", "B", "C", "D"] {
        println!("{id}: {:?} delta={}", r.tag(&id), r.index_delta(&id));
    }

    // "B" keeps playing its exit animation until the renderer reports it finished.
    assert_eq!(r.tag(&"B"), Some(TransitionTag::RemovedPending));
    d.complete_removal(&"B");
    println!("pending removals after completion: {}", d.pending_removals());
}
