use std::sync::{Arc, Mutex};

use paneview::{Edge, LoadRequest, LoaderOptions, WindowedLoader};

fn main() {
    // Example: a feed that shows 5 rows per page and asks for more when the end is reached.
    let requests: Arc<Mutex<Vec<LoadRequest<u32>>>> = Arc::default();
    let sink = Arc::clone(&requests);
    let options = LoaderOptions::new(5)
        .with_item_extent(48)
        .with_on_load_more(Some(move |r: &LoadRequest<u32>| {
            sink.lock().unwrap().push(r.clone());
        }));
    let mut loader = WindowedLoader::new(options);

    let mut order: Vec<u32> = (1..=8).collect();
    let mut now_ms = 0u64;
    for _ in 0..4 {
        let window = loader.compute_window(&order, None);
        println!("window={:?} offset={}", window.ids, window.offset);

        now_ms += 16;
        let outcome = loader.request_more(Edge::End, now_ms);
        println!("  request_more -> {outcome:?}");

        // The data source answers by publishing a longer order.
        if loader.is_pending(Edge::End) {
            let next = order.len() as u32 + 1;
            order.extend(next..next + 5);
        }
    }

    println!("load requests: {:?}", requests.lock().unwrap());
}
