/// Sorted Table Example
///
/// This example demonstrates:
/// - Loading view settings from JSON
/// - Sorting a merged view by a column, then by another
/// - Mapping sorted rows back to their source positions
/// - Reusing a sort view for new data

use itemview::{merge_items, ItemContainer, ItemView, SortedItems, TimelineId, Track, TrackId, ViewConfig};

#[derive(Debug, Clone)]
struct Goroutine {
    id: u64,
    state: &'static str,
    runtime_us: u64,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== ItemView Sorted Table Example ===\n");

    let config = match ViewConfig::from_json(r#"{"sort_stability": "stable"}"#) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    println!("1. Config: {:?}", config.sort_stability);

    let left = Track::from_vec(
        ItemContainer::new(TimelineId(0), TrackId(0)),
        vec![
            Goroutine { id: 1, state: "running", runtime_us: 420 },
            Goroutine { id: 3, state: "waiting", runtime_us: 15 },
            Goroutine { id: 5, state: "running", runtime_us: 99 },
        ],
    );
    let right = Track::from_vec(
        ItemContainer::new(TimelineId(0), TrackId(1)),
        vec![
            Goroutine { id: 2, state: "waiting", runtime_us: 230 },
            Goroutine { id: 4, state: "running", runtime_us: 15 },
        ],
    );

    let table = match merge_items(vec![left.items(), right.items()], |a: &Goroutine, b| a.id.cmp(&b.id)) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("merge failed: {}", e);
            return;
        }
    };

    let mut sorted = match SortedItems::new(table) {
        Ok(sorted) => sorted,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    // 2. Sort by runtime, then by state; the stable sort keeps runtime order within a state
    println!("\n2. Sorting by runtime, then state...");
    sorted.sort_configured(&config, |a, b| a.runtime_us.cmp(&b.runtime_us));
    sorted.sort_configured(&config, |a, b| a.state.cmp(b.state));

    println!("   {:>3} {:<8} {:>8}  source", "id", "state", "runtime");
    for i in 0..sorted.len() {
        let g = sorted.at_ptr(i);
        println!(
            "   {:>3} {:<8} {:>6}us  row {} of {}",
            g.id,
            g.state,
            g.runtime_us,
            sorted.map(i),
            sorted.container_at(i)
        );
    }

    // 3. Keep the top rows as a slice, then re-sort the live view
    let top = sorted.slice(0, 2);
    sorted.sort_configured(&config, |a, b| b.id.cmp(&a.id));
    let top_ids: Vec<u64> = top.iter().map(|g| g.id).collect();
    let live_ids: Vec<u64> = sorted.iter().map(|g| g.id).collect();
    println!("\n3. Slice taken before re-sort: {:?}", top_ids);
    println!("   Live view after re-sort:     {:?}", live_ids);

    // 4. Point the sort view at a single track
    if let Err(e) = sorted.reset(right.items()) {
        eprintln!("{}", e);
        return;
    }
    println!("\n4. Reset to {} rows of {:?}", sorted.len(), sorted.container());

    println!("\n=== Example Complete ===");
}
