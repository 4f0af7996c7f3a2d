/// Merge Tracks Example
///
/// This example demonstrates:
/// - Minting base views from tracks
/// - Merging several tracks into one timeline
/// - Filtering the timeline and slicing the result
/// - Re-merging a merged view without nesting
///
/// Run with `RUST_LOG=debug` to see merge construction.

use itemview::{filter_items, merge_items_by_key, ItemContainer, ItemView, Items, TimelineId, Track, TrackId};

#[derive(Debug, Clone)]
struct Span {
    start_ns: u64,
    name: &'static str,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("=== ItemView Merge Example ===\n");

    // 1. Fill three tracks, each sorted by start time
    println!("1. Creating tracks...");
    let raw: [&[(u64, &'static str)]; 3] = [
        &[(0, "runtime.main"), (40, "gc"), (90, "netpoll")],
        &[(10, "http.Serve"), (55, "json.Marshal")],
        &[(5, "syscall.Read"), (30, "syscall.Write"), (70, "futex"), (95, "exit")],
    ];

    let mut tracks = Vec::new();
    for (i, spans) in raw.iter().enumerate() {
        let mut track = Track::new(ItemContainer::new(TimelineId(1), TrackId(i as u32)));
        for &(start_ns, name) in spans.iter() {
            if let Err(e) = track.push_sorted(Span { start_ns, name }, |a, b| a.start_ns.cmp(&b.start_ns)) {
                eprintln!("   skipping {}: {}", name, e);
            }
        }
        println!("   track {} holds {} spans", i, track.len());
        tracks.push(track);
    }

    // 2. Merge them into a single timeline
    println!("\n2. Merging tracks...");
    let timeline = match merge_items_by_key(tracks.iter().map(|t| t.items()), |s: &Span| s.start_ns) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("merge failed: {}", e);
            return;
        }
    };
    println!("   timeline has {} spans ({} view)", timeline.len(), timeline.kind());
    for (i, span) in timeline.iter().enumerate() {
        println!("   {:>3}ns  {:<14} {}", span.start_ns, span.name, timeline.container_at(i));
    }

    // 3. Keep only syscalls
    println!("\n3. Filtering syscalls...");
    let syscalls = filter_items(timeline.clone(), |s| s.name.starts_with("syscall"));
    println!("   {} of {} spans match ({} view)", syscalls.len(), timeline.len(), syscalls.kind());
    match syscalls.container() {
        Some(container) => println!("   all from {}", container),
        None => println!("   from several containers"),
    }

    // 4. Merge a window of the timeline with another track
    println!("\n4. Re-merging a window...");
    let window = timeline.slice(2, 6);
    let extra = Track::from_vec(
        ItemContainer::new(TimelineId(1), TrackId(9)),
        vec![Span { start_ns: 20, name: "sched" }],
    );
    match merge_items_by_key(vec![window, extra.items(), Items::Empty], |s: &Span| s.start_ns) {
        Ok(remerged) => {
            let names: Vec<&str> = remerged.iter().map(|s| s.name).collect();
            println!("   {:?}", names);
        }
        Err(e) => eprintln!("merge failed: {}", e),
    }

    println!("\n=== Example Complete ===");
}
