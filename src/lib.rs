/// ItemView - Composable Indexed Views over Track Items
///
/// Random-access views over items that live in caller-owned storage. Views
/// compose: merge several sorted tracks into one timeline, filter it, sort it
/// by another key, slice any of them, and every result is again a view with
/// O(1) or O(log k) positional access that hands back references into the
/// original storage.
///
/// Views are single-threaded and never copy items. Bookkeeping (merge
/// permutations, subset positions, sort orders) is shared between a view and
/// its slices.

pub mod config;
pub mod container;
pub mod error;
pub mod items;
pub mod merge;
pub mod simple;
pub mod sorted;
pub mod subset;
pub mod track;

pub use config::{SortStability, ViewConfig};
pub use container::{ItemContainer, TimelineId, TrackId};
pub use error::ViewError;
pub use items::{ItemView, Items, Iter};
pub use merge::{merge_items, merge_items_by, merge_items_by_key, MergedItems};
pub use simple::{NoItems, SimpleItems};
pub use sorted::SortedItems;
pub use subset::{filter_items, ItemsSubset};
pub use track::Track;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Event {
        start: u64,
        duration: u64,
    }

    fn tracks() -> Vec<Track<Event>> {
        let starts: [&[u64]; 3] = [&[1, 4, 9], &[2, 7], &[0, 3, 5, 8]];
        starts
            .iter()
            .enumerate()
            .map(|(i, starts)| {
                let mut track = Track::new(ItemContainer::new(TimelineId(0), TrackId(i as u32)));
                for &start in starts.iter() {
                    track
                        .push_sorted(Event { start, duration: 10 - start }, |a, b| a.start.cmp(&b.start))
                        .unwrap();
                }
                track
            })
            .collect()
    }

    fn starts<'a, V: ItemView<'a, Event>>(view: &V) -> Vec<u64> {
        view.iter().map(|e| e.start).collect()
    }

    #[test]
    fn test_complete_workflow() {
        let tracks = tracks();

        // Merge three tracks of 3, 2 and 4 events into one timeline
        let timeline = merge_items_by_key(tracks.iter().map(|t| t.items()), |e: &Event| e.start).unwrap();
        assert_eq!(timeline.len(), 9);
        assert_eq!(starts(&timeline), (0..10).filter(|&s| s != 6).collect::<Vec<_>>());
        // Tracks differ, so the merged view has no single container
        assert_eq!(timeline.container(), None);

        // Every item still knows which track it came from
        for i in 0..timeline.len() {
            let event = timeline.at_ptr(i);
            let owner = tracks
                .iter()
                .find(|t| t.as_slice().as_ptr_range().contains(&(event as *const Event)))
                .unwrap();
            assert_eq!(timeline.container_at(i), owner.container());
        }

        // Keep the long events, then order them by duration
        let long = filter_items(timeline.clone(), |e| e.duration >= 5);
        assert_eq!(starts(&long), vec![0, 1, 2, 3, 4, 5]);

        let mut by_duration = SortedItems::new(long).unwrap();
        by_duration.sort_by(|a, b| a.duration.cmp(&b.duration));
        assert_eq!(starts(&by_duration), vec![5, 4, 3, 2, 1, 0]);

        // The first two in that order live on different tracks
        let top = by_duration.slice(0, 2);
        assert_eq!(top.container(), None);
        assert_eq!(top.container_at(0), tracks[2].container());
        assert_eq!(top.container_at(1), tracks[0].container());
    }

    #[test]
    fn test_merge_across_timelines_has_no_container() {
        let a = Track::from_vec(ItemContainer::new(TimelineId(1), TrackId(0)), vec![1, 3]);
        let b = Track::from_vec(ItemContainer::new(TimelineId(2), TrackId(0)), vec![2]);

        let merged = merge_items(vec![a.items(), b.items()], |x: &i32, y| x.cmp(y)).unwrap();
        assert_eq!(merged.container(), None);
        assert_eq!(merged.slice(1, 2).container(), Some(b.container()));
    }

    #[test]
    fn test_remerge_stays_flat() {
        let tracks = tracks();
        let by_start = |e: &Event| e.start;

        let first_two = merge_items_by_key(vec![tracks[0].items(), tracks[1].items()], by_start).unwrap();
        let all = merge_items_by_key(vec![first_two.clone(), tracks[2].items()], by_start).unwrap();
        let again = merge_items_by_key(vec![all.clone(), Items::Empty], by_start).unwrap();

        match &all {
            Items::Merged(m) => assert_eq!(m.bases().len(), 3),
            other => panic!("expected a merged view, got {}", other.kind()),
        }
        // A single non-empty source comes back unchanged
        assert_eq!(again.kind(), "merged");
        assert_eq!(starts(&again), starts(&all));

        // Merging a window of a merge still resolves to the tracks directly
        let window = all.slice(2, 6);
        let rest = tracks[1].items_in(0, 1).unwrap();
        let remerged = merge_items_by_key(vec![window, rest], by_start).unwrap();
        assert_eq!(starts(&remerged), vec![2, 2, 3, 4, 5]);
        if let Items::Merged(m) = &remerged {
            assert!(m.bases().iter().all(|b| b.kind() == "simple"));
        }
    }

    #[test]
    fn test_filter_identity() {
        let tracks = tracks();
        let timeline = merge_items_by_key(tracks.iter().map(|t| t.items()), |e: &Event| e.start).unwrap();

        let all = filter_items(timeline.clone(), |_| true);
        assert_eq!(all.kind(), "merged");
        assert_eq!(starts(&all), starts(&timeline));

        assert!(filter_items(timeline, |_| false).is_sentinel());
    }

    #[test]
    fn test_slices_compose() {
        let tracks = tracks();
        let timeline = merge_items_by_key(tracks.iter().map(|t| t.items()), |e: &Event| e.start).unwrap();

        let outer = timeline.slice(1, 8);
        let inner = outer.slice(2, 5);
        assert_eq!(starts(&inner), starts(&timeline.slice(3, 6)));
        for i in 0..inner.len() {
            assert!(std::ptr::eq(inner.at_ptr(i), timeline.at_ptr(i + 3)));
        }
    }

    #[test]
    fn test_configured_sort() {
        let track = Track::from_vec(ItemContainer::NONE, vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);
        let config = ViewConfig::from_json(r#"{"sort_stability": "stable"}"#).unwrap();

        let mut sorted = SortedItems::new(track.items()).unwrap();
        sorted.sort_configured(&config, |a, b| a.0.cmp(&b.0));
        let tags: String = sorted.iter().map(|p| p.1).collect();
        assert_eq!(tags, "bdac");
    }
}
