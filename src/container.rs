/// Item containers
///
/// An `ItemContainer` names the single logical owner of a run of items: the
/// timeline a track belongs to and the track itself. The default value owns
/// nothing and stands for "no single container".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a timeline (one goroutine, processor, or similar row group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimelineId(pub u32);

/// Identifier of a track within its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ItemContainer {
    pub timeline: Option<TimelineId>,
    pub track: Option<TrackId>,
}

impl ItemContainer {
    /// The container that owns nothing.
    pub const NONE: ItemContainer = ItemContainer {
        timeline: None,
        track: None,
    };

    pub fn new(timeline: TimelineId, track: TrackId) -> Self {
        ItemContainer {
            timeline: Some(timeline),
            track: Some(track),
        }
    }

    /// A container for items that belong to a timeline but to no particular track.
    pub fn timeline(timeline: TimelineId) -> Self {
        ItemContainer {
            timeline: Some(timeline),
            track: None,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for ItemContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.timeline, self.track) {
            (None, None) => write!(f, "<none>"),
            (Some(tl), None) => write!(f, "timeline {}", tl.0),
            (None, Some(tr)) => write!(f, "track {}", tr.0),
            (Some(tl), Some(tr)) => write!(f, "timeline {} / track {}", tl.0, tr.0),
        }
    }
}
