/// View configuration
///
/// Settings a viewer can persist and hand to the view layer. Loaded from JSON;
/// absent fields take their defaults.

use crate::error::ViewError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which sort algorithm a sort view uses when re-sorting.
///
/// Both produce the same order when no two items compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStability {
    /// Equal items keep their current relative order (default).
    ///
    /// Best for: tables where the user sorts by one column after another.
    #[default]
    Stable,

    /// Faster, and sorts in place without an auxiliary buffer, but equal
    /// items may be reordered.
    Unstable,
}

impl FromStr for SortStability {
    type Err = ViewError;

    /// Accepts "stable" or "unstable", ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stable" => Ok(SortStability::Stable),
            "unstable" => Ok(SortStability::Unstable),
            _ => Err(ViewError::Config(format!(
                "unknown sort stability: '{}'. Use 'stable' or 'unstable'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub sort_stability: SortStability,
}

impl ViewConfig {
    pub fn from_json(json: &str) -> Result<Self, ViewError> {
        serde_json::from_str(json).map_err(|e| ViewError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ViewError> {
        serde_json::to_string_pretty(self).map_err(|e| ViewError::Config(e.to_string()))
    }
}
