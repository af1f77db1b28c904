use serde::{Deserialize, Serialize};

/// Which edge of the window a load extends.
///
/// `Forward` appends toward increasing virtual indexes, `Backward` prepends toward decreasing
/// ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// The `[start, end)` extent of the window inside the virtual dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Boundaries {
    pub start: u64,
    pub end: u64, // exclusive
}

impl Boundaries {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of virtual indexes covered. Saturates to 0 for inverted boundaries.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Exhaustion flags.
///
/// `beginning_of_results` mirrors `start == 0`; `end_of_results` is either reported by the data
/// source or inferred by the merge step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    pub beginning_of_results: bool,
    pub end_of_results: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            beginning_of_results: true,
            end_of_results: false,
        }
    }
}

/// Distance from the scroll edges (in the host's scroll units) at which a load triggers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadThreshold {
    pub top: f64,
    pub bottom: f64,
}

impl Default for LoadThreshold {
    fn default() -> Self {
        Self {
            top: 1.0,
            bottom: 1.0,
        }
    }
}

/// Scroll geometry of the scrollable element at the time of a scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSnapshot {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub offset_height: f64,
}

impl ScrollSnapshot {
    pub fn new(scroll_top: f64, scroll_height: f64, offset_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            offset_height,
        }
    }

    /// Largest reachable `scroll_top` for this geometry.
    pub fn max_scroll_top(&self) -> f64 {
        self.scroll_height - self.offset_height
    }
}

/// Caller-defined query parameters forwarded to the data source with every request.
pub type QueryParams = serde_json::Map<String, serde_json::Value>;
