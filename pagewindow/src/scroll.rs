use crate::{Direction, Flags, LoadThreshold, ScrollSnapshot};

/// Decides whether a scroll position calls for a load, and in which direction.
///
/// - `Forward` when the viewport is within `threshold.bottom` of the bottom and the end of the
///   dataset has not been reached.
/// - Otherwise `Backward` when within `threshold.top` of the top and the beginning has not been
///   reached.
///
/// Forward wins when both hold, e.g. for content shorter than the viewport.
pub fn resolve_direction(
    flags: Flags,
    threshold: LoadThreshold,
    snapshot: ScrollSnapshot,
) -> Option<Direction> {
    if snapshot.scroll_top >= snapshot.max_scroll_top() - threshold.bottom && !flags.end_of_results
    {
        Some(Direction::Forward)
    } else if snapshot.scroll_top <= threshold.top && !flags.beginning_of_results {
        Some(Direction::Backward)
    } else {
        None
    }
}
