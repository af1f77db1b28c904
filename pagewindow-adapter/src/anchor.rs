use pagewindow::{Direction, Keyed};
use serde::{Deserialize, Serialize};

/// The entry a load grew the window away from, tracked across the merge.
///
/// A forward load appends after the last held entry and a backward load prepends before the
/// first one. Keeping that entry fixed on screen is what stops the viewport from jumping when the
/// window is extended or trimmed. `index_after` is `None` when the entry was trimmed away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryAnchor {
    pub key: String,
    pub direction: Direction,
    pub index_before: usize,
    pub index_after: Option<usize>,
}

impl BoundaryAnchor {
    /// How many positions the anchor entry moved, if it is still held.
    pub fn shift(&self) -> Option<isize> {
        let after = self.index_after?;
        Some(after as isize - self.index_before as isize)
    }
}

/// Captures the boundary entry for a load in `direction`.
///
/// Returns `None` for an empty window.
pub fn capture_boundary_anchor<E: Keyed>(
    direction: Direction,
    entries: &[E],
) -> Option<BoundaryAnchor> {
    let index_before = match direction {
        Direction::Forward => entries.len().checked_sub(1)?,
        Direction::Backward if entries.is_empty() => return None,
        Direction::Backward => 0,
    };
    Some(BoundaryAnchor {
        key: entries[index_before].key().to_owned(),
        direction,
        index_before,
        index_after: None,
    })
}

/// Looks the anchor up in the merged window and records its new position.
pub fn locate_anchor<E: Keyed>(mut anchor: BoundaryAnchor, entries: &[E]) -> BoundaryAnchor {
    anchor.index_after = entries.iter().position(|e| e.key() == anchor.key);
    anchor
}
