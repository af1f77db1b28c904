use std::collections::HashSet;

use crate::Boundaries;
use crate::key::Keyed;

/// Inserts `incoming` at `index` (default: the end of the window).
///
/// Entries whose key is already held are dropped, as are repeated keys within `incoming`; held
/// entries always win. `index` is clamped to the window length. Boundaries are not touched.
pub fn insert_entries<E, I>(mut window: Vec<E>, incoming: I, index: Option<usize>) -> Vec<E>
where
    E: Keyed,
    I: IntoIterator<Item = E>,
{
    let survivors: Vec<E> = {
        let mut seen: HashSet<String> = window.iter().map(|e| e.key().to_owned()).collect();
        incoming
            .into_iter()
            .filter(|e| seen.insert(e.key().to_owned()))
            .collect()
    };
    if survivors.is_empty() {
        return window;
    }

    let at = index.unwrap_or(window.len()).min(window.len());
    pdebug!(inserted = survivors.len(), at, "inserting entries");
    window.splice(at..at, survivors);
    window
}

/// Removes every held entry whose key is in `keys`.
///
/// `boundaries.end` moves back by the number of entries actually removed; `boundaries.start` is
/// kept, as removals are assumed to come from the body or tail of the window. Keys that are not
/// held are ignored.
pub fn remove_entries<E, K>(
    mut window: Vec<E>,
    keys: &[K],
    boundaries: Boundaries,
) -> (Vec<E>, Boundaries)
where
    E: Keyed,
    K: AsRef<str>,
{
    let keys: HashSet<&str> = keys.iter().map(AsRef::as_ref).collect();
    let before = window.len();
    window.retain(|e| !keys.contains(e.key()));
    let removed = before - window.len();
    if removed > 0 {
        pdebug!(removed, "removed entries");
    }

    let boundaries = Boundaries {
        start: boundaries.start,
        end: boundaries.end.saturating_sub(removed as u64),
    };
    (window, boundaries)
}
