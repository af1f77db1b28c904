use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::key::Keyed;
use crate::options::{LoadOptions, ResolvedLoadOptions};
use crate::response::{Page, validate_response};
use crate::source::{PageRequest, PageSource};
use crate::state::WindowState;
use crate::{Boundaries, Direction, Flags, QueryParams};

/// The range a load will request, computed before anything is fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestPlan {
    pub direction: Direction,
    /// First requested index. Negative when a backward load runs past the dataset head.
    pub start_point: i64,
    /// Requested length: the in-rush size for a nearly empty window, `packet_size` otherwise.
    pub size: usize,
}

impl RequestPlan {
    pub fn end_point(&self) -> i64 {
        self.start_point.saturating_add(self.size as i64)
    }

    pub fn request(&self, params: &QueryParams) -> PageRequest {
        PageRequest::new(self.start_point, self.end_point(), params)
    }
}

/// Computes the next request range.
///
/// Forward loads start at `boundaries.end`. Backward loads end at `boundaries.start`, so they
/// start `size` indexes before it.
pub fn plan_request(
    direction: Direction,
    held: usize,
    boundaries: Boundaries,
    options: &ResolvedLoadOptions,
) -> RequestPlan {
    let size = options.adaptive_packet_size(held);
    let start_point = match direction {
        Direction::Forward => to_point(boundaries.end),
        Direction::Backward => to_point(boundaries.start).saturating_sub(size as i64),
    };
    RequestPlan {
        direction,
        start_point,
        size,
    }
}

// Seeded boundaries are not range-checked like response boundaries; saturate instead of wrapping.
fn to_point(boundary: u64) -> i64 {
    i64::try_from(boundary).unwrap_or(i64::MAX)
}

/// Counters describing a single merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entries in the validated response.
    pub fetched: usize,
    /// Fetched entries dropped because their key was already held (or repeated in the page).
    pub duplicates: usize,
    /// Entries cut from the far edge of the window to respect `load_size`.
    pub trimmed: usize,
}

/// The state produced by a successful load. Applying it is up to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOutcome<E> {
    pub entries: Vec<E>,
    pub boundaries: Boundaries,
    pub flags: Flags,
    pub loading: bool,
    pub launched: bool,
    pub empty: bool,
    /// The response payload as returned by the data source.
    pub raw: Value,
    pub stats: MergeStats,
}

impl<E> LoadOutcome<E> {
    /// Writes this outcome into `state`, replacing the window.
    pub fn apply_to(self, state: &mut WindowState<E>) -> Value {
        state.entries = self.entries;
        state.boundaries = self.boundaries;
        state.flags = self.flags;
        state.loading = self.loading;
        state.launched = self.launched;
        state.empty = self.empty;
        self.raw
    }
}

/// Merges a validated page into the held window.
///
/// Steps, all computed against the window as it was before the load:
/// 1. drop fetched entries whose key is already held
/// 2. append (forward) or prepend (backward) the survivors
/// 3. trim to `load_size` from the edge opposite to the load, unless bypassed
/// 4. recompute boundaries and exhaustion flags
pub fn merge_page<E>(
    state: &WindowState<E>,
    plan: &RequestPlan,
    page: Page<E>,
    options: &ResolvedLoadOptions,
) -> LoadOutcome<E>
where
    E: Keyed + Clone,
{
    let Page {
        boundaries: reported,
        end_of_results: reported_end,
        entries: fetched,
        raw,
    } = page;
    let previous = state.boundaries;
    let fetched_len = fetched.len();

    let incoming = {
        let held: HashSet<&str> = state.entries.iter().map(Keyed::key).collect();
        let mut seen = HashSet::with_capacity(fetched_len);
        fetched
            .into_iter()
            .filter(|e| !held.contains(e.key()) && seen.insert(e.key().to_owned()))
            .collect::<Vec<_>>()
    };
    let duplicates = fetched_len - incoming.len();

    let mut merged = Vec::with_capacity(state.entries.len() + incoming.len());
    match plan.direction {
        Direction::Forward => {
            merged.extend(state.entries.iter().cloned());
            merged.extend(incoming);
        }
        Direction::Backward => {
            merged.extend(incoming);
            merged.extend(state.entries.iter().cloned());
        }
    }

    let overlap = match options.capacity() {
        Some(capacity) => merged.len().saturating_sub(capacity),
        None => 0,
    };
    if overlap > 0 {
        match plan.direction {
            Direction::Forward => {
                merged.drain(..overlap);
            }
            Direction::Backward => merged.truncate(options.load_size),
        }
    }

    // Only the edge the load extended is reported accurately by the source. The opposite edge
    // moves by the trimmed amount once the window is past the first packet.
    let kept = merged.len();
    let beyond_packet = kept > plan.size;
    let forward = plan.direction.is_forward();
    let (start, end) = if options.bypass_load_size {
        let start = if !forward || !beyond_packet {
            reported.start
        } else {
            previous.start
        };
        let end = if forward || !beyond_packet {
            reported.end
        } else {
            previous.end
        };
        (start, end)
    } else {
        let start = if forward && beyond_packet {
            previous.start.saturating_add(overlap as u64)
        } else {
            reported.start
        };
        let end = if !forward && beyond_packet {
            previous.end.saturating_sub(overlap as u64)
        } else {
            reported.end
        };
        (start, end)
    };

    let end_of_results = match plan.direction {
        Direction::Forward => reported_end,
        // Nothing behind and nothing held: the request was either entirely before index 0 (no
        // information) or past the live dataset, which also means nothing lies ahead.
        Direction::Backward if merged.is_empty() => plan.end_point() > 0,
        Direction::Backward if overlap > 0 => false,
        Direction::Backward => state.flags.end_of_results,
    };

    let boundaries = Boundaries { start, end };
    let flags = Flags {
        beginning_of_results: start == 0,
        end_of_results,
    };
    let stats = MergeStats {
        fetched: fetched_len,
        duplicates,
        trimmed: overlap,
    };
    pdebug!(
        direction = ?plan.direction,
        fetched = stats.fetched,
        duplicates = stats.duplicates,
        trimmed = stats.trimmed,
        len = merged.len(),
        start,
        end,
        beginning_of_results = flags.beginning_of_results,
        end_of_results = flags.end_of_results,
        "merged page"
    );

    LoadOutcome {
        empty: merged.is_empty(),
        entries: merged,
        boundaries,
        flags,
        loading: false,
        launched: true,
        raw,
        stats,
    }
}

/// Loads one page in `direction` and merges it into a copy of `state`.
///
/// Options are resolved first and the response is validated in full before merging, so any
/// error leaves nothing half-applied. `state` itself is never modified.
pub async fn fetch_page<S, E>(
    source: &S,
    direction: Direction,
    state: &WindowState<E>,
    options: &LoadOptions,
    params: &QueryParams,
) -> Result<LoadOutcome<E>>
where
    S: PageSource,
    E: Keyed + Clone + DeserializeOwned,
{
    let resolved = match options.resolve() {
        Ok(resolved) => resolved,
        Err(err) => {
            pwarn!(error = %err, "rejected load options");
            return Err(err.into());
        }
    };

    let plan = plan_request(direction, state.entries.len(), state.boundaries, &resolved);
    let request = plan.request(params);
    ptrace!(
        direction = ?direction,
        start = request.start,
        end = request.end,
        held = state.entries.len(),
        "requesting page"
    );

    let raw = source.fetch(request).await.map_err(Error::Transport)?;
    let page = validate_response::<E>(raw)?;
    Ok(merge_page(state, &plan, page, &resolved))
}
