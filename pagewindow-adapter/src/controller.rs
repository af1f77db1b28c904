use std::cell::{Cell, Ref, RefCell};
use std::mem;

use pagewindow::{
    ConfigError, Direction, Entry, Error, Keyed, PageSource, PartialState, ScrollSnapshot,
    WindowState, fetch_page, insert_entries, remove_entries, resolve_direction, validate_setup,
};
use serde::de::DeserializeOwned;

use crate::{BoundaryAnchor, ControllerOptions, capture_boundary_anchor, locate_anchor};

/// An event the controller can react to.
#[derive(Clone, Debug, PartialEq)]
pub enum Request<E = Entry> {
    /// The first load, unless launching is deferred.
    Launch,
    /// The host reported a scroll position.
    Scroll(ScrollSnapshot),
    /// Loads one page in the given direction, regardless of scroll position.
    LoadMore(Direction),
    /// Resets the window to its default state and loads from the dataset head.
    Search,
    /// Overrides part of the state, or resets it entirely with `None`.
    Mutate(Option<PartialState<E>>),
    Insert {
        entries: Vec<E>,
        index: Option<usize>,
    },
    Remove {
        keys: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Another load is in flight.
    Busy,
    /// The scroll position is not within a threshold of an open edge.
    NoDirection,
    /// `defer_launch` is set.
    Deferred,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The request changed the state. Loads on a non-empty window report the boundary entry
    /// they grew away from.
    Applied { anchor: Option<BoundaryAnchor> },
    Skipped(SkipReason),
    /// The load failed and was reported to the error handler. The window is unchanged.
    Failed,
}

/// Marks a load as in flight for as long as it is alive.
///
/// Dropping it, including by dropping the load future half-way, releases the lock and clears
/// the `loading` flag.
struct InFlight<'a, E> {
    lock: &'a Cell<bool>,
    state: &'a RefCell<WindowState<E>>,
}

impl<'a, E> InFlight<'a, E> {
    fn acquire(lock: &'a Cell<bool>, state: &'a RefCell<WindowState<E>>) -> Option<Self> {
        if lock.replace(true) {
            return None;
        }
        if let Ok(mut state) = state.try_borrow_mut() {
            state.loading = true;
        }
        Some(Self { lock, state })
    }
}

impl<E> Drop for InFlight<'_, E> {
    fn drop(&mut self) {
        self.lock.set(false);
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.loading = false;
        }
    }
}

/// Drives a [`WindowState`] from host events.
///
/// The controller owns the window and serializes loads: while one is in flight, every other
/// load request is skipped with [`SkipReason::Busy`]. Mutations (`Mutate`, `Insert`, `Remove`)
/// are never blocked; a load that was already in flight still applies its result when it
/// completes.
///
/// All operations take `&self`, so the controller can be shared between tasks of a
/// single-threaded executor.
///
/// The controller never re-reads scroll geometry on its own. After a load, an insert or a
/// removal has been applied and the host has re-rendered, the host should send its current
/// [`ScrollSnapshot`] again through [`Request::Scroll`]: while the viewport is still within a
/// threshold of an open edge, that triggers the next load. Stop when the outcome is no longer
/// [`Outcome::Applied`].
pub struct Controller<S, E = Entry> {
    options: ControllerOptions<S, E>,
    state: RefCell<WindowState<E>>,
    in_flight: Cell<bool>,
}

impl<S, E> Controller<S, E>
where
    S: PageSource,
    E: Keyed + Clone + DeserializeOwned,
{
    /// Builds a controller and its initial window.
    ///
    /// `loading` starts as `!defer_launch` unless the seed sets it. With `strict_validation`,
    /// the setup is checked first and any problem is returned.
    pub fn new(options: ControllerOptions<S, E>) -> Result<Self, ConfigError> {
        let mut state = WindowState {
            loading: !options.defer_launch,
            ..WindowState::default()
        };
        if let Some(initial) = options.initial.clone() {
            state.apply_partial(initial);
        }

        if options.strict_validation {
            validate_setup(&options.load, options.load_threshold, &state)?;
        }

        Ok(Self {
            options,
            state: RefCell::new(state),
            in_flight: Cell::new(false),
        })
    }

    pub fn options(&self) -> &ControllerOptions<S, E> {
        &self.options
    }

    /// Borrows the current window. Do not hold it across an `.await` on this controller.
    pub fn state(&self) -> Ref<'_, WindowState<E>> {
        self.state.borrow()
    }

    /// Clones the current window.
    pub fn snapshot(&self) -> WindowState<E> {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.get() || self.state.borrow().loading
    }

    pub async fn dispatch(&self, request: Request<E>) -> Outcome {
        match request {
            Request::Launch => self.launch().await,
            Request::Scroll(snapshot) => self.on_scroll(snapshot).await,
            Request::LoadMore(direction) => self.load_more(direction).await,
            Request::Search => self.search().await,
            Request::Mutate(partial) => self.mutate_state(partial),
            Request::Insert { entries, index } => self.insert(entries, index),
            Request::Remove { keys } => self.remove(keys.as_slice()),
        }
    }

    /// Runs the first forward load, unless `defer_launch` is set.
    pub async fn launch(&self) -> Outcome {
        if self.options.defer_launch {
            adebug!("launch deferred");
            return Outcome::Skipped(SkipReason::Deferred);
        }
        self.load_more(Direction::Forward).await
    }

    /// Loads in the direction the scroll position calls for, if any.
    ///
    /// Scroll events that arrive while the window is loading are dropped.
    pub async fn on_scroll(&self, snapshot: ScrollSnapshot) -> Outcome {
        if self.is_loading() {
            return Outcome::Skipped(SkipReason::Busy);
        }
        let flags = self.state.borrow().flags;
        match resolve_direction(flags, self.options.load_threshold, snapshot) {
            Some(direction) => self.load_more(direction).await,
            None => {
                adebug!(scroll_top = snapshot.scroll_top, "scroll ignored: no edge in reach");
                Outcome::Skipped(SkipReason::NoDirection)
            }
        }
    }

    pub async fn load_more(&self, direction: Direction) -> Outcome {
        let Some(guard) = InFlight::acquire(&self.in_flight, &self.state) else {
            adebug!(direction = ?direction, "load skipped: another load is in flight");
            return Outcome::Skipped(SkipReason::Busy);
        };
        self.run_load(guard, direction).await
    }

    /// Resets the window to its default state and loads from the dataset head.
    ///
    /// The reset only happens once the in-flight lock is taken, so a busy controller keeps its
    /// window.
    pub async fn search(&self) -> Outcome {
        let Some(guard) = InFlight::acquire(&self.in_flight, &self.state) else {
            adebug!("search skipped: another load is in flight");
            return Outcome::Skipped(SkipReason::Busy);
        };
        *self.state.borrow_mut() = WindowState {
            loading: true,
            ..WindowState::default()
        };
        self.run_load(guard, Direction::Forward).await
    }

    /// Alias of [`Controller::search`].
    pub async fn reset(&self) -> Outcome {
        self.search().await
    }

    /// Overrides the fields set in `partial`. `None` resets the window to its default state.
    pub fn mutate_state(&self, partial: Option<PartialState<E>>) -> Outcome {
        let mut state = self.state.borrow_mut();
        match partial {
            Some(partial) => state.apply_partial(partial),
            None => *state = WindowState::default(),
        }
        Outcome::Applied { anchor: None }
    }

    /// Inserts entries at `index` (default: the end), skipping keys already held.
    pub fn insert(&self, entries: Vec<E>, index: Option<usize>) -> Outcome {
        let mut state = self.state.borrow_mut();
        let window = mem::take(&mut state.entries);
        state.entries = insert_entries(window, entries, index);
        Outcome::Applied { anchor: None }
    }

    /// Removes the entries with the given keys and moves `boundaries.end` back accordingly.
    pub fn remove<K: AsRef<str>>(&self, keys: &[K]) -> Outcome {
        let mut state = self.state.borrow_mut();
        let window = mem::take(&mut state.entries);
        let (entries, boundaries) = remove_entries(window, keys, state.boundaries);
        state.entries = entries;
        state.boundaries = boundaries;
        Outcome::Applied { anchor: None }
    }

    async fn run_load(&self, guard: InFlight<'_, E>, direction: Direction) -> Outcome {
        let current = self.snapshot();
        let anchor = capture_boundary_anchor(direction, &current.entries);

        let result = fetch_page(
            &self.options.source,
            direction,
            &current,
            &self.options.load,
            &self.options.query_params,
        )
        .await;

        match result {
            Ok(outcome) => {
                let raw = outcome.apply_to(&mut self.state.borrow_mut());
                drop(guard);
                let anchor = anchor.map(|anchor| {
                    let state = self.state.borrow();
                    locate_anchor(anchor, &state.entries)
                });
                if let Some(action) = &self.options.post_load_action {
                    action(&raw);
                }
                Outcome::Applied { anchor }
            }
            Err(err) => {
                drop(guard);
                self.report(&err);
                Outcome::Failed
            }
        }
    }

    fn report(&self, err: &Error) {
        match &self.options.error_handler {
            Some(handler) => handler(err),
            None => {
                aerror!(error = %err, "page load failed");
            }
        }
    }
}
