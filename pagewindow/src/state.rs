use serde::{Deserialize, Serialize};

use crate::key::{Entry, Keyed};
use crate::{Boundaries, Flags};

/// The held window together with its boundaries and status flags.
///
/// With `serde`, this round-trips as
/// `{entries, boundaries, flags, loading, empty, launched}`, so hosts can seed a window from a
/// server-rendered snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "E: Deserialize<'de>"))]
pub struct WindowState<E = Entry> {
    pub entries: Vec<E>,
    pub boundaries: Boundaries,
    pub flags: Flags,
    pub loading: bool,
    pub empty: bool,
    pub launched: bool,
}

impl<E> Default for WindowState<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            boundaries: Boundaries::default(),
            flags: Flags::default(),
            loading: false,
            empty: false,
            launched: false,
        }
    }
}

impl<E: Keyed> WindowState<E> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key() == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key() == key)
    }

    /// Overrides the fields set in `partial`, leaving the others untouched.
    pub fn apply_partial(&mut self, partial: PartialState<E>) {
        let PartialState {
            entries,
            boundaries,
            flags,
            loading,
            empty,
            launched,
        } = partial;
        if let Some(entries) = entries {
            self.entries = entries;
        }
        if let Some(boundaries) = boundaries {
            self.boundaries = boundaries;
        }
        if let Some(flags) = flags {
            self.flags = flags;
        }
        if let Some(loading) = loading {
            self.loading = loading;
        }
        if let Some(empty) = empty {
            self.empty = empty;
        }
        if let Some(launched) = launched {
            self.launched = launched;
        }
    }
}

/// A sparse override of [`WindowState`]; `None` fields are left as they are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "E: Deserialize<'de>"))]
pub struct PartialState<E = Entry> {
    pub entries: Option<Vec<E>>,
    pub boundaries: Option<Boundaries>,
    pub flags: Option<Flags>,
    pub loading: Option<bool>,
    pub empty: Option<bool>,
    pub launched: Option<bool>,
}

impl<E> Default for PartialState<E> {
    fn default() -> Self {
        Self {
            entries: None,
            boundaries: None,
            flags: None,
            loading: None,
            empty: None,
            launched: None,
        }
    }
}

impl<E> PartialState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, entries: Vec<E>) -> Self {
        self.entries = Some(entries);
        self
    }

    pub fn with_boundaries(mut self, boundaries: Boundaries) -> Self {
        self.boundaries = Some(boundaries);
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn with_empty(mut self, empty: bool) -> Self {
        self.empty = Some(empty);
        self
    }

    pub fn with_launched(mut self, launched: bool) -> Self {
        self.launched = Some(launched);
        self
    }
}
