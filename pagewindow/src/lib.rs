//! A headless windowed pagination engine.
//!
//! For the stateful controller (request serialization, callbacks, anchors), see the
//! `pagewindow-adapter` crate.
//!
//! This crate holds the state machine behind scroll-driven feeds: it decides which range to
//! request next, merges a fetched page into a bounded in-memory window without duplicating
//! entries, trims the window to its maximum size, and recomputes boundaries and exhaustion flags
//! after every merge.
//!
//! It is UI- and transport-agnostic. The host is expected to provide:
//! - a [`PageSource`] (the asynchronous fetch function)
//! - scroll geometry snapshots, when loads are driven by scrolling
//!
//! Every operation here is a pure transition over [`WindowState`]; none of them hold state.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod key;
mod loader;
mod mutation;
mod options;
mod response;
mod scroll;
mod source;
mod state;
mod types;
mod validate;


pub use error::{ConfigError, Error, ResponseError, Result, TransportError};
pub use key::{Entry, Keyed};
pub use loader::{LoadOutcome, MergeStats, RequestPlan, fetch_page, merge_page, plan_request};
pub use mutation::{insert_entries, remove_entries};
pub use options::{
    DEFAULT_LOAD_SIZE_FACTOR, DEFAULT_PACKET_SIZE, LoadOptions, MAX_LOAD_SIZE, MAX_PACKET_SIZE,
    MIN_IN_RUSH_LOAD_SIZE, MIN_LOAD_SIZE, MIN_PACKET_SIZE, ResolvedLoadOptions, min_load_size_for,
};
pub use response::{Page, json_type_name, validate_response};
pub use scroll::resolve_direction;
pub use source::{PageRequest, PageSource};
pub use state::{PartialState, WindowState};
pub use types::{Boundaries, Direction, Flags, LoadThreshold, QueryParams, ScrollSnapshot};
pub use validate::validate_setup;
