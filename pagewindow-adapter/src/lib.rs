//! A stateful controller on top of the `pagewindow` crate.
//!
//! `pagewindow` provides pure transitions over a window of entries. This crate owns one window
//! and wires it to host events:
//!
//! - scroll events, resolved into forward or backward loads
//! - explicit loads, searches and state mutations
//! - a single in-flight load at a time
//! - error and post-load callbacks
//! - boundary anchors, so a UI can keep its position while the window moves
//!
//! It has no UI or runtime dependency: futures are driven by whatever executor the host uses.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod options;


pub use anchor::{BoundaryAnchor, capture_boundary_anchor, locate_anchor};
pub use controller::{Controller, Outcome, Request, SkipReason};
pub use options::{ControllerOptions, ErrorHandler, PostLoadAction};
