use thiserror::Error;

use crate::options::{
    MAX_LOAD_SIZE, MAX_PACKET_SIZE, MIN_IN_RUSH_LOAD_SIZE, MIN_LOAD_SIZE, MIN_PACKET_SIZE,
};

/// Boxed error produced by a data source. Carried through unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid load configuration, or invalid caller-supplied setup under strict validation.
///
/// Raised before any request is sent; the window is never touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("packetSize parameter is under {limit} limit (currently {0}).", limit = MIN_PACKET_SIZE)]
    PacketSizeTooSmall(usize),

    #[error("packetSize parameter is over {limit} limit (currently {0}).", limit = MAX_PACKET_SIZE)]
    PacketSizeTooLarge(usize),

    #[error("loadSize parameter is under {limit} limit (currently {0}).", limit = MIN_LOAD_SIZE)]
    LoadSizeTooSmall(usize),

    #[error("loadSize parameter is over {limit} limit (currently {0}).", limit = MAX_LOAD_SIZE)]
    LoadSizeTooLarge(usize),

    #[error(
        "loadSize ({load_size}) cannot be less than 150% of packetSize ({packet_size}). Please set it at least to {minimum}."
    )]
    LoadSizeBelowPacketRatio {
        load_size: usize,
        packet_size: usize,
        minimum: usize,
    },

    #[error(
        "inRushLoadSize parameter is under {limit} limit (currently {0}).",
        limit = MIN_IN_RUSH_LOAD_SIZE
    )]
    InRushLoadSizeTooSmall(usize),

    #[error("Top threshold of value {0} is too small: expect a Number greater or equal to 1.")]
    TopThresholdTooSmall(f64),

    #[error("Bottom threshold of value {0} is too small: expect a Number greater or equal to 1.")]
    BottomThresholdTooSmall(f64),

    #[error(
        "initial state sets a start boundary at {start}, which is greater than the end boundary {end}."
    )]
    InitialStartAfterEnd { start: u64, end: u64 },

    #[error("initial state holds the key {0:?} more than once: entry keys must be unique.")]
    InitialDuplicateKey(String),
}

/// A fetch response that does not match the expected shape.
///
/// `found` fields hold the JSON type name of the offending value (`null`, `Boolean`, `Number`,
/// `String`, `Array` or `Object`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error(
        "api didn't return any result. To indicate an empty dataset, return an object with both boundaries set to 0 and endOfResults set to true."
    )]
    NoResults,

    #[error("api returned non valid result: expected an Object, got {found}.")]
    NotAnObject { found: &'static str },

    #[error(
        "Missing boundaries attribute from api: it should contain two integers for both start and end limits."
    )]
    MissingBoundaries,

    #[error("Invalid boundaries attribute from api: expected an Object, got {found}.")]
    InvalidBoundaries { found: &'static str },

    #[error("Missing start boundary in boundaries: this parameter is required and should be an integer.")]
    MissingStartBoundary,

    #[error("Invalid start boundary from api: expected a non-negative integer, got {found}.")]
    InvalidStartBoundary { found: String },

    #[error("Missing end boundary in boundaries: this parameter is required and should be an integer.")]
    MissingEndBoundary,

    #[error("Invalid end boundary from api: expected a non-negative integer, got {found}.")]
    InvalidEndBoundary { found: String },

    #[error("Api returned a start boundary at {start}, which is greater than the end boundary {end}.")]
    StartAfterEnd { start: u64, end: u64 },

    #[error(
        "Missing flags attribute from api: it should contain an Object with a endOfResults boolean parameter."
    )]
    MissingFlags,

    #[error("Invalid flags attribute from api: expected an Object, got {found}.")]
    InvalidFlags { found: &'static str },

    #[error("Missing endOfResults in flags: this flag is required and should be a boolean.")]
    MissingEndOfResults,

    #[error("Invalid flag endOfResults from api: expected a Boolean, got {found}.")]
    InvalidEndOfResults { found: &'static str },

    #[error("Invalid queryResults attribute from api: expected an Array, got {found}.")]
    InvalidQueryResults { found: &'static str },

    #[error("Invalid entry at position {index} returned from api: expected an Object, got {found}.")]
    InvalidEntry { index: usize, found: &'static str },

    #[error(
        "Missing entry key at position {index}: each entry returned from api should contain an unique key attribute."
    )]
    MissingEntryKey { index: usize },

    #[error("Invalid entry key at position {index}: expected a String, got {found}.")]
    InvalidEntryKey { index: usize, found: &'static str },

    #[error("Entry {key:?} returned from api could not be decoded: {reason}")]
    UndecodableEntry { key: String, reason: String },
}

/// Any failure of a page load.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid api response: {0}")]
    Response(#[from] ResponseError),

    #[error("data source failed: {0}")]
    Transport(#[source] TransportError),
}

impl Error {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
