use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_PACKET_SIZE: usize = 30;
pub const MIN_PACKET_SIZE: usize = 1;
pub const MAX_PACKET_SIZE: usize = 100_000;
/// `load_size` defaults to this many packets.
pub const DEFAULT_LOAD_SIZE_FACTOR: usize = 4;
pub const MIN_LOAD_SIZE: usize = 3;
pub const MAX_LOAD_SIZE: usize = 10_000_000;
pub const MIN_IN_RUSH_LOAD_SIZE: usize = 1;

/// Smallest `load_size` accepted for a given `packet_size`: `ceil(1.5 * packet_size)`.
pub fn min_load_size_for(packet_size: usize) -> usize {
    packet_size.saturating_add(packet_size.div_ceil(2))
}

/// Sizing options for page loads.
///
/// Every size is optional so that "unset" can pick a default derived from the other fields
/// (`load_size` follows `packet_size`, `in_rush_load_size` follows `load_size`). Options are
/// checked by [`LoadOptions::resolve`] right before each request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadOptions {
    /// Entries requested per load. Defaults to [`DEFAULT_PACKET_SIZE`].
    pub packet_size: Option<usize>,
    /// Maximum number of entries kept in the window. Defaults to 4 packets.
    pub load_size: Option<usize>,
    /// Keeps every loaded entry, ignoring `load_size` when merging.
    ///
    /// `load_size` is still resolved and checked against `packet_size`. This may be very memory
    /// hungry on large datasets; prefer a large `load_size` for long feeds.
    pub bypass_load_size: bool,
    /// Allows the first load to request `in_rush_load_size` entries. Defaults to `true`.
    pub in_rush_load: Option<bool>,
    /// Size of the in-rush load. Defaults to half of `load_size`.
    pub in_rush_load_size: Option<usize>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packet_size(mut self, packet_size: usize) -> Self {
        self.packet_size = Some(packet_size);
        self
    }

    pub fn with_load_size(mut self, load_size: usize) -> Self {
        self.load_size = Some(load_size);
        self
    }

    pub fn with_bypass_load_size(mut self, bypass_load_size: bool) -> Self {
        self.bypass_load_size = bypass_load_size;
        self
    }

    pub fn with_in_rush_load(mut self, in_rush_load: bool) -> Self {
        self.in_rush_load = Some(in_rush_load);
        self
    }

    pub fn with_in_rush_load_size(mut self, in_rush_load_size: usize) -> Self {
        self.in_rush_load_size = Some(in_rush_load_size);
        self
    }

    /// Applies defaults and checks limits, in this order:
    ///
    /// 1. `packet_size` within `[MIN_PACKET_SIZE, MAX_PACKET_SIZE]`
    /// 2. `load_size` within `[MIN_LOAD_SIZE, MAX_LOAD_SIZE]`, unless `bypass_load_size`
    /// 3. `load_size >= ceil(1.5 * packet_size)`, always
    /// 4. `in_rush_load_size >= MIN_IN_RUSH_LOAD_SIZE`
    pub fn resolve(&self) -> Result<ResolvedLoadOptions, ConfigError> {
        let packet_size = self.packet_size.unwrap_or(DEFAULT_PACKET_SIZE);
        let load_size = self
            .load_size
            .unwrap_or_else(|| packet_size.saturating_mul(DEFAULT_LOAD_SIZE_FACTOR));

        if packet_size < MIN_PACKET_SIZE {
            return Err(ConfigError::PacketSizeTooSmall(packet_size));
        }
        if packet_size > MAX_PACKET_SIZE {
            return Err(ConfigError::PacketSizeTooLarge(packet_size));
        }

        if !self.bypass_load_size {
            if load_size < MIN_LOAD_SIZE {
                return Err(ConfigError::LoadSizeTooSmall(load_size));
            }
            if load_size > MAX_LOAD_SIZE {
                return Err(ConfigError::LoadSizeTooLarge(load_size));
            }
        }

        let minimum = min_load_size_for(packet_size);
        if load_size < minimum {
            return Err(ConfigError::LoadSizeBelowPacketRatio {
                load_size,
                packet_size,
                minimum,
            });
        }

        let in_rush_load = self.in_rush_load.unwrap_or(true);
        let in_rush_load_size = self.in_rush_load_size.unwrap_or(load_size / 2);
        if in_rush_load_size < MIN_IN_RUSH_LOAD_SIZE {
            return Err(ConfigError::InRushLoadSizeTooSmall(in_rush_load_size));
        }

        Ok(ResolvedLoadOptions {
            packet_size,
            load_size,
            bypass_load_size: self.bypass_load_size,
            in_rush_load,
            in_rush_load_size,
        })
    }
}

/// Load options with every default applied and every limit checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedLoadOptions {
    pub packet_size: usize,
    pub load_size: usize,
    pub bypass_load_size: bool,
    pub in_rush_load: bool,
    pub in_rush_load_size: usize,
}

impl ResolvedLoadOptions {
    /// Size of the next request for a window currently holding `held` entries.
    pub fn adaptive_packet_size(&self, held: usize) -> usize {
        if self.in_rush_load && held < self.in_rush_load_size {
            self.in_rush_load_size
        } else {
            self.packet_size
        }
    }

    /// Maximum window length after a merge, or `None` when the limit is bypassed.
    pub fn capacity(&self) -> Option<usize> {
        (!self.bypass_load_size).then_some(self.load_size)
    }
}
