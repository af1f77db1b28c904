use std::collections::HashSet;

use crate::error::ConfigError;
use crate::key::Keyed;
use crate::options::LoadOptions;
use crate::state::WindowState;
use crate::LoadThreshold;

/// Pre-flight check of caller-supplied setup.
///
/// Meant to run when strict validation is enabled, typically in development builds. Types
/// already rule out most malformed setups; this checks the values:
/// - load options resolve
/// - both thresholds are at least 1
/// - seeded boundaries are not inverted
/// - seeded entries have unique keys
pub fn validate_setup<E: Keyed>(
    options: &LoadOptions,
    threshold: LoadThreshold,
    initial: &WindowState<E>,
) -> Result<(), ConfigError> {
    options.resolve()?;

    if options.bypass_load_size {
        pwarn!(
            "bypass_load_size is enabled: every loaded entry is kept, which can be very memory \
             costly on large datasets. Prefer a large load_size for long feeds."
        );
    }

    if threshold.top.is_nan() || threshold.top < 1.0 {
        return Err(ConfigError::TopThresholdTooSmall(threshold.top));
    }
    if threshold.bottom.is_nan() || threshold.bottom < 1.0 {
        return Err(ConfigError::BottomThresholdTooSmall(threshold.bottom));
    }

    let boundaries = initial.boundaries;
    if boundaries.start > boundaries.end {
        return Err(ConfigError::InitialStartAfterEnd {
            start: boundaries.start,
            end: boundaries.end,
        });
    }

    let mut seen = HashSet::with_capacity(initial.entries.len());
    if let Some(dup) = initial.entries.iter().find(|e| !seen.insert(e.key())) {
        return Err(ConfigError::InitialDuplicateKey(dup.key().to_owned()));
    }

    Ok(())
}
