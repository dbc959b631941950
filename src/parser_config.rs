use serde::{Deserialize, Serialize};

use crate::errors::{SpliceError, SpliceResult};

/// How the track parser treats the end of the body-length budget
///
/// The body length is the only thing that tells the parser when to stop, and
/// files in the wild do not always agree with their own records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackRegionPolicy {
    /// Keep reading records while the running total is below the budget. The
    /// last record may end inside the one byte of region slack past the budget.
    #[default]
    Lenient,
    /// Records must end exactly on the budget, and the body length must cover
    /// the fixed header fields.
    Strict,
}

/// Configuration for resource limits and boundary handling during decoding
///
/// Separate from `ValidationConfig`, which checks the meaning of an already
/// decoded pattern.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum input size accepted before any parsing (bytes)
    pub max_file_size: usize,

    /// Maximum number of track records parsed before stopping
    pub max_tracks: usize,

    /// Boundary policy for the track region
    pub track_region_policy: TrackRegionPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1MB, real patterns are a few hundred bytes
            max_tracks: 4096,
            track_region_policy: TrackRegionPolicy::Lenient,
        }
    }
}

impl ParserConfig {
    /// Strict boundaries and tighter limits
    pub fn strict() -> Self {
        Self {
            max_file_size: 64 * 1024,
            max_tracks: 256,
            track_region_policy: TrackRegionPolicy::Strict,
        }
    }

    /// Relaxed limits for unusually large pattern banks
    pub fn permissive() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024,
            max_tracks: 1_000_000,
            track_region_policy: TrackRegionPolicy::Lenient,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.track_region_policy == TrackRegionPolicy::Strict
    }

    /// Check if input size is within limits
    pub fn check_file_size(&self, size: usize) -> SpliceResult<()> {
        if size > self.max_file_size {
            return Err(SpliceError::DataSizeExceedsLimit {
                field: "file_size".to_string(),
                size,
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Check if track count is within limits
    pub fn check_track_count(&self, count: usize) -> SpliceResult<()> {
        if count > self.max_tracks {
            return Err(SpliceError::DataSizeExceedsLimit {
                field: "track_count".to_string(),
                size: count,
                limit: self.max_tracks,
            });
        }
        Ok(())
    }
}

/// Running totals for the track loop
#[derive(Debug, Default)]
pub struct ResourceTracker {
    /// Track records parsed so far
    pub track_count: usize,

    /// Bytes consumed by those records
    pub bytes_consumed: u64,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one parsed record of `len` bytes
    pub fn track_record(&mut self, config: &ParserConfig, len: usize) -> SpliceResult<()> {
        self.track_count += 1;
        config.check_track_count(self.track_count)?;

        self.bytes_consumed = self
            .bytes_consumed
            .checked_add(len as u64)
            .ok_or_else(|| SpliceError::IntegerOverflow {
                operation: "track byte total".to_string(),
                details: format!("{} + {}", self.bytes_consumed, len),
            })?;
        Ok(())
    }
}
