//! Configurable limits checked when a decoder is created.

use crate::error::{Axis, ReplayError, ReplayResult};

/// Limits applied to log buffers and out-of-band dimensions.
///
/// Decoding is lazy, so these only bound what a decoder accepts up front.
/// The splat geometry needs `40 * dimension` to fit in 31 bits, which caps
/// `max_dimension` in every preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayLimits {
    /// Maximum log buffer size in bytes.
    pub max_log_bytes: usize,

    /// Maximum map width or height in tiles.
    pub max_dimension: u32,

    /// Maximum number of tiles collected into a map grid.
    pub max_tiles: usize,
}

/// Largest dimension whose scaled splat range still fits the bit cursor.
pub const MAX_SPLAT_DIMENSION: u32 = (1 << 31) / 40;

impl Default for ReplayLimits {
    fn default() -> Self {
        Self {
            // Whole-match player logs are a few kilobytes.
            max_log_bytes: 16 * 1024 * 1024,

            // Real maps stay well under a few hundred tiles per side.
            max_dimension: 4096,
            max_tiles: 1024 * 1024,
        }
    }
}

impl ReplayLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_log_bytes: 4096,
            max_dimension: 64,
            max_tiles: 4096,
        }
    }

    /// Creates limits with no restrictions beyond what the format can express.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_log_bytes: usize::MAX,
            max_dimension: MAX_SPLAT_DIMENSION,
            max_tiles: usize::MAX,
        }
    }

    pub(crate) const fn check_log(&self, data: &[u8]) -> ReplayResult<()> {
        if data.len() > self.max_log_bytes {
            return Err(ReplayError::LogTooLarge {
                limit: self.max_log_bytes,
                actual: data.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_dimension(&self, axis: Axis, value: u32) -> ReplayResult<()> {
        let max = self.max_dimension.min(MAX_SPLAT_DIMENSION);
        if value == 0 || value > max {
            return Err(ReplayError::InvalidDimension { axis, value, max });
        }
        Ok(())
    }
}
