//! Error types for replay log decoding.

use thiserror::Error;

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Axis a dimension error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// Errors raised while setting up a decoder or encoding a log.
///
/// Decoding itself never fails; malformed input produces some event
/// sequence rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// A map dimension is zero or above the configured limit.
    #[error("invalid {axis:?} {value}, expected 1..={max}")]
    InvalidDimension { axis: Axis, value: u32, max: u32 },

    /// The log buffer is larger than the configured limit.
    #[error("log of {actual} bytes exceeds the limit of {limit} bytes")]
    LogTooLarge { limit: usize, actual: usize },

    /// A map grid holds more tiles than the configured limit.
    #[error("map grid exceeds the limit of {limit} tiles")]
    TooManyTiles { limit: usize },

    /// A raw tile code does not fit the 6-bit field.
    #[error("raw tile code {code} does not fit in 6 bits")]
    InvalidTileCode { code: u8 },

    /// A tile has no raw encoding in map logs.
    #[error("tile {code} cannot be stored in a map log")]
    UnencodableTile { code: u16 },

    /// A splat coordinate falls outside the encodable range of its axis.
    #[error("splat {axis:?} coordinate {value} outside {min}..={max}")]
    SplatOutOfRange {
        axis: Axis,
        value: i32,
        min: i32,
        max: i32,
    },

    /// Bitstream encoding error.
    #[error(transparent)]
    Bitstream(#[from] bitstream::BitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimension_display() {
        let err = ReplayError::InvalidDimension {
            axis: Axis::Width,
            value: 0,
            max: 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("Width"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn log_too_large_display() {
        let err = ReplayError::LogTooLarge {
            limit: 16,
            actual: 32,
        };
        let msg = err.to_string();
        assert!(msg.contains("16"));
        assert!(msg.contains("32"));
    }

    #[test]
    fn bitstream_error_converts() {
        let err: ReplayError = bitstream::BitError::ValueOutOfRange { value: 9, bits: 3 }.into();
        assert!(matches!(err, ReplayError::Bitstream(_)));
        assert!(err.to_string().contains("3 bits"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ReplayError>();
    }
}
