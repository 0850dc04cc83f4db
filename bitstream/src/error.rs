//! Error types for bitstream operations.

use thiserror::Error;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur while encoding bits.
///
/// Reading never fails: the log format pads past the end of the buffer with
/// zero bits, so [`BitReader`](crate::BitReader) has no error path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    /// Invalid bit count for the operation.
    #[error("invalid bit count {bits}, maximum allowed is {max_bits}")]
    InvalidBitCount {
        /// The invalid bit count provided.
        bits: usize,
        /// Maximum allowed bits for this operation.
        max_bits: usize,
    },

    /// Value exceeds the range representable by the specified number of bits.
    #[error("value {value} cannot be represented in {bits} bits")]
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Number of bits available.
        bits: usize,
    },

    /// Value is larger than the biggest footer class can carry.
    #[error("value {value} exceeds the footer maximum {max} at this alignment")]
    FooterOverflow {
        /// The value that was requested.
        value: u64,
        /// Largest value the footer can carry from the current position.
        max: u64,
    },
}
