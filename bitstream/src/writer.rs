//! Bit-level writer producing replay log buffers.

use crate::error::{BitError, BitResult};
use crate::footer;

/// A bit-level writer for encoding packed binary data.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The accumulated bytes.
    bytes: Vec<u8>,
    /// Current byte being written (not yet pushed to bytes).
    current_byte: u8,
    /// Number of bits written to `current_byte` (0-7).
    bit_count: u8,
}

impl BitWriter {
    /// Creates a new empty `BitWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `BitWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current_byte: 0,
            bit_count: 0,
        }
    }

    /// Returns the number of bits written so far.
    #[must_use]
    pub fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, value: bool) {
        self.current_byte = (self.current_byte << 1) | u8::from(value);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// Writes up to 64 bits from an unsigned integer, most significant first.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 64`.
    /// Returns [`BitError::ValueOutOfRange`] if `value` doesn't fit in `bits`.
    pub fn write_bits(&mut self, value: u64, bits: usize) -> BitResult<()> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        if bits < 64 && value >= (1u64 << bits) {
            return Err(BitError::ValueOutOfRange { value, bits });
        }
        for i in (0..bits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Writes `count` as a unary code: `count` 1-bits then a 0-bit.
    pub fn write_tally(&mut self, count: u64) {
        for _ in 0..count {
            self.write_bit(true);
        }
        self.write_bit(false);
    }

    /// Writes `value` as a footer using the smallest class that holds it.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::FooterOverflow`] if `value` is larger than the top
    /// class can carry from the current alignment.
    pub fn write_footer(&mut self, value: u64) -> BitResult<()> {
        let pad = footer::pad_at(self.bits_written() + footer::SELECTOR_BITS as usize);
        let top = footer::CLASSES - 1;
        let class = (0..footer::CLASSES)
            .find(|&class| value <= footer::maximum(class, pad))
            .ok_or(BitError::FooterOverflow {
                value,
                max: footer::maximum(top, pad),
            })?;
        self.write_bits(class, footer::SELECTOR_BITS as usize)?;
        self.write_bits(
            value - footer::minimum(class, pad),
            footer::width(class, pad) as usize,
        )
    }

    /// Pads with zero bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        while self.bit_count != 0 {
            self.write_bit(false);
        }
    }

    /// Finishes writing and returns the byte buffer.
    ///
    /// If the last byte is incomplete, it is padded with zeros on the right.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.current_byte <<= 8 - self.bit_count;
            self.bytes.push(self.current_byte);
        }
        self.bytes
    }
}
