//! Bit-level reader over replay log buffers.

use crate::footer;

/// A bit cursor over a borrowed byte buffer.
///
/// Bits are read most-significant first within each byte. Reads past the end
/// of the buffer return zero bits and still advance the cursor, so every read
/// is infallible and the reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Returns `true` once the cursor has reached the byte holding no data.
    ///
    /// The check is byte-granular: a cursor inside the last byte is not at the
    /// end even if the remaining bits are padding.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.bit_pos / 8 >= self.data.len()
    }

    /// Returns the number of real bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_mul(8)
            .saturating_sub(self.bit_pos)
    }

    /// Returns the current bit position.
    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Reads a single bit, or `false` past the end of the buffer.
    pub fn read_bit(&mut self) -> bool {
        let bit = self
            .data
            .get(self.bit_pos / 8)
            .map_or(0, |byte| (byte >> (7 - self.bit_pos % 8)) & 1);
        self.bit_pos += 1;
        bit == 1
    }

    /// Reads `bits` bits as a big-endian unsigned integer.
    ///
    /// Reading zero bits returns 0 without moving the cursor. Only the low 64
    /// bits of the accumulated value are kept.
    pub fn read_bits(&mut self, bits: u8) -> u64 {
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.read_bit());
        }
        value
    }

    /// Reads a unary count: the number of 1-bits before the next 0-bit.
    ///
    /// The terminating 0-bit is consumed. Past the end of the buffer the
    /// terminator is always found, so this never loops forever.
    pub fn read_tally(&mut self) -> u64 {
        let mut count = 0u64;
        while self.read_bit() {
            count += 1;
        }
        count
    }

    /// Reads a footer: the byte-aligning, class-based variable-width integer.
    ///
    /// After the 2-bit class selector the value field is sized to end on a
    /// byte boundary, so the cursor is always byte aligned on return (relative
    /// to the buffer start).
    pub fn read_footer(&mut self) -> u64 {
        let class = self.read_bits(footer::SELECTOR_BITS);
        let pad = footer::pad_at(self.bit_pos);
        let value = self.read_bits(footer::width(class, pad) as u8);
        value + footer::minimum(class, pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = BitReader::new(&[]);
        assert!(reader.is_end());
        assert_eq!(reader.bits_remaining(), 0);
        assert_eq!(reader.bit_position(), 0);
    }

    #[test]
    fn read_from_empty_yields_zero_and_advances() {
        let mut reader = BitReader::new(&[]);
        assert!(!reader.read_bit());
        assert_eq!(reader.bit_position(), 1);
        assert_eq!(reader.read_bits(12), 0);
        assert_eq!(reader.bit_position(), 13);
    }

    #[test]
    fn bits_are_msb_first() {
        let mut reader = BitReader::new(&[0b1000_0001]);
        assert!(reader.read_bit());
        for _ in 0..6 {
            assert!(!reader.read_bit());
        }
        assert!(reader.read_bit());
        assert!(reader.is_end());
    }

    #[test]
    fn read_bits_across_bytes() {
        let mut reader = BitReader::new(&[0b1111_0000, 0b0000_1111]);
        assert_eq!(reader.read_bits(12), 0b1111_0000_0000);
        assert_eq!(reader.bits_remaining(), 4);
        assert!(!reader.is_end());
    }

    #[test]
    fn read_zero_bits_consumes_nothing() {
        let mut reader = BitReader::new(&[0xFF]);
        assert_eq!(reader.read_bits(0), 0);
        assert_eq!(reader.bit_position(), 0);
    }

    #[test]
    fn read_bits_past_end_pads_with_zeros() {
        let mut reader = BitReader::new(&[0xFF]);
        assert_eq!(reader.read_bits(12), 0b1111_1111_0000);
    }

    #[test]
    fn end_is_byte_granular() {
        let mut reader = BitReader::new(&[0x00]);
        reader.read_bits(7);
        assert!(!reader.is_end());
        reader.read_bit();
        assert!(reader.is_end());
    }

    #[test]
    fn tally_counts_ones() {
        let mut reader = BitReader::new(&[0b1110_1000]);
        assert_eq!(reader.read_tally(), 3);
        assert_eq!(reader.read_tally(), 1);
        assert_eq!(reader.bit_position(), 6);
    }

    #[test]
    fn tally_terminates_past_end() {
        let mut reader = BitReader::new(&[0xFF]);
        assert_eq!(reader.read_tally(), 8);
        assert_eq!(reader.bit_position(), 9);
    }

    #[test]
    fn footer_class_zero_at_byte_start() {
        // Selector 00 leaves pad 6: six zero bits encode 0.
        let mut reader = BitReader::new(&[0b0000_0000]);
        assert_eq!(reader.read_footer(), 0);
        assert_eq!(reader.bit_position(), 8);
    }

    #[test]
    fn footer_class_zero_uses_padding() {
        // Selector 00, then six value bits 101010.
        let mut reader = BitReader::new(&[0b0010_1010]);
        assert_eq!(reader.read_footer(), 42);
    }

    #[test]
    fn footer_class_one_adds_minimum() {
        // Selector 01, pad 6: 14 value bits, minimum 2^6.
        let mut reader = BitReader::new(&[0b0100_0000, 0b0000_0001]);
        assert_eq!(reader.read_footer(), 64 + 1);
        assert_eq!(reader.bit_position(), 16);
    }

    #[test]
    fn footer_from_unaligned_position_realigns() {
        // Skip 6 bits, selector 00 ends on a byte boundary (pad 0) => 0.
        let mut reader = BitReader::new(&[0b1111_1100, 0xAB]);
        reader.read_bits(6);
        assert_eq!(reader.read_footer(), 0);
        assert_eq!(reader.bit_position(), 8);
        assert_eq!(reader.read_bits(8), 0xAB);
    }

    #[test]
    fn footer_past_end_is_zero() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_footer(), 0);
        assert_eq!(reader.bit_position(), 8);
    }
}
