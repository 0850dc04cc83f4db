//! Arithmetic shared by the footer reader and writer.
//!
//! A footer is a 2-bit class selector `c` followed by `8c + pad` value bits,
//! where `pad` is the distance from the end of the selector to the next byte
//! boundary. Each class starts one past the largest value of the class below
//! it, so the ranges never overlap.

/// Number of footer size classes.
pub const CLASSES: u64 = 4;

/// Bits used by the class selector.
pub const SELECTOR_BITS: u8 = 2;

/// Padding bits needed to reach the next byte boundary from `bit_pos`.
#[must_use]
pub const fn pad_at(bit_pos: usize) -> u32 {
    ((8 - bit_pos % 8) % 8) as u32
}

/// Width in bits of the value field for `class` at the given padding.
#[must_use]
pub const fn width(class: u64, pad: u32) -> u32 {
    class as u32 * 8 + pad
}

/// Smallest value carried by `class` at the given padding.
///
/// This is `sum(2^(pad + 8k))` for `k` in `0..class`.
#[must_use]
pub const fn minimum(class: u64, pad: u32) -> u64 {
    let mut total = 0u64;
    let mut k = 0;
    while k < class {
        total += 1u64 << (pad + 8 * k as u32);
        k += 1;
    }
    total
}

/// Largest value carried by `class` at the given padding.
#[must_use]
pub const fn maximum(class: u64, pad: u32) -> u64 {
    minimum(class + 1, pad) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_reaches_byte_boundary() {
        assert_eq!(pad_at(0), 0);
        assert_eq!(pad_at(2), 6);
        assert_eq!(pad_at(7), 1);
        assert_eq!(pad_at(8), 0);
        assert_eq!(pad_at(13), 3);
    }

    #[test]
    fn class_zero_has_no_minimum() {
        for pad in 0..8 {
            assert_eq!(minimum(0, pad), 0);
        }
    }

    #[test]
    fn classes_are_contiguous() {
        for pad in 0..8 {
            for class in 1..CLASSES {
                assert_eq!(minimum(class, pad), maximum(class - 1, pad) + 1);
            }
        }
    }

    #[test]
    fn minimum_matches_closed_form() {
        assert_eq!(minimum(1, 6), 64);
        assert_eq!(minimum(2, 6), 64 + (1 << 14));
        assert_eq!(minimum(3, 0), 1 + 256 + 65536);
    }

    #[test]
    fn maximum_of_top_class() {
        // pad 7: three classes below, 31 value bits in the top one.
        let expected = minimum(3, 7) + (1u64 << 31) - 1;
        assert_eq!(maximum(3, 7), expected);
    }
}
