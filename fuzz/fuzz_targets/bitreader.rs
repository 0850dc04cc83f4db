#![no_main]

use bitstream::BitReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = BitReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 4;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_bit();
            }
            1 => {
                let bits = data[idx.saturating_sub(1)] % 65;
                let _ = reader.read_bits(bits);
            }
            2 => {
                let _ = reader.read_tally();
            }
            _ => {
                let _ = reader.read_footer();
            }
        }
        assert!(reader.bit_position() <= data.len() * 8 + 1024 * 65);
    }
});
