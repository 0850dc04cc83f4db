use bitstream::BitWriter;
use replay::{encode_splat_log, ReplayError, Splat, SplatAxis, SplatEvent, SplatLog};

#[test]
fn geometry_follows_dimensions_independently() {
    let log = SplatLog::new(&[], 50, 30).unwrap();
    let (x, y) = log.axes();
    assert_eq!(x, SplatAxis::new(50));
    assert_eq!(y, SplatAxis::new(30));
    // 2000 units => 11 bits, 1200 units => 11 bits with different offsets.
    assert_eq!(x.bits, 11);
    assert_eq!(y.bits, 11);
    assert_eq!(x.offset, (2048 - 2000) / 2 + 20);
    assert_eq!(y.offset, (2048 - 1200) / 2 + 20);
}

#[test]
fn center_of_range_decodes_near_zero() {
    let axis = SplatAxis::new(20);
    let mut writer = BitWriter::new();
    writer.write_tally(1);
    writer.write_bits(axis.offset as u64, axis.bits as usize).unwrap();
    writer.write_bits(axis.offset as u64 + 40, axis.bits as usize).unwrap();
    let data = writer.finish();

    let events = SplatLog::new(&data, 20, 20).unwrap().decode();
    assert_eq!(events[0].splats, vec![Splat { x: 0, y: 40 }]);
}

#[test]
fn steps_without_splats_emit_nothing() {
    let steps = vec![vec![], vec![], vec![], vec![Splat { x: 1, y: 2 }], vec![]];
    let data = encode_splat_log(&steps, 10, 10).unwrap();

    let events = SplatLog::new(&data, 10, 10).unwrap().decode();
    assert_eq!(
        events,
        vec![SplatEvent {
            time_index: 3,
            splats: vec![Splat { x: 1, y: 2 }],
        }]
    );
}

#[test]
fn many_steps_roundtrip() {
    let steps: Vec<Vec<Splat>> = (0..40)
        .map(|step: i32| {
            (0..step % 4)
                .map(|i| Splat {
                    x: step * 7 + i * 30,
                    y: i * 11 - step / 2,
                })
                .collect()
        })
        .collect();
    let data = encode_splat_log(&steps, 25, 25).unwrap();
    let events = SplatLog::new(&data, 25, 25).unwrap().decode();

    let expected: Vec<SplatEvent> = steps
        .iter()
        .enumerate()
        .filter(|(_, splats)| !splats.is_empty())
        .map(|(index, splats)| SplatEvent {
            time_index: index as u64,
            splats: splats.clone(),
        })
        .collect();
    assert_eq!(events, expected);
}

#[test]
fn decoding_twice_is_identical() {
    let data = [0xC3, 0x5A, 0x00, 0xFF, 0x81];
    let log = SplatLog::new(&data, 8, 6).unwrap();
    assert_eq!(log.decode(), log.decode());
}

#[test]
fn out_of_range_splat_is_rejected() {
    let steps = vec![vec![Splat { x: 0, y: -10_000 }]];
    assert!(matches!(
        encode_splat_log(&steps, 20, 20),
        Err(ReplayError::SplatOutOfRange { value: -10_000, .. })
    ));
}
