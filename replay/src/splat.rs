//! Splat log decoding and encoding.
//!
//! Each time step holds a tally of splats followed by their fixed-width x and
//! y coordinates. Coordinate widths and the centering offsets derive from the
//! map size: one tile is 40 units and coordinates are stored relative to a
//! range centred on the map.

use bitstream::{BitReader, BitWriter};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{Axis, ReplayError, ReplayResult};
use crate::limits::ReplayLimits;

/// Units per tile.
pub const TILE_SIZE: u32 = 40;

/// Bit width and centering offset for one coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplatAxis {
    /// Bits per stored coordinate.
    pub bits: u8,
    /// Value subtracted from a stored coordinate.
    pub offset: i64,
}

impl SplatAxis {
    /// Computes the geometry for a map dimension in tiles.
    ///
    /// `dimension` must be non-zero with `40 * dimension` inside 31 bits;
    /// [`SplatLog`] validates this before building an axis.
    #[must_use]
    pub const fn new(dimension: u32) -> Self {
        let size = TILE_SIZE as u64 * dimension as u64;
        let grid = size.saturating_sub(1);
        let bits = match 64 - grid.leading_zeros() {
            0 => 1,
            bits => bits,
        };
        let offset = (((1u64 << bits) - size) >> 1) + 20;
        Self {
            bits: bits as u8,
            offset: offset as i64,
        }
    }

    /// Smallest coordinate this axis can store.
    #[must_use]
    pub const fn min(self) -> i64 {
        -self.offset
    }

    /// Largest coordinate this axis can store.
    #[must_use]
    pub const fn max(self) -> i64 {
        (1i64 << self.bits) - 1 - self.offset
    }

    fn read(self, reader: &mut BitReader<'_>) -> i32 {
        (reader.read_bits(self.bits) as i64 - self.offset) as i32
    }

    fn write(self, writer: &mut BitWriter, axis: Axis, value: i32) -> ReplayResult<()> {
        let wide = i64::from(value);
        if wide < self.min() || wide > self.max() {
            return Err(ReplayError::SplatOutOfRange {
                axis,
                value,
                min: self.min() as i32,
                max: self.max() as i32,
            });
        }
        writer.write_bits((wide + self.offset) as u64, self.bits as usize)?;
        Ok(())
    }
}

/// A splat position relative to the map center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Splat {
    pub x: i32,
    pub y: i32,
}

/// All splats of one non-empty time step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SplatEvent {
    /// Index of the time step.
    pub time_index: u64,
    /// Splats in decode order.
    pub splats: Vec<Splat>,
}

/// A splat log buffer with its map dimensions.
#[derive(Debug, Clone, Copy)]
pub struct SplatLog<'a> {
    data: &'a [u8],
    x: SplatAxis,
    y: SplatAxis,
}

impl<'a> SplatLog<'a> {
    /// Creates a splat log with default limits.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> ReplayResult<Self> {
        Self::with_limits(data, width, height, &ReplayLimits::default())
    }

    /// Creates a splat log, checking the buffer and dimensions against `limits`.
    pub fn with_limits(
        data: &'a [u8],
        width: u32,
        height: u32,
        limits: &ReplayLimits,
    ) -> ReplayResult<Self> {
        limits.check_log(data)?;
        limits.check_dimension(Axis::Width, width)?;
        limits.check_dimension(Axis::Height, height)?;
        Ok(Self {
            data,
            x: SplatAxis::new(width),
            y: SplatAxis::new(height),
        })
    }

    /// Returns the x and y axis geometry.
    #[must_use]
    pub const fn axes(&self) -> (SplatAxis, SplatAxis) {
        (self.x, self.y)
    }

    /// Returns a lazy iterator over the events of this log.
    #[must_use]
    pub fn events(&self) -> SplatEvents<'a> {
        tracing::debug!(
            bytes = self.data.len(),
            x_bits = self.x.bits,
            y_bits = self.y.bits,
            "decoding splat log"
        );
        SplatEvents {
            reader: BitReader::new(self.data),
            x: self.x,
            y: self.y,
            time_index: 0,
        }
    }

    /// Decodes the whole log into a vector.
    #[must_use]
    pub fn decode(&self) -> Vec<SplatEvent> {
        self.events().collect()
    }
}

/// Lazy iterator over the events of a [`SplatLog`].
#[derive(Debug, Clone)]
pub struct SplatEvents<'a> {
    reader: BitReader<'a>,
    x: SplatAxis,
    y: SplatAxis,
    time_index: u64,
}

impl Iterator for SplatEvents<'_> {
    type Item = SplatEvent;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.reader.is_end() {
            let time_index = self.time_index;
            self.time_index += 1;
            let count = self.reader.read_tally();
            if count == 0 {
                continue;
            }
            let mut splats = Vec::new();
            for _ in 0..count {
                let x = self.x.read(&mut self.reader);
                let y = self.y.read(&mut self.reader);
                splats.push(Splat { x, y });
            }
            tracing::trace!(time_index, count, "splat step");
            return Some(SplatEvent { time_index, splats });
        }
        None
    }
}

/// Encodes per-step splat lists as a splat log.
///
/// Step `i` of `steps` is written as time step `i`; empty steps are kept as
/// zero tallies.
pub fn encode_splat_log(steps: &[Vec<Splat>], width: u32, height: u32) -> ReplayResult<Vec<u8>> {
    let limits = ReplayLimits::unlimited();
    limits.check_dimension(Axis::Width, width)?;
    limits.check_dimension(Axis::Height, height)?;
    let x = SplatAxis::new(width);
    let y = SplatAxis::new(height);

    let mut writer = BitWriter::new();
    for step in steps {
        writer.write_tally(step.len() as u64);
        for splat in step {
            x.write(&mut writer, Axis::Width, splat.x)?;
            y.write(&mut writer, Axis::Height, splat.y)?;
        }
    }
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_geometry() {
        // 20 tiles => 800 units => 10 bits, offset (1024 - 800) / 2 + 20.
        let axis = SplatAxis::new(20);
        assert_eq!(axis.bits, 10);
        assert_eq!(axis.offset, 132);

        // 1 tile => 40 units => grid 39 => 6 bits.
        let axis = SplatAxis::new(1);
        assert_eq!(axis.bits, 6);
        assert_eq!(axis.offset, 32);
    }

    #[test]
    fn axis_power_of_two_boundary() {
        // 40 * 64 = 2560 => grid 2559 => 12 bits.
        let axis = SplatAxis::new(64);
        assert_eq!(axis.bits, 12);
        assert_eq!(axis.offset, (4096 - 2560) / 2 + 20);
    }

    #[test]
    fn axis_range() {
        let axis = SplatAxis::new(20);
        assert_eq!(axis.min(), -132);
        assert_eq!(axis.max(), 1023 - 132);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            SplatLog::new(&[], 0, 10),
            Err(ReplayError::InvalidDimension {
                axis: Axis::Width,
                ..
            })
        ));
        assert!(matches!(
            SplatLog::new(&[], 10, 0),
            Err(ReplayError::InvalidDimension {
                axis: Axis::Height,
                ..
            })
        ));
    }

    #[test]
    fn empty_steps_advance_index() {
        let mut writer = BitWriter::new();
        writer.write_tally(0);
        writer.write_tally(0);
        writer.write_tally(1);
        writer.write_bits(132, 10).unwrap();
        writer.write_bits(0, 10).unwrap();
        let data = writer.finish();

        let events = SplatLog::new(&data, 20, 20).unwrap().decode();
        assert_eq!(
            events,
            vec![SplatEvent {
                time_index: 2,
                splats: vec![Splat { x: 0, y: -132 }],
            }]
        );
    }

    #[test]
    fn encode_decode_steps() {
        let steps = vec![
            vec![Splat { x: 10, y: -5 }, Splat { x: -100, y: 200 }],
            vec![],
            vec![Splat { x: 0, y: 0 }],
        ];
        let data = encode_splat_log(&steps, 30, 20).unwrap();
        let events = SplatLog::new(&data, 30, 20).unwrap().decode();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].time_index, 0);
        assert_eq!(events[0].splats, steps[0]);
        assert_eq!(events[1].time_index, 2);
        assert_eq!(events[1].splats, steps[2]);
    }

    #[test]
    fn encode_rejects_out_of_range() {
        let steps = vec![vec![Splat { x: 5000, y: 0 }]];
        assert!(matches!(
            encode_splat_log(&steps, 20, 20),
            Err(ReplayError::SplatOutOfRange {
                axis: Axis::Width,
                value: 5000,
                ..
            })
        ));
    }
}
