//! Map log decoding and encoding.
//!
//! A map log is a run-length encoded, row-major tile grid: each run is a
//! 6-bit raw tile followed by a footer holding the run length minus one.
//! The grid width is supplied out of band.

use bitstream::{BitReader, BitWriter};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{Axis, ReplayError, ReplayResult};
use crate::limits::ReplayLimits;
use crate::tile::Tile;

/// Longest run written in one footer; fits every footer alignment.
const MAX_RUN: u64 = 1 << 24;

/// A decoded map event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum MapEvent {
    /// A new row begins; emitted before its first cell.
    RowStart { row: u32 },
    /// A tile at the given position.
    Cell { column: u32, row: u32, tile: Tile },
}

/// A map log buffer with its grid width.
#[derive(Debug, Clone, Copy)]
pub struct MapLog<'a> {
    data: &'a [u8],
    width: u32,
    max_tiles: usize,
}

impl<'a> MapLog<'a> {
    /// Creates a map log with default limits.
    pub fn new(data: &'a [u8], width: u32) -> ReplayResult<Self> {
        Self::with_limits(data, width, &ReplayLimits::default())
    }

    /// Creates a map log, checking the buffer and width against `limits`.
    pub fn with_limits(data: &'a [u8], width: u32, limits: &ReplayLimits) -> ReplayResult<Self> {
        limits.check_log(data)?;
        limits.check_dimension(Axis::Width, width)?;
        Ok(Self {
            data,
            width,
            max_tiles: limits.max_tiles,
        })
    }

    /// Returns the grid width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns a lazy iterator over the events of this log.
    #[must_use]
    pub fn events(&self) -> MapEvents<'a> {
        tracing::debug!(bytes = self.data.len(), width = self.width, "decoding map log");
        MapEvents {
            reader: BitReader::new(self.data),
            width: self.width,
            column: 0,
            row: 0,
            tile: Tile::Empty,
            run: 0,
            pending_cell: None,
            finished: false,
        }
    }

    /// Decodes the whole log into a vector.
    #[must_use]
    pub fn decode(&self) -> Vec<MapEvent> {
        self.events().collect()
    }

    /// Decodes the log into a tile grid.
    pub fn grid(&self) -> ReplayResult<TileGrid> {
        let mut tiles = Vec::new();
        let mut height = 0;
        for event in self.events() {
            match event {
                MapEvent::RowStart { row } => height = row.saturating_add(1),
                MapEvent::Cell { tile, .. } => {
                    if tiles.len() == self.max_tiles {
                        return Err(ReplayError::TooManyTiles {
                            limit: self.max_tiles,
                        });
                    }
                    tiles.push(tile);
                }
            }
        }
        Ok(TileGrid {
            width: self.width,
            height,
            tiles,
        })
    }
}

/// Lazy iterator over the events of a [`MapLog`].
#[derive(Debug, Clone)]
pub struct MapEvents<'a> {
    reader: BitReader<'a>,
    width: u32,
    column: u32,
    row: u32,
    tile: Tile,
    run: u64,
    pending_cell: Option<MapEvent>,
    finished: bool,
}

impl Iterator for MapEvents<'_> {
    type Item = MapEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(cell) = self.pending_cell.take() {
            return Some(cell);
        }
        if self.finished {
            return None;
        }
        if self.run == 0 {
            // A row in progress is finished even past the end of the data.
            if self.reader.is_end() && self.column == 0 {
                return None;
            }
            self.tile = Tile::from_six_bits(self.reader.read_bits(6) as u8);
            self.run = self.reader.read_footer().saturating_add(1);
            tracing::trace!(tile = ?self.tile, run = self.run, "map run");
        }

        self.run -= 1;
        let row = self.row;
        let cell = MapEvent::Cell {
            column: self.column,
            row,
            tile: self.tile,
        };
        let row_start = self.column == 0;
        self.column += 1;
        if self.column == self.width {
            self.column = 0;
            // Rows are numbered in 32 bits; a log describing more ends here.
            match self.row.checked_add(1) {
                Some(next) => self.row = next,
                None => {
                    tracing::warn!(width = self.width, "map log exceeds the row range");
                    self.finished = true;
                }
            }
        }
        if row_start {
            self.pending_cell = Some(cell);
            return Some(MapEvent::RowStart { row });
        }
        Some(cell)
    }
}

/// A decoded, row-major tile grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid from row-major tiles.
    ///
    /// A trailing partial row is padded with [`Tile::Empty`].
    pub fn new(width: u32, mut tiles: Vec<Tile>) -> ReplayResult<Self> {
        if width == 0 {
            return Err(ReplayError::InvalidDimension {
                axis: Axis::Width,
                value: 0,
                max: u32::MAX,
            });
        }
        let row_len = width as usize;
        let height = tiles.len().div_ceil(row_len);
        tiles.resize(height * row_len, Tile::Empty);
        Ok(Self {
            width,
            height: height as u32,
            tiles,
        })
    }

    /// Returns the grid width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the grid height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the tile at `column`, `row`.
    #[must_use]
    pub fn get(&self, column: u32, row: u32) -> Option<Tile> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.tiles
            .get(row as usize * self.width as usize + column as usize)
            .copied()
    }

    /// Returns the tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterates the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width as usize)
    }

    /// Encodes the grid as a map log.
    pub fn encode(&self) -> ReplayResult<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(self.tiles.len() / 4);
        let mut runs = self.tiles.iter().copied().peekable();
        while let Some(tile) = runs.next() {
            let raw = tile
                .raw()
                .ok_or(ReplayError::UnencodableTile { code: tile.code() })?;
            let mut run = 1u64;
            while run < MAX_RUN && runs.peek() == Some(&tile) {
                runs.next();
                run += 1;
            }
            writer.write_bits(u64::from(raw), 6)?;
            writer.write_footer(run - 1)?;
        }
        Ok(writer.finish())
    }
}
