//! Map tile kinds and the raw 6-bit tile table.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{ReplayError, ReplayResult};

/// Largest raw tile value in a map log (6 bits).
pub const MAX_RAW_TILE: u8 = 63;

/// A semantic map tile.
///
/// Tiles are identified by stable numeric codes (see [`Tile::code`]). Codes
/// the raw table can produce but that have no dedicated variant are kept as
/// [`Tile::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum Tile {
    #[default]
    Empty,
    SquareWall,
    LowerLeftDiagonalWall,
    UpperLeftDiagonalWall,
    UpperRightDiagonalWall,
    LowerRightDiagonalWall,
    NeutralFloor,
    RedFlag,
    BlueFlag,
    NeutralSpeedpad,
    Powerup,
    JukeJuicePowerup,
    RollingBombPowerup,
    TagProPowerup,
    TopSpeedPowerup,
    Spike,
    Button,
    OpenGate,
    ClosedGate,
    RedGate,
    BlueGate,
    Bomb,
    RedFloor,
    BlueFloor,
    EntryPortal,
    ExitPortal,
    RedSpeedpad,
    BlueSpeedpad,
    NeutralFlag,
    /// Placeholder for a dropped temporary flag; never stored in map logs.
    TemporaryFlag,
    RedEndzone,
    BlueEndzone,
    /// A code produced by the raw table without a named variant.
    Reserved(u16),
}

impl Tile {
    /// Decodes a raw map-log tile value.
    pub const fn from_raw(raw: u8) -> ReplayResult<Self> {
        if raw > MAX_RAW_TILE {
            return Err(ReplayError::InvalidTileCode { code: raw });
        }
        Ok(Self::from_six_bits(raw))
    }

    /// Decodes the low six bits of `raw`. Total over every input.
    #[must_use]
    pub const fn from_six_bits(raw: u8) -> Self {
        let raw = (raw & MAX_RAW_TILE) as u16;
        let code = match raw {
            0 => 0,
            1..=5 => raw + 9,
            6..=12 => (raw - 4) * 10,
            13..=16 => raw + 77,
            17..=19 => (raw - 7) * 10,
            20..=21 => raw + 110,
            22..=31 => (raw - 8) * 10,
            32..=33 => raw + 208,
            34..=35 => raw + 216,
            _ => (raw - 10) * 10,
        };
        Self::from_code(code)
    }

    /// Returns the tile for a semantic code; unnamed codes become
    /// [`Tile::Reserved`].
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => Self::Empty,
            10 => Self::SquareWall,
            11 => Self::LowerLeftDiagonalWall,
            12 => Self::UpperLeftDiagonalWall,
            13 => Self::UpperRightDiagonalWall,
            14 => Self::LowerRightDiagonalWall,
            20 => Self::NeutralFloor,
            30 => Self::RedFlag,
            40 => Self::BlueFlag,
            50 => Self::NeutralSpeedpad,
            60 => Self::Powerup,
            61 => Self::JukeJuicePowerup,
            62 => Self::RollingBombPowerup,
            63 => Self::TagProPowerup,
            64 => Self::TopSpeedPowerup,
            70 => Self::Spike,
            80 => Self::Button,
            90 => Self::OpenGate,
            91 => Self::ClosedGate,
            92 => Self::RedGate,
            93 => Self::BlueGate,
            100 => Self::Bomb,
            110 => Self::RedFloor,
            120 => Self::BlueFloor,
            130 => Self::EntryPortal,
            131 => Self::ExitPortal,
            140 => Self::RedSpeedpad,
            150 => Self::BlueSpeedpad,
            160 => Self::NeutralFlag,
            161 => Self::TemporaryFlag,
            170 => Self::RedEndzone,
            180 => Self::BlueEndzone,
            other => Self::Reserved(other),
        }
    }

    /// Returns the semantic code of the tile.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Empty => 0,
            Self::SquareWall => 10,
            Self::LowerLeftDiagonalWall => 11,
            Self::UpperLeftDiagonalWall => 12,
            Self::UpperRightDiagonalWall => 13,
            Self::LowerRightDiagonalWall => 14,
            Self::NeutralFloor => 20,
            Self::RedFlag => 30,
            Self::BlueFlag => 40,
            Self::NeutralSpeedpad => 50,
            Self::Powerup => 60,
            Self::JukeJuicePowerup => 61,
            Self::RollingBombPowerup => 62,
            Self::TagProPowerup => 63,
            Self::TopSpeedPowerup => 64,
            Self::Spike => 70,
            Self::Button => 80,
            Self::OpenGate => 90,
            Self::ClosedGate => 91,
            Self::RedGate => 92,
            Self::BlueGate => 93,
            Self::Bomb => 100,
            Self::RedFloor => 110,
            Self::BlueFloor => 120,
            Self::EntryPortal => 130,
            Self::ExitPortal => 131,
            Self::RedSpeedpad => 140,
            Self::BlueSpeedpad => 150,
            Self::NeutralFlag => 160,
            Self::TemporaryFlag => 161,
            Self::RedEndzone => 170,
            Self::BlueEndzone => 180,
            Self::Reserved(code) => code,
        }
    }

    /// Returns the raw map-log value for this tile, if it has one.
    #[must_use]
    pub const fn raw(self) -> Option<u8> {
        let code = self.code();
        let raw = match code {
            0 => 0,
            10..=14 => code - 9,
            20..=80 if code % 10 == 0 => code / 10 + 4,
            90..=93 => code - 77,
            100..=120 if code % 10 == 0 => code / 10 + 7,
            130..=131 => code - 110,
            140..=230 if code % 10 == 0 => code / 10 + 8,
            240..=241 => code - 208,
            250..=251 => code - 216,
            260..=530 if code % 10 == 0 => code / 10 + 10,
            _ => return None,
        };
        Some(raw as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_empty() {
        assert_eq!(Tile::from_six_bits(0), Tile::Empty);
        assert_eq!(Tile::Empty.code(), 0);
    }

    #[test]
    fn range_boundaries() {
        let expected = [
            (1, 10),
            (5, 14),
            (6, 20),
            (12, 80),
            (13, 90),
            (16, 93),
            (17, 100),
            (19, 120),
            (20, 130),
            (21, 131),
            (22, 140),
            (31, 230),
            (32, 240),
            (33, 241),
            (34, 250),
            (35, 251),
            (36, 260),
            (63, 530),
        ];
        for (raw, code) in expected {
            assert_eq!(Tile::from_six_bits(raw).code(), code, "raw {raw}");
        }
    }

    #[test]
    fn named_tiles() {
        assert_eq!(Tile::from_six_bits(1), Tile::SquareWall);
        assert_eq!(Tile::from_six_bits(7), Tile::RedFlag);
        assert_eq!(Tile::from_six_bits(10), Tile::Powerup);
        assert_eq!(Tile::from_six_bits(15), Tile::RedGate);
        assert_eq!(Tile::from_six_bits(21), Tile::ExitPortal);
        assert_eq!(Tile::from_six_bits(24), Tile::NeutralFlag);
        assert_eq!(Tile::from_six_bits(26), Tile::BlueEndzone);
        assert_eq!(Tile::from_six_bits(27), Tile::Reserved(190));
    }

    #[test]
    fn codes_are_distinct_over_raw_range() {
        let mut codes: Vec<u16> = (0..=MAX_RAW_TILE)
            .map(|raw| Tile::from_six_bits(raw).code())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 64);
    }

    #[test]
    fn raw_inverts_table() {
        for raw in 0..=MAX_RAW_TILE {
            assert_eq!(Tile::from_six_bits(raw).raw(), Some(raw));
        }
    }

    #[test]
    fn unmapped_tiles_have_no_raw() {
        assert_eq!(Tile::TemporaryFlag.raw(), None);
        assert_eq!(Tile::JukeJuicePowerup.raw(), None);
        assert_eq!(Tile::Reserved(195).raw(), None);
        assert_eq!(Tile::Reserved(540).raw(), None);
    }

    #[test]
    fn from_raw_rejects_wide_values() {
        assert_eq!(Tile::from_raw(13).unwrap(), Tile::OpenGate);
        assert_eq!(
            Tile::from_raw(64),
            Err(ReplayError::InvalidTileCode { code: 64 })
        );
    }

    #[test]
    fn code_roundtrip_for_named_tiles() {
        for code in [0u16, 11, 61, 64, 161, 180] {
            assert_eq!(Tile::from_code(code).code(), code);
        }
    }
}
