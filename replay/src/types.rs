//! Core player-state types shared by the decoders.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A playing team. Spectators have no team (`Option::<Team>::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Team {
    /// Team 1.
    Red = 1,
    /// Team 2.
    Blue = 2,
}

impl Team {
    /// Returns the log number of the team.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the opposing team.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

/// A flag carried by a player. Not carrying is `Option::<Flag>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum Flag {
    /// The opposing team's flag.
    Opponent = 1,
    /// The opposing team's potato flag.
    OpponentPotato = 2,
    /// The neutral flag.
    Neutral = 3,
    /// The neutral potato flag.
    NeutralPotato = 4,
    /// A flag whose kind was not recorded; used when a grab is followed by
    /// a capture that does not keep the flag.
    Temporary = 5,
}

impl Flag {
    /// Creates one of the four recorded flag kinds from its code (1..=4).
    #[must_use]
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Opponent),
            2 => Some(Self::OpponentPotato),
            3 => Some(Self::Neutral),
            4 => Some(Self::NeutralPotato),
            _ => None,
        }
    }

    /// Creates a recorded flag kind from the 2-bit field stored after a grab.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        match bits & 0b11 {
            0 => Self::Opponent,
            1 => Self::OpponentPotato,
            2 => Self::Neutral,
            _ => Self::NeutralPotato,
        }
    }

    /// Returns the numeric code of the flag.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// A single power-up kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum Power {
    /// Juke juice.
    JukeJuice = 1,
    /// Rolling bomb.
    RollingBomb = 2,
    /// Tag pro.
    TagPro = 4,
    /// Top speed.
    TopSpeed = 8,
}

impl Power {
    /// All power-up kinds in log order.
    pub const ALL: [Self; 4] = [
        Self::JukeJuice,
        Self::RollingBomb,
        Self::TagPro,
        Self::TopSpeed,
    ];

    /// Returns the bit of this power inside [`Powers`].
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// The set of power-ups a player holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Powers(u8);

impl Powers {
    /// No power-ups held.
    pub const NONE: Self = Self(0);

    /// Mask of the four defined power bits.
    const MASK: u8 = 0b1111;

    /// Creates a set from raw bits; bits above the four powers are dropped.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw & Self::MASK)
    }

    /// Returns the raw power bits.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns `true` if no power-up is held.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `power` is held.
    #[must_use]
    pub const fn contains(self, power: Power) -> bool {
        self.0 & power.bit() != 0
    }

    /// Returns the set with `power` added.
    #[must_use]
    pub const fn with(self, power: Power) -> Self {
        Self(self.0 | power.bit())
    }

    /// Returns the set with `power` removed.
    #[must_use]
    pub const fn without(self, power: Power) -> Self {
        Self(self.0 & !power.bit())
    }

    /// Iterates the held powers in log order.
    pub fn iter(self) -> impl Iterator<Item = Power> {
        Power::ALL.into_iter().filter(move |&power| self.contains(power))
    }

    /// Returns the number of held powers.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }
}

impl FromIterator<Power> for Powers {
    fn from_iter<I: IntoIterator<Item = Power>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_numbers() {
        assert_eq!(Team::Red.number(), 1);
        assert_eq!(Team::Blue.number(), 2);
    }

    #[test]
    fn team_other_swaps() {
        assert_eq!(Team::Red.other(), Team::Blue);
        assert_eq!(Team::Blue.other(), Team::Red);
    }

    #[test]
    fn flag_codes() {
        for code in 1..=4 {
            let flag = Flag::from_code(code).unwrap();
            assert_eq!(u64::from(flag.code()), code);
        }
        assert_eq!(Flag::from_code(0), None);
        assert_eq!(Flag::from_code(5), None);
        assert_eq!(Flag::Temporary.code(), 5);
    }

    #[test]
    fn flag_from_bits_is_code_minus_one() {
        for bits in 0..4 {
            assert_eq!(Flag::from_bits(bits), Flag::from_code(bits + 1).unwrap());
        }
        assert_eq!(Flag::from_bits(0b110), Flag::Neutral);
    }

    #[test]
    fn power_bits_are_distinct() {
        let all: Powers = Power::ALL.into_iter().collect();
        assert_eq!(all.raw(), 0b1111);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn powers_with_without() {
        let powers = Powers::NONE.with(Power::TagPro).with(Power::JukeJuice);
        assert!(powers.contains(Power::TagPro));
        assert!(powers.contains(Power::JukeJuice));
        assert!(!powers.contains(Power::TopSpeed));
        let powers = powers.without(Power::TagPro);
        assert!(!powers.contains(Power::TagPro));
        assert_eq!(powers.iter().collect::<Vec<_>>(), vec![Power::JukeJuice]);
    }

    #[test]
    fn powers_from_raw_masks_unknown_bits() {
        assert_eq!(Powers::from_raw(0xFF).raw(), 0b1111);
        assert!(Powers::default().is_empty());
    }
}
