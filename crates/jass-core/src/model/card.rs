use crate::bits::bits32;
use crate::model::color::Color;
use crate::model::rank::Rank;
use core::fmt;

const RANK_START: u32 = 0;
const RANK_BITS: u32 = 4;
const COLOR_START: u32 = 4;
const COLOR_BITS: u32 = 2;

/// Six-bit pattern marking an absent card inside a packed trick.
pub const INVALID_PACKED_CARD: u32 = 0b11_1111;

/// Derived ordering (color, then natural rank) matches the packed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    pub fn packed(self) -> u32 {
        bits32::pack(&[
            (self.rank as u32, RANK_BITS),
            (self.color as u32, COLOR_BITS),
        ])
    }

    pub fn is_valid_packed(packed: u32) -> bool {
        packed & !bits32::mask(0, RANK_BITS + COLOR_BITS) == 0
            && (bits32::extract(packed, RANK_START, RANK_BITS) as usize) < Rank::COUNT
    }

    pub fn from_packed(packed: u32) -> Option<Self> {
        if !Self::is_valid_packed(packed) {
            return None;
        }
        let rank = Rank::from_index(bits32::extract(packed, RANK_START, RANK_BITS) as usize)?;
        let color = Color::from_index(bits32::extract(packed, COLOR_START, COLOR_BITS) as usize)?;
        Some(Self::new(color, rank))
    }

    /// Whether `self` beats `that` in a trick where `trump` is dominant.
    /// Cards of different non-trump colors never beat each other.
    pub fn is_better(self, trump: Color, that: Card) -> bool {
        if self.color == that.color {
            if self.color == trump {
                self.rank.trump_ordinal() > that.rank.trump_ordinal()
            } else {
                self.rank > that.rank
            }
        } else {
            self.color == trump
        }
    }

    pub fn points(self, trump: Color) -> u32 {
        if self.color == trump {
            match self.rank {
                Rank::Six | Rank::Seven | Rank::Eight => 0,
                Rank::Nine => 14,
                Rank::Ten => 10,
                Rank::Jack => 20,
                Rank::Queen => 3,
                Rank::King => 4,
                Rank::Ace => 11,
            }
        } else {
            match self.rank {
                Rank::Six | Rank::Seven | Rank::Eight | Rank::Nine => 0,
                Rank::Ten => 10,
                Rank::Jack => 2,
                Rank::Queen => 3,
                Rank::King => 4,
                Rank::Ace => 11,
            }
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color, self.rank)
    }
}
