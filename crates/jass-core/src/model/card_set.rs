use crate::bits::bits64;
use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::rank::Rank;
use core::fmt;

const COLOR_STRIDE: u32 = 16;
const RANKS_PER_COLOR: u32 = Rank::COUNT as u32;

/// An unordered set of distinct cards, packed one bit per card.
///
/// Card `(color, rank)` occupies bit `16 * color + rank`; every other bit is
/// always zero. Iteration and [`CardSet::get`] follow the packed order, that
/// is colors Spade, Heart, Diamond, Club and natural ranks within a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardSet(u64);

impl CardSet {
    pub const EMPTY: CardSet = CardSet(0);
    pub const ALL_CARDS: CardSet = CardSet(0x01FF_01FF_01FF_01FF);

    pub fn from_packed(packed: u64) -> Option<Self> {
        Self::is_valid_packed(packed).then_some(Self(packed))
    }

    pub fn is_valid_packed(packed: u64) -> bool {
        packed & !Self::ALL_CARDS.0 == 0
    }

    pub const fn packed(self) -> u64 {
        self.0
    }

    pub fn singleton(card: Card) -> Self {
        Self(1u64 << Self::bit_index(card))
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(self, card: Card) -> bool {
        self.0 & (1u64 << Self::bit_index(card)) != 0
    }

    pub fn contains_all(self, other: CardSet) -> bool {
        other.0 & !self.0 == 0
    }

    #[must_use]
    pub fn add(self, card: Card) -> Self {
        Self(self.0 | (1u64 << Self::bit_index(card)))
    }

    #[must_use]
    pub fn remove(self, card: Card) -> Self {
        Self(self.0 & !(1u64 << Self::bit_index(card)))
    }

    #[must_use]
    pub const fn union(self, other: CardSet) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: CardSet) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn difference(self, other: CardSet) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::ALL_CARDS.0)
    }

    /// The `index`-th card in packed order.
    ///
    /// # Panics
    /// When `index >= self.len()`.
    pub fn get(self, index: usize) -> Card {
        assert!(
            index < self.len(),
            "index {index} out of range for a set of {} cards",
            self.len()
        );
        let mut bits = self.0;
        for _ in 0..index {
            bits &= bits - 1;
        }
        Self::card_at(bits.trailing_zeros())
    }

    /// Position of `card` in packed order, if present.
    pub fn index_of(self, card: Card) -> Option<usize> {
        if !self.contains(card) {
            return None;
        }
        let below = self.0 & ((1u64 << Self::bit_index(card)) - 1);
        Some(below.count_ones() as usize)
    }

    pub fn iter(self) -> CardSetIter {
        CardSetIter(self.0)
    }

    pub fn subset_of_color(self, color: Color) -> Self {
        let mask = bits64::mask(COLOR_STRIDE * color as u32, RANKS_PER_COLOR);
        Self(self.0 & mask)
    }

    /// Cards of `card`'s color that rank strictly above it in trump order.
    pub fn trump_above(card: Card) -> Self {
        Rank::ORDERED
            .iter()
            .filter(|rank| rank.trump_ordinal() > card.rank.trump_ordinal())
            .map(|&rank| Card::new(card.color, rank))
            .collect()
    }

    fn bit_index(card: Card) -> u32 {
        COLOR_STRIDE * card.color as u32 + card.rank as u32
    }

    fn card_at(bit: u32) -> Card {
        let color = Color::ALL[(bit / COLOR_STRIDE) as usize];
        let rank = Rank::ORDERED[(bit % COLOR_STRIDE) as usize];
        Card::new(color, rank)
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        iter.into_iter().fold(CardSet::EMPTY, CardSet::add)
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;

    fn into_iter(self) -> CardSetIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct CardSetIter(u64);

impl Iterator for CardSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(CardSet::card_at(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CardSetIter {}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("}")
    }
}
