use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::color::Color;
use crate::model::rank::Rank;
use core::fmt;
use std::sync::OnceLock;
use thiserror::Error;

const RUN_LENGTHS: [(usize, u32); 3] = [(3, 20), (4, 50), (5, 100)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeldError {
    #[error("cards {0} do not form a meld")]
    Unknown(CardSet),
    #[error("meld {cards} is worth {expected} points, not {actual}")]
    PointsMismatch {
        cards: CardSet,
        expected: u32,
        actual: u32,
    },
    #[error("melds share cards {0}")]
    Overlapping(CardSet),
}

/// A bonus combination from the fixed catalog: four cards of one rank
/// (nine and above) or a run of three to five consecutive cards of a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meld {
    cards: CardSet,
    points: u32,
}

impl Meld {
    /// Every meld of the 36-card deck, quartets first, then runs by color
    /// and length.
    pub fn catalog() -> &'static [Meld] {
        static CATALOG: OnceLock<Vec<Meld>> = OnceLock::new();
        CATALOG.get_or_init(build_catalog)
    }

    /// Catalog melds whose cards are all held in `hand`.
    pub fn all_in(hand: CardSet) -> Vec<Meld> {
        Self::catalog()
            .iter()
            .copied()
            .filter(|meld| hand.contains_all(meld.cards))
            .collect()
    }

    /// Looks up the catalog meld made of exactly `cards`.
    pub fn from_cards(cards: CardSet) -> Result<Meld, MeldError> {
        Self::catalog()
            .iter()
            .copied()
            .find(|meld| meld.cards == cards)
            .ok_or(MeldError::Unknown(cards))
    }

    /// Like [`Meld::from_cards`], also checking the announced value.
    pub fn from_parts(cards: CardSet, points: u32) -> Result<Meld, MeldError> {
        let meld = Self::from_cards(cards)?;
        if meld.points != points {
            return Err(MeldError::PointsMismatch {
                cards,
                expected: meld.points,
                actual: points,
            });
        }
        Ok(meld)
    }

    pub fn cards(self) -> CardSet {
        self.cards
    }

    pub fn points(self) -> u32 {
        self.points
    }

    pub fn highest_rank(self) -> Rank {
        self.cards
            .iter()
            .map(|card| card.rank)
            .max()
            .unwrap_or(Rank::Six)
    }
}

fn quartet_points(rank: Rank) -> u32 {
    match rank {
        Rank::Nine => 150,
        Rank::Jack => 200,
        _ => 100,
    }
}

fn build_catalog() -> Vec<Meld> {
    let mut catalog = Vec::new();
    for rank in Rank::ORDERED.into_iter().filter(|&rank| rank >= Rank::Nine) {
        let cards = Color::ALL.iter().map(|&color| Card::new(color, rank)).collect();
        catalog.push(Meld {
            cards,
            points: quartet_points(rank),
        });
    }
    for color in Color::ALL {
        for (length, points) in RUN_LENGTHS {
            for window in Rank::ORDERED.windows(length) {
                let cards = window.iter().map(|&rank| Card::new(color, rank)).collect();
                catalog.push(Meld { cards, points });
            }
        }
    }
    catalog
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.cards, self.points)
    }
}
