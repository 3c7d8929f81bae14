use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::color::Color;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use crate::model::{HAND_SIZE, TOTAL_CARDS};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The card whose holder leads the first turn of a game.
pub const FIRST_LEAD_CARD: Card = Card::new(Color::Diamond, Rank::Seven);

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let cards: Vec<Card> = CardSet::ALL_CARDS.iter().collect();
        debug_assert_eq!(cards.len(), TOTAL_CARDS);
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Seat `p` receives the cards at positions `9p..9p+9`.
    pub fn deal(&self) -> [CardSet; 4] {
        let mut hands = [CardSet::EMPTY; 4];
        for (hand, chunk) in hands.iter_mut().zip(self.cards.chunks(HAND_SIZE)) {
            *hand = chunk.iter().copied().collect();
        }
        hands
    }
}

/// Seat holding `card` among dealt hands.
pub fn holder_of(hands: &[CardSet; 4], card: Card) -> Option<PlayerId> {
    PlayerId::LOOP
        .iter()
        .copied()
        .find(|id| hands[id.index()].contains(card))
}
