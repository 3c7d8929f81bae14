use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::color::Color;
use crate::model::player::PlayerId;
use crate::model::score::Score;
use crate::model::trick::Trick;
use core::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnStateError {
    #[error("invalid packed score {0:#x}")]
    Score(u64),
    #[error("invalid packed card set {0:#x}")]
    UnplayedCards(u64),
    #[error("invalid packed trick {0:#x}")]
    Trick(u32),
    #[error("card {0} is both in the trick and unplayed")]
    Inconsistent(Card),
}

/// Score, unplayed cards and current trick of a turn.
///
/// Every transition returns a new value; the turn is over once the last
/// trick has been collected and the current trick is [`Trick::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnState {
    score: Score,
    unplayed: CardSet,
    trick: Trick,
}

impl TurnState {
    pub fn initial(trump: Color, score: Score, first_player: PlayerId) -> Self {
        Self {
            score,
            unplayed: CardSet::ALL_CARDS,
            trick: Trick::first_empty(trump, first_player),
        }
    }

    /// Rebuilds a state from its three packed components, as carried by the
    /// card request of the remote protocol.
    pub fn from_packed_components(
        score: u64,
        unplayed: u64,
        trick: u32,
    ) -> Result<Self, TurnStateError> {
        let score = Score::from_packed(score).ok_or(TurnStateError::Score(score))?;
        let unplayed =
            CardSet::from_packed(unplayed).ok_or(TurnStateError::UnplayedCards(unplayed))?;
        let trick = Trick::from_packed(trick).ok_or(TurnStateError::Trick(trick))?;
        if !trick.is_invalid() {
            if let Some(card) = trick.cards().find(|&card| unplayed.contains(card)) {
                return Err(TurnStateError::Inconsistent(card));
            }
        }
        Ok(Self {
            score,
            unplayed,
            trick,
        })
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn unplayed_cards(&self) -> CardSet {
        self.unplayed
    }

    pub fn trick(&self) -> Trick {
        self.trick
    }

    pub fn packed_score(&self) -> u64 {
        self.score.packed()
    }

    pub fn packed_unplayed_cards(&self) -> u64 {
        self.unplayed.packed()
    }

    pub fn packed_trick(&self) -> u32 {
        self.trick.packed()
    }

    pub fn is_terminal(&self) -> bool {
        self.trick.is_invalid()
    }

    pub fn next_player(&self) -> PlayerId {
        assert!(!self.is_terminal(), "the turn is over");
        self.trick.next_player()
    }

    #[must_use]
    pub fn with_score(self, score: Score) -> Self {
        Self { score, ..self }
    }

    /// # Panics
    /// When the trick is full, the turn is over or `card` was already played.
    #[must_use]
    pub fn with_card_played(self, card: Card) -> Self {
        assert!(!self.is_terminal(), "the turn is over");
        assert!(!self.trick.is_full(), "the trick must be collected first");
        assert!(self.unplayed.contains(card), "{card} was already played");
        Self {
            unplayed: self.unplayed.remove(card),
            trick: self.trick.with_added_card(card),
            ..self
        }
    }

    /// # Panics
    /// When the trick is not full.
    #[must_use]
    pub fn with_trick_collected(self) -> Self {
        assert!(!self.is_terminal(), "the turn is over");
        assert!(self.trick.is_full(), "only a full trick can be collected");
        let winner = self.trick.winning_player();
        Self {
            score: self
                .score
                .with_additional_trick(winner.team(), self.trick.points()),
            unplayed: self.unplayed,
            trick: self.trick.next_empty(),
        }
    }

    #[must_use]
    pub fn with_card_played_and_trick_collected(self, card: Card) -> Self {
        let played = self.with_card_played(card);
        if played.trick.is_full() {
            played.with_trick_collected()
        } else {
            played
        }
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {}, {} unplayed, {}",
            self.score,
            self.unplayed.len(),
            self.trick
        )
    }
}
