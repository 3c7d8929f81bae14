use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::color::Color;
use crate::model::meld_set::MeldSet;
use crate::model::player::{PlayerId, TeamId};
use crate::model::score::Score;
use crate::model::trick::Trick;
use crate::model::turn_state::TurnState;

/// Everything that can sit at the table: a local search bot, a remote peer
/// or a front end driven by a human.
///
/// The game asks the two required questions and reports every state change
/// through the `on_*` notifications, which do nothing unless overridden.
pub trait Player: Send {
    /// Card to play given the current state and the player's hand.
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Card;

    /// Trump color for the turn about to start.
    fn choose_trump(&mut self, hand: CardSet) -> Color;

    /// Whether to let the team-mate pick the trump instead.
    fn delegates_trump_choice(&mut self, _hand: CardSet) -> bool {
        false
    }

    /// Melds announced for this turn; the strongest set by default.
    fn select_meld_set(&mut self, hand: CardSet) -> MeldSet {
        MeldSet::best_in(hand)
    }

    fn on_game_start(&mut self, _own_id: PlayerId, _player_names: &[String; 4]) {}

    fn on_hand_updated(&mut self, _hand: CardSet) {}

    fn on_trump_set(&mut self, _trump: Color) {}

    fn on_trick_updated(&mut self, _trick: Trick) {}

    fn on_score_updated(&mut self, _score: Score) {}

    fn on_game_won(&mut self, _winning_team: TeamId) {}

    fn on_meld_winner_determined(&mut self, _winner: PlayerId, _melds: &MeldSet) {}
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Card {
        (**self).card_to_play(state, hand)
    }

    fn choose_trump(&mut self, hand: CardSet) -> Color {
        (**self).choose_trump(hand)
    }

    fn delegates_trump_choice(&mut self, hand: CardSet) -> bool {
        (**self).delegates_trump_choice(hand)
    }

    fn select_meld_set(&mut self, hand: CardSet) -> MeldSet {
        (**self).select_meld_set(hand)
    }

    fn on_game_start(&mut self, own_id: PlayerId, player_names: &[String; 4]) {
        (**self).on_game_start(own_id, player_names)
    }

    fn on_hand_updated(&mut self, hand: CardSet) {
        (**self).on_hand_updated(hand)
    }

    fn on_trump_set(&mut self, trump: Color) {
        (**self).on_trump_set(trump)
    }

    fn on_trick_updated(&mut self, trick: Trick) {
        (**self).on_trick_updated(trick)
    }

    fn on_score_updated(&mut self, score: Score) {
        (**self).on_score_updated(score)
    }

    fn on_game_won(&mut self, winning_team: TeamId) {
        (**self).on_game_won(winning_team)
    }

    fn on_meld_winner_determined(&mut self, winner: PlayerId, melds: &MeldSet) {
        (**self).on_meld_winner_determined(winner, melds)
    }
}

/// Plays the first legal card and keeps its melds to itself. Handy as a
/// fallback and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalPlayer;

impl Player for FirstLegalPlayer {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Card {
        state.trick().legal_cards(hand).get(0)
    }

    fn choose_trump(&mut self, _hand: CardSet) -> Color {
        Color::Spade
    }

    fn select_meld_set(&mut self, _hand: CardSet) -> MeldSet {
        MeldSet::EMPTY
    }
}
