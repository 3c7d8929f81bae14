use jass_core::game::Player;
use jass_core::model::card::Card;
use jass_core::model::card_set::CardSet;
use jass_core::model::color::Color;
use jass_core::model::meld_set::MeldSet;
use jass_core::model::player::{PlayerId, TeamId};
use jass_core::model::score::Score;
use jass_core::model::trick::Trick;
use jass_core::model::turn_state::TurnState;
use std::time::{Duration, Instant};

/// Wraps a player so that choosing a card never takes less than
/// `min_delay`. Every other call is forwarded untouched.
pub struct PacedPlayer<P> {
    inner: P,
    min_delay: Duration,
}

impl<P: Player> PacedPlayer<P> {
    pub fn new(inner: P, min_delay: Duration) -> Self {
        Self { inner, min_delay }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Player> Player for PacedPlayer<P> {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Card {
        let started = Instant::now();
        let card = self.inner.card_to_play(state, hand);
        if let Some(remaining) = self.min_delay.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
        card
    }

    fn choose_trump(&mut self, hand: CardSet) -> Color {
        self.inner.choose_trump(hand)
    }

    fn delegates_trump_choice(&mut self, hand: CardSet) -> bool {
        self.inner.delegates_trump_choice(hand)
    }

    fn select_meld_set(&mut self, hand: CardSet) -> MeldSet {
        self.inner.select_meld_set(hand)
    }

    fn on_game_start(&mut self, own_id: PlayerId, player_names: &[String; 4]) {
        self.inner.on_game_start(own_id, player_names);
    }

    fn on_hand_updated(&mut self, hand: CardSet) {
        self.inner.on_hand_updated(hand);
    }

    fn on_trump_set(&mut self, trump: Color) {
        self.inner.on_trump_set(trump);
    }

    fn on_trick_updated(&mut self, trick: Trick) {
        self.inner.on_trick_updated(trick);
    }

    fn on_score_updated(&mut self, score: Score) {
        self.inner.on_score_updated(score);
    }

    fn on_game_won(&mut self, winning_team: TeamId) {
        self.inner.on_game_won(winning_team);
    }

    fn on_meld_winner_determined(&mut self, winner: PlayerId, melds: &MeldSet) {
        self.inner.on_meld_winner_determined(winner, melds);
    }
}
