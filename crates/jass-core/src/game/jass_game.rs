use crate::game::player::Player;
use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::color::Color;
use crate::model::deck::{Deck, FIRST_LEAD_CARD, holder_of};
use crate::model::meld_set::MeldSet;
use crate::model::player::{PlayerId, TeamId};
use crate::model::score::Score;
use crate::model::trick::Trick;
use crate::model::turn_state::TurnState;
use crate::model::{CARDS_PER_TRICK, WINNING_POINTS};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{player} played {card}, which is not one of the legal cards {legal}")]
    IllegalCard {
        player: PlayerId,
        card: Card,
        legal: CardSet,
    },
}

/// A game between four players, driven one trick at a time.
pub struct JassGame {
    seed: u64,
    players: [Box<dyn Player>; 4],
    names: [String; 4],
    shuffle_rng: StdRng,
    hands: [CardSet; 4],
    state: Option<TurnState>,
    turn_first_player: PlayerId,
    turn_number: u32,
    melds: [MeldSet; 4],
    winner: Option<TeamId>,
}

impl JassGame {
    pub fn new(seed: u64, players: [Box<dyn Player>; 4], names: [String; 4]) -> Self {
        let mut master = StdRng::seed_from_u64(seed);
        let shuffle_rng = StdRng::seed_from_u64(master.next_u64());
        Self {
            seed,
            players,
            names,
            shuffle_rng,
            hands: [CardSet::EMPTY; 4],
            state: None,
            turn_first_player: PlayerId::Player1,
            turn_number: 0,
            melds: Default::default(),
            winner: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winning_team(&self) -> Option<TeamId> {
        self.winner
    }

    /// Current turn state; `None` until the first call to
    /// [`JassGame::advance_to_end_of_next_trick`].
    pub fn state(&self) -> Option<&TurnState> {
        self.state.as_ref()
    }

    pub fn score(&self) -> Score {
        self.state.map_or(Score::INITIAL, |state| state.score())
    }

    pub fn hand(&self, player: PlayerId) -> CardSet {
        self.hands[player.index()]
    }

    pub fn names(&self) -> &[String; 4] {
        &self.names
    }

    /// Number of the turn in progress, starting at 1.
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Plays the game up to the point where the next trick is full but not
    /// yet collected, or until a team reaches the winning total. Does
    /// nothing once the game is over.
    pub fn advance_to_end_of_next_trick(&mut self) -> Result<(), GameError> {
        if self.is_game_over() {
            return Ok(());
        }

        let current = self.state;
        let state = match current {
            None => {
                self.start_game();
                let first_player = self.first_player_of_game();
                self.start_turn(first_player, Score::INITIAL)
            }
            Some(state) => {
                let first_trick = state.trick().index() == 0;
                let mut collected = state.with_trick_collected();
                if first_trick {
                    collected = self.credit_melds(collected);
                }
                self.log_trick_collected(state.trick(), collected.score());

                if let Some(winner) = self.winner_of(collected.score(), state.trick()) {
                    self.finish_game(collected, winner);
                    return Ok(());
                }
                if collected.is_terminal() {
                    let next_first = self.turn_first_player.next();
                    self.start_turn(next_first, collected.score().next_turn())
                } else {
                    collected
                }
            }
        };
        self.state = Some(state);
        self.play_trick()
    }

    fn start_game(&mut self) {
        for id in PlayerId::LOOP {
            self.players[id.index()].on_game_start(id, &self.names);
        }
    }

    fn deal(&mut self) {
        self.hands = Deck::shuffled(&mut self.shuffle_rng).deal();
        for id in PlayerId::LOOP {
            self.players[id.index()].on_hand_updated(self.hands[id.index()]);
        }
    }

    /// Deals the first turn's cards and finds who holds the seven of diamonds.
    fn first_player_of_game(&mut self) -> PlayerId {
        self.deal();
        holder_of(&self.hands, FIRST_LEAD_CARD).unwrap_or(PlayerId::Player1)
    }

    fn start_turn(&mut self, first_player: PlayerId, score: Score) -> TurnState {
        if self.turn_number > 0 {
            self.deal();
        }
        self.turn_number += 1;
        self.turn_first_player = first_player;
        self.melds = Default::default();

        let trump = self.choose_trump(first_player);
        for player in self.players.iter_mut() {
            player.on_trump_set(trump);
        }
        event!(
            target: "jass_core::game",
            Level::INFO,
            turn = self.turn_number,
            first_player = %first_player,
            trump = %trump,
            score = %score,
            "turn started"
        );
        TurnState::initial(trump, score, first_player)
    }

    fn choose_trump(&mut self, chooser: PlayerId) -> Color {
        let hand = self.hands[chooser.index()];
        if self.players[chooser.index()].delegates_trump_choice(hand) {
            let mate = chooser.team_mate();
            event!(
                target: "jass_core::game",
                Level::DEBUG,
                chooser = %chooser,
                mate = %mate,
                "trump choice delegated"
            );
            self.players[mate.index()].choose_trump(self.hands[mate.index()])
        } else {
            self.players[chooser.index()].choose_trump(hand)
        }
    }

    fn play_trick(&mut self) -> Result<(), GameError> {
        let Some(mut state) = self.state else {
            return Ok(());
        };
        for player in self.players.iter_mut() {
            player.on_score_updated(state.score());
            player.on_trick_updated(state.trick());
        }

        for _ in 0..CARDS_PER_TRICK {
            let id = state.next_player();
            let hand = self.hands[id.index()];
            if state.trick().index() == 0 {
                self.select_melds(id, hand);
            }

            let card = self.players[id.index()].card_to_play(&state, hand);
            let legal = state.trick().legal_cards(hand);
            if !legal.contains(card) {
                return Err(GameError::IllegalCard {
                    player: id,
                    card,
                    legal,
                });
            }

            state = state.with_card_played(card);
            self.hands[id.index()] = hand.remove(card);
            self.state = Some(state);
            self.players[id.index()].on_hand_updated(self.hands[id.index()]);
            for player in self.players.iter_mut() {
                player.on_trick_updated(state.trick());
            }
        }
        Ok(())
    }

    fn select_melds(&mut self, id: PlayerId, hand: CardSet) {
        let selected = self.players[id.index()].select_meld_set(hand);
        self.melds[id.index()] = if hand.contains_all(selected.cards()) {
            selected
        } else {
            event!(
                target: "jass_core::game",
                Level::WARN,
                player = %id,
                melds = %selected,
                "announced melds are not in hand, ignoring them"
            );
            MeldSet::EMPTY
        };
    }

    /// Credits the strongest announcement, earlier declarations winning ties.
    fn credit_melds(&mut self, state: TurnState) -> TurnState {
        let mut winner = self.turn_first_player;
        for offset in 1..PlayerId::COUNT {
            let challenger = self.turn_first_player.advanced_by(offset);
            if self.melds[challenger.index()].beats(&self.melds[winner.index()]) {
                winner = challenger;
            }
        }

        let melds = std::mem::take(&mut self.melds[winner.index()]);
        for player in self.players.iter_mut() {
            player.on_meld_winner_determined(winner, &melds);
        }
        if melds.is_empty() {
            return state;
        }
        event!(
            target: "jass_core::game",
            Level::INFO,
            winner = %winner,
            points = melds.points(),
            melds = %melds,
            "melds credited"
        );
        state.with_score(state.score().with_meld_points(winner.team(), melds.points()))
    }

    fn winner_of(&self, score: Score, last_trick: Trick) -> Option<TeamId> {
        let reached = TeamId::ALL
            .iter()
            .any(|&team| score.total_points(team) >= WINNING_POINTS);
        if !reached {
            return None;
        }
        Some(
            score
                .leading_team()
                .unwrap_or_else(|| last_trick.winning_player().team()),
        )
    }

    fn finish_game(&mut self, state: TurnState, winner: TeamId) {
        let final_score = state.score().next_turn();
        self.state = Some(state.with_score(final_score));
        self.winner = Some(winner);
        for player in self.players.iter_mut() {
            player.on_score_updated(final_score);
            player.on_game_won(winner);
        }
        event!(
            target: "jass_core::game",
            Level::INFO,
            winner = %winner,
            score = %final_score,
            turns = self.turn_number,
            "game won"
        );
    }

    fn log_trick_collected(&self, trick: Trick, score: Score) {
        event!(
            target: "jass_core::game",
            Level::DEBUG,
            trick = %trick,
            winner = %trick.winning_player(),
            points = trick.points(),
            score = %score,
            "trick collected"
        );
    }
}
