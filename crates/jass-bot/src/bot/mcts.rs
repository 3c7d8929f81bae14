use super::params::MctsParams;
use super::tree::{ROOT, SearchTree};
use super::trump::strongest_trump;
use jass_core::game::Player;
use jass_core::model::card::Card;
use jass_core::model::card_set::CardSet;
use jass_core::model::color::Color;
use jass_core::model::player::{PlayerId, TeamId};
use jass_core::model::turn_state::TurnState;
use jass_core::model::{MAX_POINTS_PER_TURN, MAX_POINTS_PER_TURN_WITHOUT_MATCH};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{Level, event};

/// Player choosing cards by Monte-Carlo tree search over the current turn.
///
/// The search runs for the seat the state says is to move. Cards the
/// player cannot see are treated as a pool any other seat may hold, so
/// rollouts play them openly.
pub struct MctsPlayer {
    own_id: PlayerId,
    rng: SmallRng,
    params: MctsParams,
}

impl MctsPlayer {
    pub fn new(own_id: PlayerId, seed: u64, params: MctsParams) -> Self {
        Self {
            own_id,
            rng: SmallRng::seed_from_u64(seed),
            params,
        }
    }

    pub fn own_id(&self) -> PlayerId {
        self.own_id
    }

    pub fn params(&self) -> MctsParams {
        self.params
    }

    fn search(&mut self, state: &TurnState, hand: CardSet) -> Card {
        let started = Instant::now();
        // The seat to move is the one searching, whatever seat was announced.
        let seat = state.next_player();
        let mut tree = SearchTree::new(*state, seat, hand);
        for _ in 0..self.params.iterations() {
            let path = tree.select_and_expand(self.params.exploration());
            let leaf = *path.last().unwrap_or(&ROOT);
            let final_state = self.rollout(&tree, *tree.node(leaf).state());
            let (mine, other) = Self::rewards(seat.team(), &final_state);
            tree.backpropagate(&path, mine, other);
        }

        let slot = tree.best_child(ROOT, 0.0).unwrap_or(0);
        let card = tree.card_of(ROOT, slot);
        if tracing::enabled!(Level::DEBUG) {
            let root = tree.node(ROOT);
            event!(
                target: "jass_bot::mcts",
                Level::DEBUG,
                player = %seat,
                chosen = %card,
                iterations = self.params.iterations(),
                nodes = tree.len(),
                root_visits = root.visits(),
                root_mean = root.mean_points(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "card chosen"
            );
        }
        card
    }

    /// Plays random cards until the turn is over.
    fn rollout(&mut self, tree: &SearchTree, mut state: TurnState) -> TurnState {
        while !state.is_terminal() {
            let playable = tree.playable_cards(&state);
            if playable.is_empty() {
                break;
            }
            let card = playable.get(self.rng.gen_range(0..playable.len()));
            state = state.with_card_played_and_trick_collected(card);
        }
        state
    }

    /// Turn points of the searching team and the matching figure for the
    /// opponents, on the scale that includes the match bonus for sweeps.
    fn rewards(team: TeamId, state: &TurnState) -> (u32, u32) {
        let mine = state.score().turn_points(team);
        let other = if mine == 0 || mine == MAX_POINTS_PER_TURN {
            MAX_POINTS_PER_TURN - mine
        } else {
            MAX_POINTS_PER_TURN_WITHOUT_MATCH.saturating_sub(mine)
        };
        (mine, other)
    }
}

impl Player for MctsPlayer {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Card {
        let legal = state.trick().legal_cards(hand);
        if legal.len() == 1 {
            return legal.get(0);
        }
        self.search(state, hand)
    }

    fn choose_trump(&mut self, hand: CardSet) -> Color {
        strongest_trump(hand)
    }

    fn on_game_start(&mut self, own_id: PlayerId, _player_names: &[String; 4]) {
        self.own_id = own_id;
    }
}

#[cfg(test)]
mod tests {
    use super::MctsPlayer;
    use crate::bot::params::MctsParams;
    use jass_core::game::Player;
    use jass_core::model::card::Card;
    use jass_core::model::card_set::CardSet;
    use jass_core::model::color::Color;
    use jass_core::model::deck::Deck;
    use jass_core::model::player::{PlayerId, TeamId};
    use jass_core::model::rank::Rank;
    use jass_core::model::score::Score;
    use jass_core::model::turn_state::TurnState;

    #[test]
    fn single_legal_card_is_returned_without_search() {
        let mut player = MctsPlayer::new(PlayerId::Player2, 1, MctsParams::new(9));
        let state = TurnState::initial(Color::Club, Score::INITIAL, PlayerId::Player1)
            .with_card_played(Card::new(Color::Heart, Rank::Six));
        let hand: CardSet = [
            Card::new(Color::Heart, Rank::King),
            Card::new(Color::Spade, Rank::Ace),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            player.card_to_play(&state, hand),
            Card::new(Color::Heart, Rank::King)
        );
    }

    #[test]
    fn rewards_follow_match_scale() {
        let mut state = TurnState::initial(Color::Club, Score::INITIAL, PlayerId::Player1);
        assert_eq!(MctsPlayer::rewards(TeamId::Team1, &state), (0, 257));
        state = state.with_score(Score::INITIAL.with_additional_trick(TeamId::Team1, 57));
        assert_eq!(MctsPlayer::rewards(TeamId::Team1, &state), (57, 100));
        assert_eq!(MctsPlayer::rewards(TeamId::Team2, &state), (0, 257));
    }

    #[test]
    fn sweep_leaves_nothing_for_the_opponents() {
        let mut score = Score::INITIAL;
        for _ in 0..8 {
            score = score.with_additional_trick(TeamId::Team2, 17);
        }
        score = score.with_additional_trick(TeamId::Team2, 21);
        let state = TurnState::initial(Color::Club, Score::INITIAL, PlayerId::Player1)
            .with_score(score);
        assert_eq!(MctsPlayer::rewards(TeamId::Team2, &state), (257, 0));
        assert_eq!(MctsPlayer::rewards(TeamId::Team1, &state), (0, 257));
    }

    #[test]
    fn unannounced_seat_still_plays_from_its_hand() {
        let hands = Deck::shuffled_with_seed(12).deal();
        let opening = TurnState::initial(Color::Diamond, Score::INITIAL, PlayerId::Player1);
        let state = opening
            .with_card_played(hands[0].get(0))
            .with_card_played(hands[1].get(0));
        let hand = hands[2];
        let mut player = MctsPlayer::new(PlayerId::Player1, 4, MctsParams::new(50));
        let card = player.card_to_play(&state, hand);
        assert!(state.trick().legal_cards(hand).contains(card), "played {card}");
    }

    #[test]
    fn game_start_updates_identity() {
        let mut player = MctsPlayer::new(PlayerId::Player1, 1, MctsParams::default());
        let names = ["a", "b", "c", "d"].map(String::from);
        player.on_game_start(PlayerId::Player3, &names);
        assert_eq!(player.own_id(), PlayerId::Player3);
    }
}
