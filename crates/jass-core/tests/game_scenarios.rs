use jass_core::game::{FirstLegalPlayer, JassGame, Player};
use jass_core::model::card::Card;
use jass_core::model::card_set::CardSet;
use jass_core::model::color::Color;
use jass_core::model::deck::{Deck, FIRST_LEAD_CARD, holder_of};
use jass_core::model::meld_set::MeldSet;
use jass_core::model::player::{PlayerId, TeamId};
use jass_core::model::score::Score;
use jass_core::model::trick::Trick;
use jass_core::model::turn_state::TurnState;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Log {
    own_id: Option<PlayerId>,
    names: Vec<String>,
    trumps: Vec<Color>,
    hands: Vec<CardSet>,
    tricks: usize,
    scores: Vec<Score>,
    meld_winners: Vec<(PlayerId, u32)>,
    winner: Option<TeamId>,
    trump_requests: usize,
}

/// Plays the first legal card, delegates trump when asked to and records
/// every notification.
struct RecordingPlayer {
    log: Arc<Mutex<Log>>,
    delegate: bool,
}

impl Player for RecordingPlayer {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Card {
        state.trick().legal_cards(hand).get(0)
    }

    fn choose_trump(&mut self, _hand: CardSet) -> Color {
        self.log.lock().expect("log").trump_requests += 1;
        Color::Heart
    }

    fn delegates_trump_choice(&mut self, _hand: CardSet) -> bool {
        self.delegate
    }

    fn on_game_start(&mut self, own_id: PlayerId, player_names: &[String; 4]) {
        let mut log = self.log.lock().expect("log");
        log.own_id = Some(own_id);
        log.names = player_names.to_vec();
    }

    fn on_hand_updated(&mut self, hand: CardSet) {
        self.log.lock().expect("log").hands.push(hand);
    }

    fn on_trump_set(&mut self, trump: Color) {
        self.log.lock().expect("log").trumps.push(trump);
    }

    fn on_trick_updated(&mut self, _trick: Trick) {
        self.log.lock().expect("log").tricks += 1;
    }

    fn on_score_updated(&mut self, score: Score) {
        self.log.lock().expect("log").scores.push(score);
    }

    fn on_game_won(&mut self, winning_team: TeamId) {
        self.log.lock().expect("log").winner = Some(winning_team);
    }

    fn on_meld_winner_determined(&mut self, winner: PlayerId, melds: &MeldSet) {
        self.log
            .lock()
            .expect("log")
            .meld_winners
            .push((winner, melds.points()));
    }
}

fn recording_table(delegate: bool) -> ([Box<dyn Player>; 4], [Arc<Mutex<Log>>; 4]) {
    let logs: [Arc<Mutex<Log>>; 4] = std::array::from_fn(|_| Arc::default());
    let players = std::array::from_fn(|i| {
        Box::new(RecordingPlayer {
            log: Arc::clone(&logs[i]),
            delegate,
        }) as Box<dyn Player>
    });
    (players, logs)
}

fn names() -> [String; 4] {
    ["Aline", "Bastien", "Colette", "David"].map(String::from)
}

fn play_out(game: &mut JassGame) -> usize {
    let mut tricks = 0;
    while !game.is_game_over() {
        game.advance_to_end_of_next_trick().expect("legal play");
        tricks += 1;
        assert!(tricks < 500, "game did not end");
    }
    tricks
}

#[test]
fn seeded_deal_is_reproducible() {
    let hands = Deck::shuffled_with_seed(99).deal();
    assert_eq!(hands, Deck::shuffled_with_seed(99).deal());
    assert_eq!(
        holder_of(&hands, FIRST_LEAD_CARD),
        holder_of(&Deck::shuffled_with_seed(99).deal(), FIRST_LEAD_CARD)
    );
}

#[test]
fn first_trick_is_led_by_the_seven_of_diamonds_holder() {
    let (players, logs) = recording_table(false);
    let mut game = JassGame::new(1234, players, names());
    game.advance_to_end_of_next_trick().expect("legal play");

    let leader = game.state().expect("started").trick().first_player();
    let dealt = logs[leader.index()].lock().expect("log").hands[0];
    assert!(dealt.contains(FIRST_LEAD_CARD));
}

#[test]
fn same_seed_replays_the_same_game() {
    let run = |seed| {
        let players: [Box<dyn Player>; 4] =
            std::array::from_fn(|_| Box::new(FirstLegalPlayer) as Box<dyn Player>);
        let mut game = JassGame::new(seed, players, names());
        let tricks = play_out(&mut game);
        (tricks, game.score(), game.winning_team())
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn players_receive_every_notification() {
    let (players, logs) = recording_table(false);
    let mut game = JassGame::new(21, players, names());
    play_out(&mut game);

    let winner = game.winning_team().expect("winner");
    let turns = game.turn_number() as usize;
    for (i, log) in logs.iter().enumerate() {
        let log = log.lock().expect("log");
        assert_eq!(log.own_id, PlayerId::from_index(i));
        assert_eq!(log.names, names().to_vec());
        assert_eq!(log.trumps.len(), turns);
        assert!(log.trumps.iter().all(|&t| t == Color::Heart));
        assert_eq!(log.hands[0].len(), 9);
        assert_eq!(log.winner, Some(winner));
        assert!(log.tricks > 0);
        assert_eq!(log.meld_winners.len(), turns);
        let last = log.scores.last().expect("final score");
        assert_eq!(last.turn_points(TeamId::Team1), 0);
        assert!(last.game_points(winner) >= 1000);
    }
}

#[test]
fn delegated_trump_is_chosen_by_the_team_mate() {
    let (players, logs) = recording_table(true);
    let mut game = JassGame::new(8, players, names());
    game.advance_to_end_of_next_trick().expect("legal play");

    let leader = game.state().expect("started").trick().first_player();
    let mate = leader.team_mate();
    assert_eq!(logs[leader.index()].lock().expect("log").trump_requests, 0);
    assert_eq!(logs[mate.index()].lock().expect("log").trump_requests, 1);
}
