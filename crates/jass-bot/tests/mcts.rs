use jass_bot::{MctsParams, MctsPlayer};
use jass_core::game::{FirstLegalPlayer, JassGame, Player};
use jass_core::model::card_set::CardSet;
use jass_core::model::color::Color;
use jass_core::model::deck::Deck;
use jass_core::model::player::{PlayerId, TeamId};
use jass_core::model::score::Score;
use jass_core::model::turn_state::TurnState;

fn opening() -> (TurnState, [CardSet; 4]) {
    let hands = Deck::shuffled_with_seed(2019).deal();
    let state = TurnState::initial(Color::Diamond, Score::INITIAL, PlayerId::Player1);
    (state, hands)
}

#[test]
fn same_seed_same_card() {
    let (state, hands) = opening();
    let choose = || {
        let mut player = MctsPlayer::new(PlayerId::Player1, 42, MctsParams::new(500));
        player.card_to_play(&state, hands[0])
    };
    assert_eq!(choose(), choose());
}

#[test]
fn chosen_cards_are_always_legal() {
    let (mut state, mut hands) = opening();
    let mut players: Vec<MctsPlayer> = PlayerId::LOOP
        .iter()
        .map(|&id| MctsPlayer::new(id, 7 + id.index() as u64, MctsParams::new(60)))
        .collect();
    while !state.is_terminal() {
        let id = state.next_player();
        let hand = hands[id.index()];
        let card = players[id.index()].card_to_play(&state, hand);
        assert!(
            state.trick().legal_cards(hand).contains(card),
            "{id} chose illegal {card}"
        );
        hands[id.index()] = hand.remove(card);
        state = state.with_card_played_and_trick_collected(card);
    }
    let score = state.score();
    let total: u32 = TeamId::ALL.iter().map(|&t| score.turn_points(t)).sum();
    assert!(total == 157 || total == 257);
}

#[test]
fn full_game_with_search_players_finishes() {
    let players: [Box<dyn Player>; 4] = std::array::from_fn(|i| {
        let id = PlayerId::LOOP[i];
        if id.team() == TeamId::Team1 {
            Box::new(MctsPlayer::new(id, i as u64, MctsParams::new(40))) as Box<dyn Player>
        } else {
            Box::new(FirstLegalPlayer) as Box<dyn Player>
        }
    });
    let names = ["Aline", "Bastien", "Colette", "David"].map(String::from);
    let mut game = JassGame::new(31, players, names);
    while !game.is_game_over() {
        game.advance_to_end_of_next_trick().expect("search plays legal cards");
    }
    let winner = game.winning_team().expect("winner");
    assert!(game.score().total_points(winner) >= 1000);
}
