pub mod card;
pub mod card_set;
pub mod color;
pub mod deck;
pub mod meld;
pub mod meld_set;
pub mod player;
pub mod rank;
pub mod score;
pub mod trick;
pub mod turn_state;

pub const CARDS_PER_TRICK: usize = 4;
pub const HAND_SIZE: usize = 9;
pub const TRICKS_PER_TURN: usize = 9;
pub const LAST_TRICK_INDEX: u32 = 8;
pub const TOTAL_CARDS: usize = 36;

pub const WINNING_POINTS: u32 = 1000;
pub const MATCH_BONUS: u32 = 100;
pub const LAST_TRICK_BONUS: u32 = 5;
/// Points of a full turn including the match bonus.
pub const MAX_POINTS_PER_TURN: u32 = 257;
pub const MAX_POINTS_PER_TURN_WITHOUT_MATCH: u32 = 157;
pub const MAX_POINTS_PER_GAME: u32 = 2000;
