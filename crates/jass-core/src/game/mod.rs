pub mod jass_game;
pub mod player;
pub mod summary;

pub use jass_game::{GameError, JassGame};
pub use player::{FirstLegalPlayer, Player};
pub use summary::GameSummary;
