pub mod bot;
pub mod player;

pub use bot::{MctsParams, MctsPlayer, strongest_trump};
pub use player::PacedPlayer;
