mod mcts;
mod params;
mod tree;
mod trump;

pub use mcts::MctsPlayer;
pub use params::MctsParams;
pub use trump::strongest_trump;
