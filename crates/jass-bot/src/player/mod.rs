mod paced;

pub use paced::PacedPlayer;
