use core::fmt;
use serde::{Deserialize, Serialize};

/// Seats in playing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerId {
    Player1 = 0,
    Player2 = 1,
    Player3 = 2,
    Player4 = 3,
}

impl PlayerId {
    pub const LOOP: [PlayerId; 4] = [
        PlayerId::Player1,
        PlayerId::Player2,
        PlayerId::Player3,
        PlayerId::Player4,
    ];
    pub const COUNT: usize = 4;

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::Player1),
            1 => Some(PlayerId::Player2),
            2 => Some(PlayerId::Player3),
            3 => Some(PlayerId::Player4),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player3,
            PlayerId::Player3 => PlayerId::Player4,
            PlayerId::Player4 => PlayerId::Player1,
        }
    }

    /// The seat `offset` places after this one.
    pub const fn advanced_by(self, offset: usize) -> PlayerId {
        PlayerId::LOOP[(self.index() + offset) % PlayerId::COUNT]
    }

    pub const fn team_mate(self) -> PlayerId {
        self.advanced_by(2)
    }

    pub const fn team(self) -> TeamId {
        match self {
            PlayerId::Player1 | PlayerId::Player3 => TeamId::Team1,
            PlayerId::Player2 | PlayerId::Player4 => TeamId::Team2,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TeamId {
    Team1 = 0,
    Team2 = 1,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::Team1, TeamId::Team2];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TeamId::Team1),
            1 => Some(TeamId::Team2),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> TeamId {
        match self {
            TeamId::Team1 => TeamId::Team2,
            TeamId::Team2 => TeamId::Team1,
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", self.index() + 1)
    }
}
