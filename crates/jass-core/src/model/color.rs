use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Spade = 0,
    Heart = 1,
    Diamond = 2,
    Club = 3,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Spade, Color::Heart, Color::Diamond, Color::Club];
    pub const COUNT: usize = 4;

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Color::Spade),
            1 => Some(Color::Heart),
            2 => Some(Color::Diamond),
            3 => Some(Color::Club),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Color::Spade => "\u{2660}",
            Color::Heart => "\u{2661}",
            Color::Diamond => "\u{2662}",
            Color::Club => "\u{2663}",
        };
        f.write_str(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn index_roundtrip() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(Color::from_index(i), Some(*color));
            assert_eq!(color.index(), i);
        }
        assert_eq!(Color::from_index(4), None);
    }

    #[test]
    fn display_uses_suit_symbols() {
        assert_eq!(Color::Spade.to_string(), "\u{2660}");
        assert_eq!(Color::Club.to_string(), "\u{2663}");
    }
}
