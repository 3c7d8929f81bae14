use jass_core::model::card_set::CardSet;
use jass_core::model::color::Color;

/// Color whose cards in `hand` have the highest summed trump ordinals.
/// Ties keep the earlier color.
pub fn strongest_trump(hand: CardSet) -> Color {
    let strength = |color: Color| -> u32 {
        hand.subset_of_color(color)
            .iter()
            .map(|card| u32::from(card.rank.trump_ordinal()))
            .sum()
    };

    let mut best = Color::Spade;
    let mut best_strength = strength(best);
    for color in Color::ALL.into_iter().skip(1) {
        let candidate = strength(color);
        if candidate > best_strength {
            best = color;
            best_strength = candidate;
        }
    }
    best
}
