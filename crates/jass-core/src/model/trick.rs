use crate::bits::bits32;
use crate::model::card::{Card, INVALID_PACKED_CARD};
use crate::model::card_set::CardSet;
use crate::model::color::Color;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use crate::model::{CARDS_PER_TRICK, LAST_TRICK_BONUS, LAST_TRICK_INDEX, TRICKS_PER_TURN};
use core::fmt;

const CARD_BITS: u32 = 6;
const INDEX_START: u32 = 24;
const INDEX_BITS: u32 = 4;
const PLAYER_START: u32 = 28;
const PLAYER_BITS: u32 = 2;
const TRUMP_START: u32 = 30;
const TRUMP_BITS: u32 = 2;

/// One trick of a turn, packed in 32 bits.
///
/// Card `i` sits in bits `6i..6i+6` (the invalid card pattern when absent),
/// followed by the trick index, the first player and the trump color.
/// [`Trick::INVALID`] is the value that follows the last trick of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trick(u32);

impl Trick {
    pub const INVALID: Trick = Trick(u32::MAX);

    pub fn first_empty(trump: Color, first_player: PlayerId) -> Self {
        Self::empty(0, trump, first_player)
    }

    fn empty(index: u32, trump: Color, first_player: PlayerId) -> Self {
        Self(bits32::pack(&[
            (INVALID_PACKED_CARD, CARD_BITS),
            (INVALID_PACKED_CARD, CARD_BITS),
            (INVALID_PACKED_CARD, CARD_BITS),
            (INVALID_PACKED_CARD, CARD_BITS),
            (index, INDEX_BITS),
            (first_player as u32, PLAYER_BITS),
            (trump as u32, TRUMP_BITS),
        ]))
    }

    /// Accepts any well-formed trick as well as [`Trick::INVALID`].
    pub fn from_packed(packed: u32) -> Option<Self> {
        (packed == Self::INVALID.0 || Self::is_valid_packed(packed)).then_some(Self(packed))
    }

    pub fn is_valid_packed(packed: u32) -> bool {
        if bits32::extract(packed, INDEX_START, INDEX_BITS) >= TRICKS_PER_TURN as u32 {
            return false;
        }
        let mut seen_gap = false;
        let mut cards = CardSet::EMPTY;
        for i in 0..CARDS_PER_TRICK as u32 {
            let raw = bits32::extract(packed, i * CARD_BITS, CARD_BITS);
            if raw == INVALID_PACKED_CARD {
                seen_gap = true;
                continue;
            }
            match Card::from_packed(raw) {
                Some(card) if !seen_gap && !cards.contains(card) => cards = cards.add(card),
                _ => return false,
            }
        }
        true
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    /// The empty trick following this full one, led by its winner, or
    /// [`Trick::INVALID`] after the last trick of the turn.
    pub fn next_empty(self) -> Self {
        assert!(self.is_full(), "only a full trick can be followed");
        if self.is_last() {
            Self::INVALID
        } else {
            Self::empty(self.index() + 1, self.trump(), self.winning_player())
        }
    }

    pub fn is_empty(self) -> bool {
        self.size() == 0
    }

    pub fn is_full(self) -> bool {
        self.size() == CARDS_PER_TRICK
    }

    pub fn is_last(self) -> bool {
        self.index() == LAST_TRICK_INDEX
    }

    pub fn size(self) -> usize {
        (0..CARDS_PER_TRICK as u32)
            .take_while(|&i| bits32::extract(self.0, i * CARD_BITS, CARD_BITS) != INVALID_PACKED_CARD)
            .count()
    }

    pub fn index(self) -> u32 {
        bits32::extract(self.0, INDEX_START, INDEX_BITS)
    }

    pub fn trump(self) -> Color {
        Color::ALL[bits32::extract(self.0, TRUMP_START, TRUMP_BITS) as usize]
    }

    pub fn first_player(self) -> PlayerId {
        PlayerId::LOOP[bits32::extract(self.0, PLAYER_START, PLAYER_BITS) as usize]
    }

    /// Seat playing the `index`-th card of this trick.
    pub fn player(self, index: usize) -> PlayerId {
        assert!(index < CARDS_PER_TRICK, "player index {index} out of range");
        self.first_player().advanced_by(index)
    }

    /// Seat expected to play next.
    pub fn next_player(self) -> PlayerId {
        assert!(!self.is_full(), "a full trick has no next player");
        self.player(self.size())
    }

    pub fn card(self, index: usize) -> Card {
        assert!(index < self.size(), "no card at position {index}");
        let raw = bits32::extract(self.0, index as u32 * CARD_BITS, CARD_BITS);
        Card::from_packed(raw).unwrap_or_else(|| panic!("corrupt card {raw:#x} in trick"))
    }

    pub fn cards(self) -> impl Iterator<Item = Card> {
        (0..self.size()).map(move |i| self.card(i))
    }

    #[must_use]
    pub fn with_added_card(self, card: Card) -> Self {
        assert!(!self.is_full(), "cannot add {card} to a full trick");
        let start = self.size() as u32 * CARD_BITS;
        Self((self.0 & !bits32::mask(start, CARD_BITS)) | (card.packed() << start))
    }

    pub fn base_color(self) -> Color {
        self.card(0).color
    }

    /// Cards of `hand` that may be played on this trick.
    ///
    /// # Panics
    /// When the trick is full or the hand is empty.
    pub fn legal_cards(self, hand: CardSet) -> CardSet {
        assert!(!self.is_full(), "no card can be played on a full trick");
        assert!(!hand.is_empty(), "an empty hand has no legal card");
        if self.is_empty() {
            return hand;
        }

        let trump = self.trump();
        let base = self.base_color();
        let own_base = hand.subset_of_color(base);
        if own_base.is_empty() {
            hand.difference(hand.subset_of_color(trump))
                .union(self.possible_cuts(hand))
        } else if base == trump && own_base == CardSet::singleton(Card::new(trump, Rank::Jack)) {
            hand
        } else {
            own_base.union(self.possible_cuts(hand))
        }
    }

    /// Trump cards of `hand` allowed against the current best card.
    fn possible_cuts(self, hand: CardSet) -> CardSet {
        let trump = self.trump();
        let trumps = hand.subset_of_color(trump);
        let best = self.card(self.best_card_index());
        if best.color != trump {
            return trumps;
        }
        let higher = trumps.intersection(CardSet::trump_above(best));
        if higher.is_empty() && trumps == hand {
            trumps
        } else {
            higher
        }
    }

    pub fn points(self) -> u32 {
        let trump = self.trump();
        let cards: u32 = self.cards().map(|card| card.points(trump)).sum();
        if self.is_last() {
            cards + LAST_TRICK_BONUS
        } else {
            cards
        }
    }

    pub fn winning_player(self) -> PlayerId {
        assert!(!self.is_empty(), "an empty trick has no winner");
        self.player(self.best_card_index())
    }

    fn best_card_index(self) -> usize {
        let trump = self.trump();
        let mut best = 0;
        for i in 1..self.size() {
            if self.card(i).is_better(trump, self.card(best)) {
                best = i;
            }
        }
        best
    }
}

impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            return f.write_str("trick -");
        }
        write!(f, "trick {} ({} leads, trump {}):", self.index(), self.first_player(), self.trump())?;
        for (i, card) in self.cards().enumerate() {
            let sep = if i == 0 { " " } else { "," };
            write!(f, "{sep}{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Trick;
    use crate::model::card::Card;
    use crate::model::card_set::CardSet;
    use crate::model::color::Color;
    use crate::model::player::PlayerId;
    use crate::model::rank::Rank;

    fn c(color: Color, rank: Rank) -> Card {
        Card::new(color, rank)
    }

    fn trick_with(trump: Color, first: PlayerId, cards: &[Card]) -> Trick {
        cards
            .iter()
            .fold(Trick::first_empty(trump, first), |t, &card| t.with_added_card(card))
    }

    fn hand(cards: &[Card]) -> CardSet {
        cards.iter().copied().collect()
    }

    #[test]
    fn first_empty_has_no_cards() {
        let trick = Trick::first_empty(Color::Diamond, PlayerId::Player3);
        assert!(trick.is_empty());
        assert_eq!(trick.index(), 0);
        assert_eq!(trick.trump(), Color::Diamond);
        assert_eq!(trick.first_player(), PlayerId::Player3);
        assert_eq!(trick.next_player(), PlayerId::Player3);
        assert_eq!(trick.packed() & 0x00FF_FFFF, 0x00FF_FFFF);
        assert_eq!(trick.packed() >> 24, 0b1010_0000);
    }

    #[test]
    fn from_packed_rejects_gaps_and_duplicates() {
        let trick = trick_with(
            Color::Spade,
            PlayerId::Player1,
            &[c(Color::Heart, Rank::Ace), c(Color::Heart, Rank::Six)],
        );
        assert_eq!(Trick::from_packed(trick.packed()), Some(trick));
        assert_eq!(Trick::from_packed(u32::MAX), Some(Trick::INVALID));

        let gap = (trick.packed() & !0x3F) | 0x3F;
        assert!(Trick::from_packed(gap).is_none());
        let duplicate = (trick.packed() & !(0x3F << 6)) | (trick.packed() & 0x3F) << 6;
        assert!(Trick::from_packed(duplicate).is_none());
    }

    #[test]
    fn trump_wins_even_when_not_lowest() {
        let trick = trick_with(
            Color::Club,
            PlayerId::Player2,
            &[
                c(Color::Heart, Rank::Ten),
                c(Color::Heart, Rank::Ace),
                c(Color::Club, Rank::Queen),
                c(Color::Heart, Rank::Six),
            ],
        );
        assert_eq!(trick.winning_player(), PlayerId::Player4);
        assert_eq!(trick.points(), 10 + 11 + 3);
    }

    #[test]
    fn off_color_discard_never_wins() {
        let trick = trick_with(
            Color::Club,
            PlayerId::Player1,
            &[c(Color::Heart, Rank::Seven), c(Color::Spade, Rank::Ace)],
        );
        assert_eq!(trick.winning_player(), PlayerId::Player1);
    }

    #[test]
    fn last_trick_adds_bonus_and_ends_turn() {
        let mut trick = Trick::first_empty(Color::Spade, PlayerId::Player1);
        for _ in 0..8 {
            for card in [
                c(Color::Heart, Rank::Six),
                c(Color::Heart, Rank::Seven),
                c(Color::Heart, Rank::Eight),
                c(Color::Heart, Rank::Nine),
            ] {
                trick = trick.with_added_card(card);
            }
            trick = trick.next_empty();
        }
        assert!(trick.is_last());
        for card in [
            c(Color::Heart, Rank::Six),
            c(Color::Heart, Rank::Seven),
            c(Color::Heart, Rank::Eight),
            c(Color::Heart, Rank::Ace),
        ] {
            trick = trick.with_added_card(card);
        }
        assert_eq!(trick.points(), 11 + 5);
        assert_eq!(trick.next_empty(), Trick::INVALID);
    }

    #[test]
    fn next_empty_is_led_by_winner() {
        let trick = trick_with(
            Color::Diamond,
            PlayerId::Player1,
            &[
                c(Color::Spade, Rank::Six),
                c(Color::Spade, Rank::King),
                c(Color::Spade, Rank::Seven),
                c(Color::Heart, Rank::Ace),
            ],
        );
        let next = trick.next_empty();
        assert_eq!(next.index(), 1);
        assert_eq!(next.first_player(), PlayerId::Player2);
        assert_eq!(next.trump(), Color::Diamond);
        assert!(next.is_empty());
    }

    #[test]
    #[should_panic]
    fn adding_to_full_trick_panics() {
        let trick = trick_with(
            Color::Diamond,
            PlayerId::Player1,
            &[
                c(Color::Spade, Rank::Six),
                c(Color::Spade, Rank::King),
                c(Color::Spade, Rank::Seven),
                c(Color::Heart, Rank::Ace),
            ],
        );
        let _ = trick.with_added_card(c(Color::Club, Rank::Six));
    }

    #[test]
    fn empty_trick_allows_whole_hand() {
        let cards = hand(&[c(Color::Spade, Rank::Six), c(Color::Club, Rank::Jack)]);
        let trick = Trick::first_empty(Color::Heart, PlayerId::Player1);
        assert_eq!(trick.legal_cards(cards), cards);
    }

    #[test]
    fn must_follow_base_color_but_may_cut() {
        let trick = trick_with(Color::Heart, PlayerId::Player1, &[c(Color::Spade, Rank::Ten)]);
        let cards = hand(&[
            c(Color::Spade, Rank::Six),
            c(Color::Heart, Rank::Seven),
            c(Color::Club, Rank::Ace),
        ]);
        assert_eq!(
            trick.legal_cards(cards),
            hand(&[c(Color::Spade, Rank::Six), c(Color::Heart, Rank::Seven)])
        );
    }

    #[test]
    fn void_in_base_color_allows_every_trump_against_plain_winner() {
        let trick = trick_with(Color::Heart, PlayerId::Player1, &[c(Color::Spade, Rank::Ten)]);
        let cards = hand(&[
            c(Color::Heart, Rank::Six),
            c(Color::Heart, Rank::Jack),
            c(Color::Club, Rank::Ace),
        ]);
        assert_eq!(trick.legal_cards(cards), cards);
    }

    #[test]
    fn under_trumping_is_forbidden_when_other_colors_held() {
        let trick = trick_with(
            Color::Heart,
            PlayerId::Player1,
            &[c(Color::Spade, Rank::Ten), c(Color::Heart, Rank::Nine)],
        );
        let cards = hand(&[
            c(Color::Heart, Rank::Six),
            c(Color::Heart, Rank::Jack),
            c(Color::Club, Rank::Ace),
        ]);
        assert_eq!(
            trick.legal_cards(cards),
            hand(&[c(Color::Heart, Rank::Jack), c(Color::Club, Rank::Ace)])
        );
    }

    #[test]
    fn only_lower_trumps_must_be_played_when_nothing_else_held() {
        let trick = trick_with(
            Color::Heart,
            PlayerId::Player1,
            &[c(Color::Spade, Rank::Ten), c(Color::Heart, Rank::Nine)],
        );
        let cards = hand(&[c(Color::Heart, Rank::Six), c(Color::Heart, Rank::Ace)]);
        assert_eq!(trick.legal_cards(cards), cards);
    }

    #[test]
    fn lone_trump_jack_need_not_follow() {
        let trick = trick_with(Color::Club, PlayerId::Player1, &[c(Color::Club, Rank::Six)]);
        let cards = hand(&[
            c(Color::Club, Rank::Jack),
            c(Color::Spade, Rank::Ace),
            c(Color::Diamond, Rank::Seven),
        ]);
        assert_eq!(trick.legal_cards(cards), cards);
    }

    #[test]
    fn display_lists_played_cards() {
        let trick = trick_with(
            Color::Club,
            PlayerId::Player2,
            &[c(Color::Club, Rank::Six), c(Color::Heart, Rank::King)],
        );
        assert_eq!(
            trick.to_string(),
            "trick 0 (player 2 leads, trump \u{2663}): \u{2663}6,\u{2661}K"
        );
    }
}
