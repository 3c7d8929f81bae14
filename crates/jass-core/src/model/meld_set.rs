use crate::model::card_set::CardSet;
use crate::model::meld::{Meld, MeldError};
use crate::model::rank::Rank;
use core::fmt;

/// Card-disjoint melds announced together from one hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MeldSet {
    melds: Vec<Meld>,
}

impl MeldSet {
    pub const EMPTY: MeldSet = MeldSet { melds: Vec::new() };

    pub fn new(melds: impl IntoIterator<Item = Meld>) -> Result<Self, MeldError> {
        let mut cards = CardSet::EMPTY;
        let mut collected = Vec::new();
        for meld in melds {
            let shared = cards.intersection(meld.cards());
            if !shared.is_empty() {
                return Err(MeldError::Overlapping(shared));
            }
            cards = cards.union(meld.cards());
            collected.push(meld);
        }
        collected.sort_by_key(|meld| {
            (
                meld.points(),
                meld.cards().len(),
                meld.highest_rank(),
                meld.cards().packed(),
            )
        });
        Ok(Self { melds: collected })
    }

    /// Every set of pairwise disjoint melds found in `hand`, the empty set
    /// first. The order is stable for a given hand, so an index into the
    /// list identifies a choice.
    pub fn all_in(hand: CardSet) -> Vec<MeldSet> {
        let candidates = Meld::all_in(hand);
        let mut sets = Vec::new();
        let mut chosen = Vec::new();
        collect_disjoint(&candidates, 0, CardSet::EMPTY, &mut chosen, &mut sets);
        sets
    }

    /// The highest ranked set in `hand`; the earlier set wins ties.
    pub fn best_in(hand: CardSet) -> MeldSet {
        let mut best = MeldSet::EMPTY;
        for candidate in Self::all_in(hand) {
            if candidate.beats(&best) {
                best = candidate;
            }
        }
        best
    }

    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    pub fn is_empty(&self) -> bool {
        self.melds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.melds.len()
    }

    pub fn points(&self) -> u32 {
        self.melds.iter().map(|meld| meld.points()).sum()
    }

    pub fn cards(&self) -> CardSet {
        self.melds
            .iter()
            .fold(CardSet::EMPTY, |acc, meld| acc.union(meld.cards()))
    }

    pub fn highest_rank(&self) -> Option<Rank> {
        self.melds.iter().map(|meld| meld.highest_rank()).max()
    }

    /// Strictly better than `incumbent`: more points, then more cards, then
    /// a higher top card. A full tie keeps the incumbent.
    pub fn beats(&self, incumbent: &MeldSet) -> bool {
        let key = |set: &MeldSet| (set.points(), set.cards().len(), set.highest_rank());
        key(self) > key(incumbent)
    }
}

fn collect_disjoint(
    candidates: &[Meld],
    next: usize,
    used: CardSet,
    chosen: &mut Vec<Meld>,
    sets: &mut Vec<MeldSet>,
) {
    let Some(&meld) = candidates.get(next) else {
        if let Ok(set) = MeldSet::new(chosen.iter().copied()) {
            sets.push(set);
        }
        return;
    };
    collect_disjoint(candidates, next + 1, used, chosen, sets);
    if used.intersection(meld.cards()).is_empty() {
        chosen.push(meld);
        collect_disjoint(candidates, next + 1, used.union(meld.cards()), chosen, sets);
        chosen.pop();
    }
}

impl fmt::Display for MeldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, meld) in self.melds.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{meld}")?;
        }
        f.write_str("]")
    }
}
