use crate::bits::bits64;
use crate::model::player::TeamId;
use crate::model::{
    MATCH_BONUS, MAX_POINTS_PER_GAME, MAX_POINTS_PER_TURN, MAX_POINTS_PER_TURN_WITHOUT_MATCH,
    TRICKS_PER_TURN,
};
use core::fmt;

const TEAM_STRIDE: u32 = 32;
const TRICKS_START: u32 = 0;
const TRICKS_BITS: u32 = 4;
const TURN_POINTS_START: u32 = 4;
const TURN_POINTS_BITS: u32 = 9;
const GAME_POINTS_START: u32 = 13;
const GAME_POINTS_BITS: u32 = 11;
const TEAM_BITS: u32 = TRICKS_BITS + TURN_POINTS_BITS + GAME_POINTS_BITS;

/// Both teams' counters packed in 64 bits, 32 bits per team: tricks won
/// this turn, points won this turn and points carried from previous turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score(u64);

impl Score {
    pub const INITIAL: Score = Score(0);

    pub fn from_packed(packed: u64) -> Option<Self> {
        Self::is_valid_packed(packed).then_some(Self(packed))
    }

    pub fn is_valid_packed(packed: u64) -> bool {
        TeamId::ALL.iter().all(|&team| {
            let half = bits64::extract(packed, TEAM_STRIDE * team as u32, TEAM_STRIDE);
            let tricks = bits64::extract(half, TRICKS_START, TRICKS_BITS);
            let turn = bits64::extract(half, TURN_POINTS_START, TURN_POINTS_BITS);
            let game = bits64::extract(half, GAME_POINTS_START, GAME_POINTS_BITS);
            tricks <= TRICKS_PER_TURN as u64
                && turn <= MAX_POINTS_PER_TURN as u64
                && game <= MAX_POINTS_PER_GAME as u64
                && half >> TEAM_BITS == 0
        })
    }

    pub const fn packed(self) -> u64 {
        self.0
    }

    fn of(halves: [(u32, u32, u32); 2]) -> Self {
        let [(t1, p1, g1), (t2, p2, g2)] = halves;
        Self(bits64::pack(&[
            (t1 as u64, TRICKS_BITS),
            (p1 as u64, TURN_POINTS_BITS),
            (g1 as u64, GAME_POINTS_BITS),
            (0, TEAM_STRIDE - TEAM_BITS),
            (t2 as u64, TRICKS_BITS),
            (p2 as u64, TURN_POINTS_BITS),
            (g2 as u64, GAME_POINTS_BITS),
        ]))
    }

    fn field(self, team: TeamId, start: u32, size: u32) -> u32 {
        bits64::extract(self.0, TEAM_STRIDE * team as u32 + start, size) as u32
    }

    fn halves(self) -> [(u32, u32, u32); 2] {
        TeamId::ALL.map(|team| {
            (
                self.turn_tricks(team),
                self.turn_points(team),
                self.game_points(team),
            )
        })
    }

    pub fn turn_tricks(self, team: TeamId) -> u32 {
        self.field(team, TRICKS_START, TRICKS_BITS)
    }

    pub fn turn_points(self, team: TeamId) -> u32 {
        self.field(team, TURN_POINTS_START, TURN_POINTS_BITS)
    }

    pub fn game_points(self, team: TeamId) -> u32 {
        self.field(team, GAME_POINTS_START, GAME_POINTS_BITS)
    }

    pub fn total_points(self, team: TeamId) -> u32 {
        self.game_points(team) + self.turn_points(team)
    }

    /// Credits a trick worth `trick_points` to `winning_team`; the ninth
    /// trick of a sweep also earns the match bonus.
    #[must_use]
    pub fn with_additional_trick(self, winning_team: TeamId, trick_points: u32) -> Self {
        assert!(
            trick_points <= MAX_POINTS_PER_TURN_WITHOUT_MATCH,
            "a trick cannot be worth {trick_points} points"
        );
        let mut halves = self.halves();
        let (tricks, turn, _) = &mut halves[winning_team.index()];
        assert!(
            (*tricks as usize) < TRICKS_PER_TURN,
            "{winning_team} already won every trick of the turn"
        );
        *tricks += 1;
        *turn += trick_points;
        if *tricks as usize == TRICKS_PER_TURN {
            *turn += MATCH_BONUS;
        }
        assert!(*turn <= MAX_POINTS_PER_TURN, "turn points overflow");
        Self::of(halves)
    }

    /// Adds meld points straight to the game points of `winning_team`.
    #[must_use]
    pub fn with_meld_points(self, winning_team: TeamId, meld_points: u32) -> Self {
        let mut halves = self.halves();
        let (_, _, game) = &mut halves[winning_team.index()];
        *game += meld_points;
        assert!(*game <= MAX_POINTS_PER_GAME, "game points overflow");
        Self::of(halves)
    }

    /// Folds turn points into game points and clears the turn counters.
    #[must_use]
    pub fn next_turn(self) -> Self {
        Self::of(self.halves().map(|(_, turn, game)| (0, 0, (game + turn).min(MAX_POINTS_PER_GAME))))
    }

    /// The team with the higher total, if any.
    pub fn leading_team(self) -> Option<TeamId> {
        let first = self.total_points(TeamId::Team1);
        let second = self.total_points(TeamId::Team2);
        match first.cmp(&second) {
            core::cmp::Ordering::Greater => Some(TeamId::Team1),
            core::cmp::Ordering::Less => Some(TeamId::Team2),
            core::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [(t1, p1, g1), (t2, p2, g2)] = self.halves();
        write!(f, "({t1},{p1},{g1})/({t2},{p2},{g2})")
    }
}

#[cfg(test)]
mod tests {
    use super::Score;
    use crate::model::player::TeamId;

    #[test]
    fn initial_score_is_zero() {
        for team in TeamId::ALL {
            assert_eq!(Score::INITIAL.turn_tricks(team), 0);
            assert_eq!(Score::INITIAL.total_points(team), 0);
        }
        assert_eq!(Score::INITIAL.packed(), 0);
    }

    #[test]
    fn packed_layout_matches_fields() {
        let score = Score::INITIAL
            .with_additional_trick(TeamId::Team2, 35)
            .with_meld_points(TeamId::Team1, 20);
        assert_eq!(score.packed(), (1 | 35 << 4) << 32 | 20 << 13);
        assert_eq!(Score::from_packed(score.packed()), Some(score));
    }

    #[test]
    fn from_packed_rejects_out_of_range_fields() {
        assert!(Score::from_packed(10).is_none());
        assert!(Score::from_packed(258 << 4).is_none());
        assert!(Score::from_packed(2001 << 13).is_none());
        assert!(Score::from_packed(1 << 24).is_none());
        assert!(Score::from_packed(1 << 56).is_none());
    }

    #[test]
    fn ninth_trick_earns_match_bonus() {
        let mut score = Score::INITIAL;
        for _ in 0..8 {
            score = score.with_additional_trick(TeamId::Team1, 10);
        }
        assert_eq!(score.turn_points(TeamId::Team1), 80);
        score = score.with_additional_trick(TeamId::Team1, 77);
        assert_eq!(score.turn_tricks(TeamId::Team1), 9);
        assert_eq!(score.turn_points(TeamId::Team1), 257);
    }

    #[test]
    fn next_turn_preserves_totals() {
        let score = Score::INITIAL
            .with_additional_trick(TeamId::Team1, 40)
            .with_additional_trick(TeamId::Team2, 17)
            .with_meld_points(TeamId::Team2, 50);
        let folded = score.next_turn();
        for team in TeamId::ALL {
            assert_eq!(folded.total_points(team), score.total_points(team));
            assert_eq!(folded.turn_tricks(team), 0);
            assert_eq!(folded.turn_points(team), 0);
        }
        assert_eq!(folded.game_points(TeamId::Team2), 67);
    }

    #[test]
    fn leading_team_compares_totals() {
        assert_eq!(Score::INITIAL.leading_team(), None);
        let score = Score::INITIAL.with_additional_trick(TeamId::Team2, 3);
        assert_eq!(score.leading_team(), Some(TeamId::Team2));
    }

    #[test]
    fn display_lists_both_teams() {
        let score = Score::INITIAL.with_additional_trick(TeamId::Team1, 12);
        assert_eq!(score.to_string(), "(1,12,0)/(0,0,0)");
    }
}
