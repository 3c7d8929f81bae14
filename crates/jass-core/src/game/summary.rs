use super::jass_game::JassGame;
use crate::model::player::TeamId;
use serde::{Deserialize, Serialize};

/// Outcome of a game, written by the command-line runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSummary {
    pub seed: u64,
    pub player_names: [String; 4],
    pub turns: u32,
    pub winning_team: Option<TeamId>,
    pub team_points: [u32; 2],
}

impl GameSummary {
    pub fn capture(game: &JassGame) -> Self {
        let score = game.score();
        GameSummary {
            seed: game.seed(),
            player_names: game.names().clone(),
            turns: game.turn_number(),
            winning_team: game.winning_team(),
            team_points: TeamId::ALL.map(|team| score.total_points(team)),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::GameSummary;
    use crate::game::jass_game::JassGame;
    use crate::game::player::{FirstLegalPlayer, Player};
    use crate::model::player::TeamId;

    #[test]
    fn summary_survives_json() {
        let players: [Box<dyn Player>; 4] =
            std::array::from_fn(|_| Box::new(FirstLegalPlayer) as Box<dyn Player>);
        let names = ["Aline", "Bastien", "Colette", "David"].map(String::from);
        let mut game = JassGame::new(9, players, names);
        while !game.is_game_over() {
            game.advance_to_end_of_next_trick().expect("legal play");
        }

        let summary = GameSummary::capture(&game);
        assert_eq!(summary.seed, 9);
        assert!(summary.winning_team.is_some());
        let winner = summary.winning_team.unwrap_or(TeamId::Team1);
        assert!(summary.team_points[winner.index()] >= 1000);

        let json = summary.to_json().expect("serialize");
        assert!(json.contains("\"Colette\""));
        assert_eq!(GameSummary::from_json(&json).expect("deserialize"), summary);
    }
}
