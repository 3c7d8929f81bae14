use crate::config::TableConfig;
use crate::seats::SeatSpec;
use anyhow::{Context, Result};
use jass_bot::{MctsParams, MctsPlayer, PacedPlayer};
use jass_core::game::{GameSummary, JassGame, Player};
use jass_core::model::player::{PlayerId, TeamId};
use jass_net::{RemotePlayerClient, RemotePlayerServer};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{Level, event};

/// Seeds derived from one master seed: the game's, then one per seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSeeds {
    pub game: u64,
    pub seats: [u64; 4],
}

impl TableSeeds {
    pub fn draw(master: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(master);
        let game = rng.next_u64();
        let seats = std::array::from_fn(|_| rng.next_u64());
        Self { game, seats }
    }
}

fn search_params(iterations: usize) -> MctsParams {
    MctsParams::new(iterations).with_exploration(MctsParams::from_env().exploration())
}

/// Builds the four players of a local table together with their names.
pub fn build_players(
    seats: &[SeatSpec; 4],
    config: &TableConfig,
    seeds: &TableSeeds,
) -> Result<([Box<dyn Player>; 4], [String; 4])> {
    let mut players: Vec<Box<dyn Player>> = Vec::with_capacity(PlayerId::COUNT);
    let mut names: [String; 4] = Default::default();

    for id in PlayerId::LOOP {
        let seat = &seats[id.index()];
        let seed = seeds.seats[id.index()];
        names[id.index()] = seat
            .name()
            .map_or_else(|| config.names[id.index()].clone(), str::to_string);

        let player: Box<dyn Player> = match seat {
            SeatSpec::Simulated { iterations, .. } => {
                let params = search_params(iterations.unwrap_or(config.iterations));
                Box::new(PacedPlayer::new(
                    MctsPlayer::new(id, seed, params),
                    config.pacing(),
                ))
            }
            SeatSpec::Remote { host, .. } => {
                let host = host.as_deref().unwrap_or(&config.host);
                let fallback = MctsPlayer::new(id, seed, search_params(config.iterations));
                let client = RemotePlayerClient::connect(
                    host,
                    config.port,
                    Box::new(fallback),
                    config.read_timeout(),
                )
                .with_context(|| format!("connecting {id} to {host}:{}", config.port))?;
                Box::new(client)
            }
        };
        players.push(player);
    }

    let players: [Box<dyn Player>; 4] = players
        .try_into()
        .map_err(|_| anyhow::anyhow!("a table needs exactly four players"))?;
    Ok((players, names))
}

/// Plays one complete game, reporting every trick on `out`.
pub fn run_local<W: Write>(
    seats: &[SeatSpec; 4],
    config: &TableConfig,
    master_seed: u64,
    out: &mut W,
) -> Result<GameSummary> {
    let seeds = TableSeeds::draw(master_seed);
    let (players, names) = build_players(seats, config, &seeds)?;
    writeln!(
        out,
        "Seed {master_seed}: {} & {} against {} & {}",
        names[0], names[2], names[1], names[3]
    )?;

    let mut game = JassGame::new(seeds.game, players, names);
    loop {
        game.advance_to_end_of_next_trick()?;
        if game.is_game_over() {
            break;
        }
        if let Some(state) = game.state() {
            writeln!(
                out,
                "turn {:>2} {}  score {}",
                game.turn_number(),
                state.trick(),
                state.score()
            )?;
        }
        pause(config.trick_delay());
    }

    let summary = GameSummary::capture(&game);
    if let Some(winner) = summary.winning_team {
        let (first, second) = team_seats(winner);
        writeln!(
            out,
            "{winner} ({} & {}) wins {} to {}",
            summary.player_names[first.index()],
            summary.player_names[second.index()],
            summary.team_points[winner.index()],
            summary.team_points[winner.other().index()]
        )?;
    }
    event!(
        target: "jass_cli::runner",
        Level::INFO,
        seed = master_seed,
        turns = summary.turns,
        "game finished"
    );
    Ok(summary)
}

pub fn write_summary(summary: &GameSummary, path: &Path) -> Result<()> {
    let json = summary.to_json().context("serializing game summary")?;
    fs::write(path, json).with_context(|| format!("writing summary to {}", path.display()))
}

/// Serves one game for a search bot listening on `port`.
pub fn run_remote(iterations: usize, seed: u64, port: u16) -> Result<()> {
    let listener = RemotePlayerServer::<MctsPlayer>::bind(port)
        .with_context(|| format!("listening on port {port}"))?;
    println!("Waiting for a game on port {port}");
    let bot = MctsPlayer::new(PlayerId::Player1, seed, search_params(iterations));
    let mut server = RemotePlayerServer::new(bot);
    server.run(&listener).context("serving remote game")?;
    println!("Game over");
    Ok(())
}

fn team_seats(team: TeamId) -> (PlayerId, PlayerId) {
    match team {
        TeamId::Team1 => (PlayerId::Player1, PlayerId::Player3),
        TeamId::Team2 => (PlayerId::Player2, PlayerId::Player4),
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_table() -> TableConfig {
        TableConfig {
            iterations: 10,
            pacing_ms: 0,
            trick_delay_ms: 0,
            ..TableConfig::default()
        }
    }

    fn simulated(iterations: usize) -> SeatSpec {
        SeatSpec::Simulated {
            name: None,
            iterations: Some(iterations),
        }
    }

    #[test]
    fn seeds_are_derived_deterministically() {
        let seeds = TableSeeds::draw(1);
        assert_eq!(seeds, TableSeeds::draw(1));
        assert_ne!(seeds, TableSeeds::draw(2));
        assert_ne!(seeds.seats[0], seeds.seats[1]);
    }

    #[test]
    fn seat_names_fall_back_to_config() {
        let mut seats = std::array::from_fn(|_| simulated(10));
        seats[1] = SeatSpec::Simulated {
            name: Some("Gaëlle".to_string()),
            iterations: None,
        };
        let (_, names) =
            build_players(&seats, &quick_table(), &TableSeeds::draw(3)).expect("players");
        assert_eq!(names, ["Aline", "Gaëlle", "Colette", "David"].map(String::from));
    }

    #[test]
    fn local_game_reports_progress_and_winner() {
        let seats = std::array::from_fn(|_| simulated(10));
        let mut out = Vec::new();
        let summary = run_local(&seats, &quick_table(), 42, &mut out).expect("game runs");

        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.starts_with("Seed 42: Aline & Colette against Bastien & David"));
        assert!(text.contains("turn  1 trick 0"));
        let winner = summary.winning_team.expect("winner");
        let last_line = text.lines().last().expect("output");
        assert!(last_line.starts_with(&format!("{winner} (")));
        assert!(last_line.contains(" wins "));
        assert!(summary.team_points[winner.index()] >= 1000);
    }

    #[test]
    fn unreachable_remote_seat_is_an_error() {
        let mut seats = std::array::from_fn(|_| simulated(10));
        seats[2] = SeatSpec::Remote {
            name: None,
            host: Some("127.0.0.1".to_string()),
        };
        let config = TableConfig {
            port: 1,
            ..quick_table()
        };
        assert!(build_players(&seats, &config, &TableSeeds::draw(0)).is_err());
    }
}
