//! Self-play batch runner.
//!
//! Plays AI-vs-AI games with per-player heuristics, optionally opening each
//! game with a few seeded random plies so games differ, and records the
//! result of every game. Games are independent, so with `threads > 1` they
//! run concurrently on a rayon pool; each game's searches stay sequential.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Player;
use crate::config::{ConfigError, GameConfig, GameMode};
use crate::eval::{Heuristic, ALL_HEURISTICS};
use crate::game::{Game, GameStats};
use crate::movegen::random_action;
use crate::protocol::encode_position;
use crate::resolve::Outcome;

/// Configuration for a self-play batch.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Game and search settings shared by every game. The mode is forced to
    /// AI vs AI.
    pub game: GameConfig,
    /// Swap the two heuristics between sides on every odd game.
    pub alternate: bool,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            game: GameConfig {
                mode: GameMode::AiVsAi,
                max_time: 1.0,
                max_depth: 3,
                random_plies: 2,
                ..Default::default()
            },
            alternate: true,
            threads: 1,
            seed: 0,
            quiet: false,
        }
    }
}

/// The result of one self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub attacker_heuristic: Heuristic,
    pub defender_heuristic: Heuristic,
    /// `None` only if the game was cut short, which the turn limit prevents.
    pub outcome: Option<Outcome>,
    pub turns_played: u32,
    /// Every ply in notation, random opening plies included.
    pub moves: Vec<String>,
    pub final_position: String,
    pub stats: GameStats,
}

impl GameRecord {
    /// The heuristic of the winning side, if any.
    pub fn winning_heuristic(&self) -> Option<Heuristic> {
        match self.outcome?.winner()? {
            Player::Attacker => Some(self.attacker_heuristic),
            Player::Defender => Some(self.defender_heuristic),
        }
    }
}

/// The game config for game `game_id`, with sides swapped on odd games when
/// alternating.
fn game_config(config: &SelfPlayConfig, game_id: usize) -> GameConfig {
    let mut game = config.game.clone();
    game.mode = GameMode::AiVsAi;
    let attacker = game.heuristic_for(Player::Attacker);
    let defender = game.heuristic_for(Player::Defender);
    if config.alternate && game_id % 2 == 1 {
        game.heuristic = defender;
        game.defender_heuristic = Some(attacker);
    }
    game
}

/// Plays a single self-play game and returns its record.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, ConfigError> {
    let game_config = game_config(config, game_id);
    let random_plies = game_config.random_plies;
    let mut game = Game::new(game_config)?;

    for _ in 0..random_plies {
        let Some(action) = random_action(game.state(), rng) else {
            break;
        };
        if let Err(e) = game.play_action(action) {
            panic!("random legal action {} rejected: {}", action, e);
        }
    }

    // Discard info lines.
    let mut null_out = io::sink();
    while game.outcome().is_none() {
        if let Err(e) = game.play_ai_turn(&mut null_out) {
            panic!("search failed on a running game: {}", e);
        }
    }

    Ok(GameRecord {
        game_id,
        attacker_heuristic: game.config().heuristic_for(Player::Attacker),
        defender_heuristic: game.config().heuristic_for(Player::Defender),
        outcome: game.outcome(),
        turns_played: game.state().turns_played,
        moves: game.history().iter().map(|m| m.notation.clone()).collect(),
        final_position: encode_position(game.state()),
        stats: game.stats().clone(),
    })
}

fn seeded_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn report(config: &SelfPlayConfig, n: usize, game: &GameRecord, start: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.outcome {
        Some(o) => o.to_string(),
        None => "unfinished".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} ({} vs {}) after {} turns ({:.1}s)",
        n,
        config.num_games,
        outcome,
        game.attacker_heuristic,
        game.defender_heuristic,
        game.turns_played,
        start.elapsed().as_secs_f64(),
    );
}

/// Runs a self-play batch. Records come back in game ID order.
///
/// Each game seeds its own generator from `seed + game_id`, so a fixed seed
/// reproduces the same batch regardless of the thread count.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    let mut check = config.game.clone();
    check.mode = GameMode::AiVsAi;
    check.validate()?;

    if config.threads > 1 {
        run_parallel(config)
    } else {
        let mut games = Vec::with_capacity(config.num_games);
        for i in 0..config.num_games {
            let start = Instant::now();
            let mut rng = seeded_rng(config, i);
            let game = play_game(config, i, &mut rng)?;
            report(config, i + 1, &game, start);
            games.push(game);
        }
        Ok(games)
    }
}

fn run_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let play = || {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| -> Result<GameRecord, ConfigError> {
                let start = Instant::now();
                let mut rng = seeded_rng(config, i);
                let game = play_game(config, i, &mut rng)?;
                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                report(config, n, &game, start);
                Ok(game)
            })
            .collect::<Result<Vec<_>, ConfigError>>()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool.install(play),
        Err(e) => {
            eprintln!("failed to build thread pool ({}), using the global pool", e);
            play()
        }
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Wins, losses and draws for one heuristic across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeuristicTally {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
}

/// Tallies results per heuristic, indexed like `ALL_HEURISTICS`. A game
/// between two sides using the same heuristic counts once for it.
pub fn tally(games: &[GameRecord]) -> [HeuristicTally; 3] {
    let mut tallies = [HeuristicTally::default(); 3];
    for game in games {
        let mut sides = vec![game.attacker_heuristic];
        if game.defender_heuristic != game.attacker_heuristic {
            sides.push(game.defender_heuristic);
        }
        for h in sides {
            let t = &mut tallies[h as usize];
            t.games += 1;
            match game.outcome {
                Some(Outcome::Draw) | None => t.draws += 1,
                Some(Outcome::Win(_)) if game.winning_heuristic() == Some(h) => t.wins += 1,
                Some(Outcome::Win(_)) => {}
            }
        }
    }
    tallies
}

/// Prints a summary of the batch to stderr.
pub fn print_summary(games: &[GameRecord]) {
    if games.is_empty() {
        return;
    }
    let n = games.len() as f64;
    let attacker_wins = games
        .iter()
        .filter(|g| g.outcome.and_then(Outcome::winner) == Some(Player::Attacker))
        .count();
    let defender_wins = games
        .iter()
        .filter(|g| g.outcome.and_then(Outcome::winner) == Some(Player::Defender))
        .count();
    let draws = games.len() - attacker_wins - defender_wins;
    let avg_turns = games.iter().map(|g| g.turns_played as f64).sum::<f64>() / n;

    eprintln!("--- Summary ---");
    eprintln!(
        "Attacker wins: {}, Defender wins: {}, draws: {}",
        attacker_wins, defender_wins, draws
    );
    eprintln!("Average game length: {:.1} turns", avg_turns);
    for (h, t) in ALL_HEURISTICS.iter().zip(tally(games)) {
        if t.games > 0 {
            eprintln!(
                "  {}: {} games, {} wins, {} draws ({:.0}% wins)",
                h,
                t.games,
                t.wins,
                t.draws,
                t.wins as f64 * 100.0 / t.games as f64
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(num_games: usize, threads: usize) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games,
            game: GameConfig {
                mode: GameMode::AiVsAi,
                max_time: 30.0,
                max_depth: 1,
                max_turns: 10,
                heuristic: Heuristic::E0,
                defender_heuristic: Some(Heuristic::E2),
                random_plies: 2,
                ..Default::default()
            },
            alternate: true,
            threads,
            seed: 42,
            quiet: true,
        }
    }

    #[test]
    fn alternate_swaps_heuristics_on_odd_games() {
        let config = quick_config(2, 1);
        let even = game_config(&config, 0);
        let odd = game_config(&config, 1);
        assert_eq!(even.heuristic_for(Player::Attacker), Heuristic::E0);
        assert_eq!(even.heuristic_for(Player::Defender), Heuristic::E2);
        assert_eq!(odd.heuristic_for(Player::Attacker), Heuristic::E2);
        assert_eq!(odd.heuristic_for(Player::Defender), Heuristic::E0);
    }

    #[test]
    fn games_finish_within_turn_limit() {
        let games = run_self_play(&quick_config(3, 1)).unwrap();
        assert_eq!(games.len(), 3);
        for (i, g) in games.iter().enumerate() {
            assert_eq!(g.game_id, i);
            assert!(g.outcome.is_some());
            assert!(g.turns_played <= 10);
            assert_eq!(g.moves.len() as u32, g.turns_played);
        }
    }

    #[test]
    fn fixed_seed_is_reproducible_across_thread_counts() {
        let sequential = run_self_play(&quick_config(4, 1)).unwrap();
        let parallel = run_self_play(&quick_config(4, 2)).unwrap();
        let moves = |games: &[GameRecord]| -> Vec<Vec<String>> {
            games.iter().map(|g| g.moves.clone()).collect()
        };
        assert_eq!(moves(&sequential), moves(&parallel));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = quick_config(1, 1);
        config.game.max_turns = 0;
        assert!(matches!(run_self_play(&config), Err(ConfigError::ZeroTurns)));
    }

    #[test]
    fn jsonl_has_one_line_per_game() {
        let games = run_self_play(&quick_config(2, 1)).unwrap();
        let mut out = Vec::new();
        write_jsonl(&games, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["game_id"], 0);
        assert_eq!(first["attacker_heuristic"], "e0");
    }

    #[test]
    fn tally_counts_wins_per_heuristic() {
        let record = |a, d, outcome| GameRecord {
            game_id: 0,
            attacker_heuristic: a,
            defender_heuristic: d,
            outcome: Some(outcome),
            turns_played: 10,
            moves: Vec::new(),
            final_position: String::new(),
            stats: GameStats::default(),
        };
        let games = vec![
            record(Heuristic::E0, Heuristic::E2, Outcome::Win(Player::Defender)),
            record(Heuristic::E2, Heuristic::E0, Outcome::Win(Player::Attacker)),
            record(Heuristic::E1, Heuristic::E1, Outcome::Draw),
        ];
        let t = tally(&games);
        assert_eq!(t[Heuristic::E2 as usize], HeuristicTally { games: 2, wins: 2, draws: 0 });
        assert_eq!(t[Heuristic::E0 as usize], HeuristicTally { games: 2, wins: 0, draws: 0 });
        assert_eq!(t[Heuristic::E1 as usize], HeuristicTally { games: 1, wins: 0, draws: 1 });
    }
}
