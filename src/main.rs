//! Wargame: interactive play from the terminal.
//!
//! Human moves are read from stdin as `<from> <to>` (e.g. `D2 C2`); AI moves
//! are chosen by the search and reported together with its `info` lines.
//!
//! Usage:
//!   wargame [OPTIONS]
//!
//! Options:
//!   --config FILE             JSON config file (other flags override it)
//!   --mode MODE               manual | attacker | defender | auto, or the
//!                             long names human-vs-human, human-vs-ai, ...
//!   --depth N                 Maximum search depth (default: 4)
//!   --time SECS               Search time per AI move (default: 5.0)
//!   --rounds N                Turn limit (default: 100)
//!   --dim N                   Board dimension (default: 5)
//!   --heuristic H             e0 | e1 | e2 (default: e2)
//!   --defender-heuristic H    Defender's heuristic (default: same)
//!   --no-alpha-beta           Plain minimax
//!   --defender-wins-at-limit  Award the defender the win at the turn limit
//!   --position POS            Start from a position string
//!   --transcript FILE         Write a JSONL transcript when the game ends

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};

use wargame::board::RoundLimit;
use wargame::config::GameConfig;
use wargame::game::Game;
use wargame::protocol::{parse_position, render_board};

struct Options {
    config: GameConfig,
    position: Option<String>,
    transcript: Option<String>,
    /// `--rounds` was given explicitly.
    rounds_set: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {}", flag))
}

fn parse<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let v = value(args, i, flag)?;
    v.parse()
        .map_err(|_| format!("invalid {} value '{}'", flag, v))
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    // The config file is the base layer, so read it before any override.
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = value(args, i + 1, "--config")?;
            GameConfig::load(path).map_err(|e| format!("{}: {}", path, e))?
        }
        None => GameConfig::default(),
    };
    let mut position = None;
    let mut transcript = None;
    let mut rounds_set = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => i += 1,
            "--mode" => {
                i += 1;
                config.mode = value(args, i, "--mode")?.parse()?;
            }
            "--depth" => {
                i += 1;
                config.max_depth = parse(args, i, "--depth")?;
            }
            "--time" => {
                i += 1;
                config.max_time = parse(args, i, "--time")?;
            }
            "--rounds" => {
                i += 1;
                config.max_turns = parse(args, i, "--rounds")?;
                rounds_set = true;
            }
            "--dim" => {
                i += 1;
                config.dim = parse(args, i, "--dim")?;
            }
            "--heuristic" => {
                i += 1;
                config.heuristic = value(args, i, "--heuristic")?.parse()?;
            }
            "--defender-heuristic" => {
                i += 1;
                config.defender_heuristic = Some(value(args, i, "--defender-heuristic")?.parse()?);
            }
            "--no-alpha-beta" => config.alpha_beta = false,
            "--defender-wins-at-limit" => config.round_limit = RoundLimit::DefenderWins,
            "--position" => {
                i += 1;
                position = Some(value(args, i, "--position")?.to_string());
            }
            "--transcript" => {
                i += 1;
                transcript = Some(value(args, i, "--transcript")?.to_string());
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(Some(Options {
        config,
        position,
        transcript,
        rounds_set,
    }))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(Some(o)) => o,
        Ok(None) => return,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(options: Options) -> Result<(), String> {
    let mut config = options.config;
    let mut game = match &options.position {
        Some(pos) => {
            let state = parse_position(pos).map_err(|e| format!("invalid position: {}", e))?;
            // Without --rounds the position's own turn limit stands.
            if !options.rounds_set {
                config.max_turns = state.max_turns;
            }
            Game::from_state(config, state)
        }
        None => Game::new(config),
    }
    .map_err(|e| e.to_string())?;

    eprintln!(
        "Wargame: {}, depth {}, {:.1}s/move, alpha-beta {}, {} turns",
        game.config().mode,
        game.config().max_depth,
        game.config().max_time,
        if game.config().alpha_beta { "on" } else { "off" },
        game.config().max_turns
    );

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let state = game.state();
        let _ = write!(out, "\n{}", render_board(state));
        if let Some(outcome) = game.outcome() {
            let _ = writeln!(out, "Game over: {} after {} turns", outcome, state.turns_played);
            break;
        }
        let player = state.next_player;
        let turn = state.turns_played + 1;

        if game.is_ai_turn() {
            let record = game.play_ai_turn(&mut out).map_err(|e| e.to_string())?;
            let _ = writeln!(out, "Turn {}: computer {} plays {}", turn, player, record.notation);
            if let Some(s) = &record.search {
                let _ = writeln!(
                    out,
                    "  score {} depth {} evals {} time {}ms",
                    s.score, s.depth, s.evaluations, s.elapsed_ms
                );
            }
            continue;
        }

        let _ = write!(out, "Turn {}: {}, enter move: ", turn, player);
        let _ = out.flush();
        let line = match input.next() {
            Some(Ok(l)) => l,
            _ => {
                eprintln!("input closed, stopping");
                break;
            }
        };
        if let Err(e) = game.play_human(&line) {
            eprintln!("illegal move '{}': {}", line.trim(), e);
        }
    }

    print_stats(&game, &mut out);

    if let Some(path) = &options.transcript {
        let file = File::create(path).map_err(|e| format!("{}: {}", path, e))?;
        let mut writer = BufWriter::new(file);
        game.write_transcript(&mut writer)
            .map_err(|e| format!("{}: {}", path, e))?;
        eprintln!("Wrote transcript to {}", path);
    }
    Ok(())
}

fn print_stats<W: Write>(game: &Game, out: &mut W) {
    let stats = game.stats();
    if stats.ai_turns == 0 {
        return;
    }
    let _ = writeln!(out, "Cumulative evals: {}", stats.evaluations);
    let per_depth: Vec<String> = stats
        .evaluations_per_depth
        .iter()
        .enumerate()
        .filter(|(_, &n)| n > 0)
        .map(|(d, n)| format!("{}={}", d, n))
        .collect();
    let _ = writeln!(out, "Cumulative evals by depth: {}", per_depth.join(" "));
    let pct: Vec<String> = stats
        .depth_percentages()
        .iter()
        .enumerate()
        .filter(|(_, &p)| p > 0.0)
        .map(|(d, p)| format!("{}={:.1}%", d, p))
        .collect();
    let _ = writeln!(out, "Cumulative % evals by depth: {}", pct.join(" "));
    let _ = writeln!(
        out,
        "Eval perf.: {:.1}k/s over {:.1}s",
        stats.eval_rate() / 1000.0,
        stats.search_seconds
    );
}

fn print_usage() {
    eprintln!("Usage: wargame [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE             JSON config file (flags override it)");
    eprintln!("  --mode MODE               manual | attacker | defender | auto");
    eprintln!("  --depth N                 Maximum search depth (default: 4)");
    eprintln!("  --time SECS               Search time per AI move (default: 5.0)");
    eprintln!("  --rounds N                Turn limit (default: 100)");
    eprintln!("  --dim N                   Board dimension (default: 5)");
    eprintln!("  --heuristic H             e0 | e1 | e2 (default: e2)");
    eprintln!("  --defender-heuristic H    Defender's heuristic (default: same)");
    eprintln!("  --no-alpha-beta           Plain minimax");
    eprintln!("  --defender-wins-at-limit  Defender wins when the turn limit is hit");
    eprintln!("  --position POS            Start from a position string");
    eprintln!("  --transcript FILE         Write a JSONL transcript at the end");
    eprintln!("  --help                    Show this help");
}
