//! Self-play batch CLI.
//!
//! Plays AI-vs-AI games and outputs one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N               Number of games to play (default: 10)
//!   --depth N               Maximum search depth (default: 3)
//!   --time SECS             Search time per move (default: 1.0)
//!   --rounds N              Turn limit (default: 100)
//!   --heuristic H           Attacker heuristic (default: e2)
//!   --defender-heuristic H  Defender heuristic (default: same)
//!   --random-plies N        Random opening plies per game (default: 2)
//!   --no-alternate          Keep heuristics on fixed sides
//!   --threads N             Number of parallel games (default: 1)
//!   --seed N                Random seed, 0 for entropy (default: 0)
//!   --output FILE           Output file path (default: stdout)
//!   --quiet                 Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::str::FromStr;
use std::time::Instant;

use wargame::selfplay::{self, SelfPlayConfig};

fn arg<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = arg(&args, i, "--games");
            }
            "--depth" => {
                i += 1;
                config.game.max_depth = arg(&args, i, "--depth");
            }
            "--time" => {
                i += 1;
                config.game.max_time = arg(&args, i, "--time");
            }
            "--rounds" => {
                i += 1;
                config.game.max_turns = arg(&args, i, "--rounds");
            }
            "--heuristic" => {
                i += 1;
                config.game.heuristic = arg(&args, i, "--heuristic");
            }
            "--defender-heuristic" => {
                i += 1;
                config.game.defender_heuristic = Some(arg(&args, i, "--defender-heuristic"));
            }
            "--random-plies" => {
                i += 1;
                config.game.random_plies = arg(&args, i, "--random-plies");
            }
            "--no-alternate" => {
                config.alternate = false;
            }
            "--threads" => {
                i += 1;
                config.threads = arg(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = arg(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(arg(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let quiet = config.quiet;
    if !quiet {
        eprintln!(
            "Self-play: {} games, depth {}, {:.1}s/move, {} vs {}, {} threads",
            config.num_games,
            config.game.max_depth,
            config.game.max_time,
            config.game.heuristic,
            config
                .game
                .defender_heuristic
                .unwrap_or(config.game.heuristic),
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => match File::create(path) {
            Ok(file) => selfplay::write_jsonl(&games, &mut BufWriter::new(file)),
            Err(e) => Err(e),
        },
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    match (written, output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            std::process::exit(1);
        }
        (Ok(()), Some(path)) if !quiet => eprintln!("Wrote {} games to {}", games.len(), path),
        _ => {}
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N               Number of games to play (default: 10)");
    eprintln!("  --depth N               Maximum search depth (default: 3)");
    eprintln!("  --time SECS             Search time per move (default: 1.0)");
    eprintln!("  --rounds N              Turn limit (default: 100)");
    eprintln!("  --heuristic H           Attacker heuristic (default: e2)");
    eprintln!("  --defender-heuristic H  Defender heuristic (default: same)");
    eprintln!("  --random-plies N        Random opening plies per game (default: 2)");
    eprintln!("  --no-alternate          Keep heuristics on fixed sides");
    eprintln!("  --threads N             Number of parallel games (default: 1)");
    eprintln!("  --seed N                Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE           Output file path (default: stdout)");
    eprintln!("  --quiet                 Suppress progress and summary output");
    eprintln!("  --help                  Show this help");
}
