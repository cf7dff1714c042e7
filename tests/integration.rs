//! Integration tests for the wargame binaries.
//!
//! Spawns the interactive `wargame` binary and the `selfplay` batch runner,
//! feeds stdin where needed, and checks what they print.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs `wargame` with `args`, writes `input` to stdin, and waits for exit.
fn run_wargame(args: &[&str], input: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_wargame");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start wargame");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).unwrap();
    stdin.flush().unwrap();
    drop(stdin);

    child.wait_with_output().expect("failed to wait on child")
}

fn run_selfplay(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_selfplay");
    Command::new(exe)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to start selfplay")
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("wargame-{}-{}", std::process::id(), name))
}

#[test]
fn auto_game_plays_to_the_turn_limit() {
    let out = run_wargame(
        &["--mode", "auto", "--depth", "2", "--time", "10", "--rounds", "6"],
        "",
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(stdout.contains("info depth 1 "), "missing info lines:\n{}", stdout);
    assert!(stdout.contains("Turn 1: computer Attacker plays"));
    assert!(stdout.contains("Game over: draw after 6 turns"));
    assert!(stdout.contains("Cumulative evals: "));
    assert!(stdout.contains("Cumulative evals by depth: "));
}

#[test]
fn manual_game_rejects_illegal_input_and_stops_at_eof() {
    let out = run_wargame(&["--mode", "manual"], "E4 D4\nC4 B4\n");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(stderr.contains("illegal move 'E4 D4'"), "stderr:\n{}", stderr);
    assert!(stderr.contains("input closed"));
    assert!(stdout.contains("Turn 1: Attacker, enter move:"));
    // The legal move was accepted, so the defender is asked next.
    assert!(stdout.contains("Turn 2: Defender, enter move:"));
    assert!(!stdout.contains("Game over"));
}

#[test]
fn human_against_ai_alternates() {
    let out = run_wargame(
        &[
            "--mode", "attacker", "--depth", "1", "--time", "10", "--rounds", "2",
        ],
        "C4 B4\n",
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Turn 2: computer Defender plays"));
    assert!(stdout.contains("Game over: draw after 2 turns"));
}

#[test]
fn starts_from_position_string() {
    // The attacker's virus sits next to the defender AI and wins at once.
    let out = run_wargame(
        &[
            "--mode",
            "auto",
            "--depth",
            "2",
            "--position",
            "5a:0:100/dA9A0,aV9A1/-",
        ],
        "",
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Turn 1: computer Attacker plays A1 A0"));
    assert!(stdout.contains("Game over: Attacker wins after 1 turns"));
}

#[test]
fn rounds_flag_limits_a_position_game() {
    let opening =
        "5a:0:100/dA9A0,dT9A1,dF9A2,dT9B0,dP9B1,dF9C0,aP9C4,aF9D3,aV9D4,aP9E2,aV9E3,aA9E4/-";
    let out = run_wargame(
        &["--mode", "auto", "--depth", "1", "--rounds", "2", "--position", opening],
        "",
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Game over: draw after 2 turns"), "stdout:\n{}", stdout);

    // Without --rounds the position's own limit applies.
    let short = opening.replace(":100/", ":1/");
    let out = run_wargame(&["--mode", "auto", "--depth", "1", "--position", &short], "");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Game over: draw after 1 turns"), "stdout:\n{}", stdout);
}

#[test]
fn writes_transcript() {
    let path = temp_path("transcript.jsonl");
    let path_str = path.to_str().unwrap();
    let out = run_wargame(
        &[
            "--mode",
            "auto",
            "--depth",
            "1",
            "--rounds",
            "3",
            "--transcript",
            path_str,
        ],
        "",
    );
    assert!(out.status.success());

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3 + 2);
    assert_eq!(lines[0]["type"], "config");
    assert_eq!(lines[4]["type"], "result");
}

#[test]
fn help_exits_cleanly() {
    let out = run_wargame(&["--help"], "");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage: wargame"));
}

#[test]
fn invalid_arguments_fail() {
    for args in [
        &["--bogus"][..],
        &["--depth", "0"][..],
        &["--heuristic", "e7"][..],
        &["--mode", "sideways"][..],
        &["--dim", "40"][..],
        &["--position", "not a position"][..],
    ] {
        let out = run_wargame(args, "");
        assert!(!out.status.success(), "{:?} should fail", args);
    }
}

#[test]
fn selfplay_writes_one_record_per_game() {
    let path = temp_path("selfplay.jsonl");
    let path_str = path.to_str().unwrap();
    let out = run_selfplay(&[
        "--games", "2", "--depth", "1", "--rounds", "6", "--seed", "7", "--output", path_str,
    ]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Completed 2 games"));

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["game_id"], 0);
    assert_eq!(records[1]["game_id"], 1);
    assert!(records[0]["turns_played"].as_u64().unwrap() <= 6);
}

#[test]
fn selfplay_is_reproducible_with_a_seed() {
    let args = [
        "--games", "2", "--depth", "1", "--rounds", "8", "--seed", "42", "--quiet",
    ];
    let first = run_selfplay(&args);
    let second = run_selfplay(&args);
    assert!(first.status.success());
    assert!(first.stderr.is_empty());
    let moves = |out: &Output| -> Vec<serde_json::Value> {
        String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["moves"].clone())
            .collect()
    };
    assert_eq!(moves(&first), moves(&second));
}
