//! Randomized checks of the rules engine and search.
//!
//! Positions are generated from fixed seeds so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wargame::board::{GameState, Player, Unit, ALL_UNIT_TYPES};
use wargame::eval::{evaluate, Heuristic, ALL_HEURISTICS};
use wargame::movegen::{legal_actions, validate};
use wargame::protocol::{encode_position, parse_position};
use wargame::resolve::{apply_action, is_terminal, outcome, undo_action};
use wargame::search::{Deadline, Searcher};

/// A random mid-game position where both sides still have units.
fn random_state(rng: &mut StdRng) -> GameState {
    loop {
        let dim = rng.gen_range(4..=6);
        let mut state = GameState::empty(dim, 60);
        for c in state.board.coords().collect::<Vec<_>>() {
            if rng.gen_bool(0.3) {
                let player = if rng.gen_bool(0.5) {
                    Player::Attacker
                } else {
                    Player::Defender
                };
                let t = ALL_UNIT_TYPES[rng.gen_range(0..ALL_UNIT_TYPES.len())];
                state.place_unit(c, Unit::with_health(player, t, rng.gen_range(1..=9)));
            }
        }
        if rng.gen_bool(0.5) {
            state.next_player = Player::Defender;
        }
        state.turns_played = rng.gen_range(0..50);
        if outcome(&state).is_none() {
            return state;
        }
    }
}

fn search(state: &GameState, heuristic: Heuristic, depth: u32, alpha_beta: bool) -> (wargame::board::Action, i32, u64) {
    let mut work = state.clone();
    let actions = legal_actions(state);
    let mut searcher = Searcher::new(heuristic, state.next_player, alpha_beta, Deadline::none());
    let (action, score) = searcher
        .search_root(&mut work, &actions, depth)
        .expect("search without a deadline completes");
    assert_eq!(&work, state, "search must leave the state untouched");
    (action, score, searcher.stats().nodes)
}

#[test]
fn pruning_never_changes_the_decision() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..40 {
        let state = random_state(&mut rng);
        for heuristic in ALL_HEURISTICS {
            for depth in 1..=3 {
                let (full_action, full_score, full_nodes) = search(&state, heuristic, depth, false);
                let (ab_action, ab_score, ab_nodes) = search(&state, heuristic, depth, true);
                let pos = encode_position(&state);
                assert_eq!(ab_action, full_action, "{} {} depth {}", pos, heuristic, depth);
                assert_eq!(ab_score, full_score, "{} {} depth {}", pos, heuristic, depth);
                assert!(ab_nodes <= full_nodes, "{} pruned search visited more nodes", pos);
            }
        }
    }
}

#[test]
fn every_generated_action_is_legal_and_reversible() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let state = random_state(&mut rng);
        for action in legal_actions(&state) {
            assert_eq!(validate(&state, &action), Ok(()));
            let mut work = state.clone();
            let undo = apply_action(&mut work, &action).unwrap();
            assert_eq!(work.turns_played, state.turns_played + 1);
            assert_eq!(work.next_player, state.next_player.other());
            undo_action(&mut work, &undo);
            assert_eq!(work, state, "undo of {} in {}", action, encode_position(&state));
        }
    }
}

#[test]
fn terminal_exactly_when_no_actions() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let mut state = random_state(&mut rng);
        // Play random actions to the end, checking at every step.
        loop {
            let actions = legal_actions(&state);
            assert_eq!(is_terminal(&state), actions.is_empty(), "{}", encode_position(&state));
            if actions.is_empty() {
                break;
            }
            let action = actions[rng.gen_range(0..actions.len())];
            apply_action(&mut state, &action).unwrap();
        }
    }
}

#[test]
fn evaluations_are_antisymmetric() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let state = random_state(&mut rng);
        for heuristic in ALL_HEURISTICS {
            assert_eq!(
                evaluate(heuristic, &state, Player::Attacker),
                -evaluate(heuristic, &state, Player::Defender)
            );
        }
    }
}

#[test]
fn positions_survive_encoding() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..100 {
        let state = random_state(&mut rng);
        let encoded = encode_position(&state);
        let decoded = parse_position(&encoded).unwrap();
        assert_eq!(decoded, state, "{}", encoded);
    }
}
