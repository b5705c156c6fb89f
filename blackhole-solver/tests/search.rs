use blackhole_common::{Layout, Rules, encode_log};
use blackhole_solver::{SearchOptions, Strategy, check, solve};

use std::time::Duration;

// 3 ranks, 2 suits; piles [2], [5], [3]; hole 1. Exactly two solutions:
// play 2-3-5 or 5-3-2.
const SMALL: [i32; 10] = [3, 2, 3, 1, 2, -1, 5, -1, 3, -1];

// 5 ranks, 1 suit; piles [2,4], [3]; hole 1. Unsolvable as black hole,
// solvable with the worm-hole slot.
const WORM: [i32; 9] = [5, 1, 2, 1, 2, 4, -1, 3, -1];

#[test]
fn test_first_solution_replays_through_checker() {
    let layout = Layout::from_ints(&SMALL);
    let report = solve(layout.clone(), SearchOptions::default()).unwrap();
    assert!(report.solved);
    let solution = report.solution.unwrap();
    assert!(check(
        &layout,
        &encode_log(solution.log()),
        Rules::BlackHole
    ));
}

#[test]
fn test_worm_hole_puzzle_needs_the_slot() {
    let layout = Layout::from_ints(&WORM);

    let black = solve(layout.clone(), SearchOptions::default()).unwrap();
    assert!(!black.solved);

    let worm = solve(layout.clone(), SearchOptions {
        rules: Rules::WormHole,
        ..Default::default()
    })
    .unwrap();
    assert!(worm.solved);
    let solution = worm.solution.unwrap();
    assert!(solution.log().iter().any(|m| m.is_stash()));
    assert!(check(&layout, &encode_log(solution.log()), Rules::WormHole));
}

#[test]
fn test_strategies_differ_only_in_tie_break() {
    let layout = Layout::from_ints(&SMALL);

    let stack = solve(layout.clone(), SearchOptions {
        strategy: Strategy::Stack,
        ..Default::default()
    })
    .unwrap();
    let ordered = solve(layout.clone(), SearchOptions {
        strategy: Strategy::Ordered,
        ..Default::default()
    })
    .unwrap();

    // The stack strategy unwinds the last-generated branch first, the
    // ordered strategy the first-generated one.
    let stack_log = encode_log(stack.solution.unwrap().log());
    let ordered_log = encode_log(ordered.solution.unwrap().log());
    assert_eq!(stack_log, vec![1, 5, 2, 3, 0, 2]);
    assert_eq!(ordered_log, vec![0, 2, 2, 3, 1, 5]);

    for log in [&stack_log, &ordered_log] {
        assert!(check(&layout, log, Rules::BlackHole));
    }
}

#[test]
fn test_enumerate_all_agrees_across_strategies() {
    let layout = Layout::from_ints(&SMALL);

    let mut found = Vec::new();
    for strategy in [Strategy::Stack, Strategy::Ordered] {
        let report = solve(layout.clone(), SearchOptions {
            strategy,
            complete: true,
            ..Default::default()
        })
        .unwrap();
        for solution in &report.solutions {
            assert!(check(&layout, &encode_log(solution.log()), Rules::BlackHole));
        }
        let mut logs: Vec<Vec<i32>> = report
            .solutions
            .iter()
            .map(|s| encode_log(s.log()))
            .collect();
        logs.sort();
        found.push(logs);
    }

    assert_eq!(found[0].len(), 2);
    assert_eq!(found[0], found[1]);
}

#[test]
fn test_first_solution_is_deterministic() {
    // 4 ranks, 2 suits; seven cards over four piles gives real branching
    // while the search still exhausts quickly.
    let layout = Layout::from_ints(&[4, 2, 4, 1, 2, 6, -1, 3, 7, -1, 4, 8, -1, 5, -1]);

    for strategy in [Strategy::Stack, Strategy::Ordered] {
        let a = solve(layout.clone(), SearchOptions {
            strategy,
            ..Default::default()
        })
        .unwrap();
        let b = solve(layout.clone(), SearchOptions {
            strategy,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(a.solved, b.solved);
        assert_eq!(a.nodes_visited, b.nodes_visited);
        let log_a = a.solution.map(|s| encode_log(s.log()));
        let log_b = b.solution.map(|s| encode_log(s.log()));
        assert_eq!(log_a, log_b);
    }
}

#[test]
fn test_timeout_clamps_elapsed_time() {
    let mut layout = Layout::standard();
    layout.randomise(1, 51);

    let budget = Duration::from_nanos(1);
    let report = solve(layout.clone(), SearchOptions {
        budget,
        ..Default::default()
    })
    .unwrap();

    assert!(report.timed_out);
    assert_eq!(report.elapsed, budget);
    assert!(report.nodes_visited >= 1);
    // Whatever was found before the cutoff must still be valid.
    if let Some(solution) = report.solution {
        assert!(check(&layout, &encode_log(solution.log()), Rules::BlackHole));
    }
}

#[test]
fn test_standard_deal_search_terminates() {
    let mut layout = Layout::standard();
    layout.randomise(2, 51);

    let budget = Duration::from_secs(2);
    let report = solve(layout.clone(), SearchOptions {
        budget,
        ..Default::default()
    })
    .unwrap();

    assert!(report.nodes_visited >= 1);
    assert!(report.elapsed <= budget);
    if report.solved {
        let solution = report.solution.unwrap();
        assert!(check(&layout, &encode_log(solution.log()), Rules::BlackHole));
    }
}
