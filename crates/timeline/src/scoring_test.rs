//! Tests for guess scores and the completion bonus

use std::collections::HashSet;

use crate::scoring::{
    Bonus, CORRECT_REWARD, DEFAULT_PENALTY, GuessRecord, SECONDS_PER_DAY, score_bonus, score_guess,
};

const END: i64 = 1_426_564_800;

fn bots(ids: &[i64]) -> HashSet<i64> {
    ids.iter().copied().collect()
}

fn guess(timestamp: i64, ids: &[i64]) -> GuessRecord {
    GuessRecord {
        timestamp,
        user_ids: ids.to_vec(),
    }
}

#[test]
fn test_non_bot_always_penalised() {
    let truth = bots(&[1, 2]);
    for reveal in [false, true] {
        let scores = score_guess(&[9], &truth, reveal);
        assert_eq!(scores[&9], DEFAULT_PENALTY);
    }
}

#[test]
fn test_bot_revealed_only_after_beta() {
    let truth = bots(&[1]);
    assert_eq!(score_guess(&[1], &truth, false)[&1], DEFAULT_PENALTY);
    assert_eq!(score_guess(&[1], &truth, true)[&1], CORRECT_REWARD);
}

#[test]
fn test_duplicate_ids_collapse() {
    let scores = score_guess(&[1, 1, 2], &bots(&[1]), true);
    assert_eq!(scores.len(), 2);
}

#[test]
fn test_bonus_uses_slowest_bot() {
    let truth = bots(&[1, 2, 3]);
    let t1 = END - 10 * SECONDS_PER_DAY;
    let t2 = END - 7 * SECONDS_PER_DAY;
    let t3 = END - 5 * SECONDS_PER_DAY + 100;
    let guesses = vec![guess(t1, &[1]), guess(t2, &[2, 9]), guess(t3, &[3])];

    let result = score_bonus(&guesses, &truth, END);
    assert!(result.finished);
    // ceil(4.99 days) - 1
    assert_eq!(result.bonus, 4);
}

#[test]
fn test_bonus_takes_first_guess_per_bot() {
    let truth = bots(&[1, 2]);
    let early = END - 3 * SECONDS_PER_DAY;
    let guesses = vec![
        guess(early, &[1, 2]),
        guess(END - SECONDS_PER_DAY, &[1, 2]),
    ];
    assert_eq!(
        score_bonus(&guesses, &truth, END),
        Bonus {
            finished: true,
            bonus: 2
        }
    );
}

#[test]
fn test_bonus_zero_until_all_found() {
    let truth = bots(&[1, 2]);
    let guesses = vec![guess(END - 30 * SECONDS_PER_DAY, &[1, 1, 1])];
    assert_eq!(score_bonus(&guesses, &truth, END), Bonus::default());
}

#[test]
fn test_bonus_floor_at_deadline() {
    let truth = bots(&[1]);
    assert_eq!(score_bonus(&[guess(END, &[1])], &truth, END).bonus, 0);
    assert_eq!(score_bonus(&[guess(END + 500, &[1])], &truth, END).bonus, 0);
    assert!(score_bonus(&[guess(END + 500, &[1])], &truth, END).finished);
}

#[test]
fn test_no_bots_never_finishes() {
    let result = score_bonus(&[guess(0, &[1])], &HashSet::new(), END);
    assert!(!result.finished);
}
