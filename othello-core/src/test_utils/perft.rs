//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for validating and tuning move generation.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::bitboard::{Bitboard, BLACK_START, WHITE_START};
use crate::location::LocationList;
use crate::moves;

pub fn run_perft(depth: u64) -> u64 {
    leaves_below(BLACK_START, WHITE_START, depth, false)
}

fn leaves_below(mover: Bitboard, opponent: Bitboard, depth: u64, passed: bool) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    let destinations = moves::legal_destinations(mover, opponent);
    if destinations.is_empty() {
        // Both players passed: game is over
        if passed {
            return 1;
        }

        return leaves_below(opponent, mover, depth - 1, true);
    }

    LocationList::from(destinations)
        .map(|loc| {
            let (next_mover, next_opponent) = moves::apply_move(mover, opponent, loc.to_bit());
            leaves_below(next_opponent, next_mover, depth - 1, false)
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(5), 1396);
}

#[test]
fn perft_06() {
    assert_eq!(run_perft(6), 8200);
}

#[test]
fn perft_07() {
    assert_eq!(run_perft(7), 55092);
}

#[test]
fn perft_08() {
    assert_eq!(run_perft(8), 390216);
}

// Passing moves begin here.
#[test]
#[ignore]
fn perft_09() {
    assert_eq!(run_perft(9), 3005288);
}

#[test]
#[ignore]
fn perft_10() {
    assert_eq!(run_perft(10), 24571284);
}
