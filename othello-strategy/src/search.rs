//! Fixed-depth minimax search with bound-threaded alpha-beta pruning.
//!
//! The search runs on board copies threaded through the recursion by value;
//! it never touches the canonical game state. Pruning uses a single shared
//! cutoff value instead of separate alpha/beta bounds: each node passes its
//! running best value down as the child's bound, and a child value strictly
//! beating the inherited bound ends the node immediately.

use othello_core::bitboard::{Bitboard, SQUARE_BITS};
use othello_core::{judge_position, moves, GameResult, Player};

/// Positional weights used while no disk has reached the border ring:
/// stay central, keep off the edges.
#[rustfmt::skip]
const EARLY_WEIGHTS: [i32; 64] = [
    -50, -20, -15, -10, -10, -15, -20, -50,
    -20, -25,  -5,  -5,  -5,  -5, -25, -20,
    -15,  -5,  10,   5,   5,  10,  -5, -15,
    -10,  -5,   5,  15,  15,   5,  -5, -10,
    -10,  -5,   5,  15,  15,   5,  -5, -10,
    -15,  -5,  10,   5,   5,  10,  -5, -15,
    -20, -25,  -5,  -5,  -5,  -5, -25, -20,
    -50, -20, -15, -10, -10, -15, -20, -50,
];

/// Positional weights once the frontier has reached the border: corners
/// dominate, the squares feeding them are liabilities.
#[rustfmt::skip]
const LATE_WEIGHTS: [i32; 64] = [
    120, -20,  20,   5,   5,  20, -20, 120,
    -20, -40,  -5,  -5,  -5,  -5, -40, -20,
     20,  -5,  15,   3,   3,  15,  -5,  20,
      5,  -5,   3,   3,   3,   3,  -5,   5,
      5,  -5,   3,   3,   3,   3,  -5,   5,
     20,  -5,  15,   3,   3,  15,  -5,  20,
    -20, -40,  -5,  -5,  -5,  -5, -40, -20,
    120, -20,  20,   5,   5,  20, -20, 120,
];

/// The outer ring of the board. While it is empty the opening weights apply.
const BORDER_MASK: u64 = 0xFF81_8181_8181_81FF;

/// Dominates any positional sum (the largest reachable magnitude is
/// 64 * 120), so decided games always outrank heuristic scores.
const TERMINAL_SCORE: f64 = 1.0e6;

/// Score a position for `reference`: the phase-selected weight of every
/// square it occupies, minus the same for its opponent.
pub fn evaluate(black: Bitboard, white: Bitboard, reference: Player) -> f64 {
    let occupied = u64::from(black) | u64::from(white);
    let weights = if occupied & BORDER_MASK == 0 {
        &EARLY_WEIGHTS
    } else {
        &LATE_WEIGHTS
    };

    let (mine, theirs) = match reference {
        Player::Black => (u64::from(black), u64::from(white)),
        Player::White => (u64::from(white), u64::from(black)),
    };

    let mut score = 0i32;
    for (index, &weight) in weights.iter().enumerate() {
        let bit = SQUARE_BITS[index];
        if mine & bit != 0 {
            score += weight;
        } else if theirs & bit != 0 {
            score -= weight;
        }
    }
    f64::from(score)
}

/// Recursive minimax step. `reference` is the side being optimized for;
/// nodes where `to_move == reference` maximize, the rest minimize. `bound`
/// is the parent's running best value; a child value strictly beating it
/// cuts the node short.
///
/// A forced pass recurses with the turn flipped at the next depth without
/// producing a choice node, so the returned square stays `None` there.
/// Candidates are explored in ascending square-index order and ties keep
/// the first candidate, making the search fully deterministic.
pub fn search(
    black: Bitboard,
    white: Bitboard,
    to_move: Player,
    reference: Player,
    depth: u8,
    bound: f64,
) -> (f64, Option<u8>) {
    if depth == 0 {
        return (evaluate(black, white, reference), None);
    }

    let (mover, opponent) = match to_move {
        Player::Black => (black, white),
        Player::White => (white, black),
    };

    let destinations = moves::legal_destinations(mover, opponent);
    if destinations.is_empty() {
        return search(black, white, !to_move, reference, depth - 1, bound);
    }

    let maximizing = to_move == reference;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut chosen = None;

    let mut remaining = u64::from(destinations);
    while remaining != 0 {
        let index = remaining.trailing_zeros() as u8;
        remaining &= remaining - 1;
        let square_bit = Bitboard::from(SQUARE_BITS[index as usize]);

        let (next_mover, next_opponent) = moves::apply_move(mover, opponent, square_bit);
        let (next_black, next_white) = match to_move {
            Player::Black => (next_mover, next_opponent),
            Player::White => (next_opponent, next_mover),
        };

        // Decided positions are scored on the spot; the search never
        // descends into a finished game.
        let value = match judge_position(next_black, next_white, reference) {
            GameResult::InProgress => {
                search(next_black, next_white, !to_move, reference, depth - 1, best).0
            }
            GameResult::Win => TERMINAL_SCORE,
            GameResult::Lose => -TERMINAL_SCORE,
            GameResult::Draw => 0.0,
        };

        if maximizing {
            if value > best {
                best = value;
                chosen = Some(index);
            }
            if value > bound {
                return (value, Some(index));
            }
        } else {
            if value < best {
                best = value;
                chosen = Some(index);
            }
            if value < bound {
                return (value, Some(index));
            }
        }
    }

    (best, chosen)
}

/// Pick a destination square for `to_move` by searching `depth` plies ahead.
///
/// Callers must confirm the side to move has a legal destination (and pass
/// `depth >= 1`); otherwise no square can be chosen and `None` is returned.
pub fn select_move(black: Bitboard, white: Bitboard, to_move: Player, depth: u8) -> Option<u8> {
    search(black, white, to_move, to_move, depth, f64::INFINITY).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::bitboard::{BLACK_START, WHITE_START};

    fn mask(indices: &[usize]) -> Bitboard {
        let mut raw = 0u64;
        for &index in indices {
            raw |= SQUARE_BITS[index];
        }
        Bitboard::from(raw)
    }

    /// Full-width minimax with no pruning, as an oracle for the
    /// bound-threaded search.
    fn minimax_unpruned(
        black: Bitboard,
        white: Bitboard,
        to_move: Player,
        reference: Player,
        depth: u8,
    ) -> (f64, Option<u8>) {
        if depth == 0 {
            return (evaluate(black, white, reference), None);
        }
        let (mover, opponent) = match to_move {
            Player::Black => (black, white),
            Player::White => (white, black),
        };
        let destinations = moves::legal_destinations(mover, opponent);
        if destinations.is_empty() {
            return minimax_unpruned(black, white, !to_move, reference, depth - 1);
        }

        let maximizing = to_move == reference;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut chosen = None;
        let mut remaining = u64::from(destinations);
        while remaining != 0 {
            let index = remaining.trailing_zeros() as u8;
            remaining &= remaining - 1;
            let square_bit = Bitboard::from(SQUARE_BITS[index as usize]);
            let (next_mover, next_opponent) = moves::apply_move(mover, opponent, square_bit);
            let (next_black, next_white) = match to_move {
                Player::Black => (next_mover, next_opponent),
                Player::White => (next_opponent, next_mover),
            };
            let value = match judge_position(next_black, next_white, reference) {
                GameResult::InProgress => {
                    minimax_unpruned(next_black, next_white, !to_move, reference, depth - 1).0
                }
                GameResult::Win => TERMINAL_SCORE,
                GameResult::Lose => -TERMINAL_SCORE,
                GameResult::Draw => 0.0,
            };
            let improves = if maximizing { value > best } else { value < best };
            if improves {
                best = value;
                chosen = Some(index);
            }
        }
        (best, chosen)
    }

    #[test]
    fn evaluation_is_antisymmetric() {
        let black = mask(&[19, 27, 28, 35]);
        let white = mask(&[36]);
        assert_eq!(
            evaluate(black, white, Player::Black),
            -evaluate(black, white, Player::White)
        );
    }

    #[test]
    fn evaluation_switches_tables_at_the_border() {
        // Same interior disks; adding one border disk flips the phase.
        let black = mask(&[27]);
        let white = mask(&[36]);
        let early = evaluate(black, white, Player::Black);
        assert_eq!(early, f64::from(EARLY_WEIGHTS[27] - EARLY_WEIGHTS[36]));

        let white_with_edge = white | mask(&[0]);
        let late = evaluate(black, white_with_edge, Player::Black);
        assert_eq!(late, f64::from(LATE_WEIGHTS[27] - LATE_WEIGHTS[36] - LATE_WEIGHTS[0]));
    }

    #[test]
    fn symmetric_opening_takes_the_lowest_square() {
        // All four opening moves are rotations of each other and score
        // identically, so the first-explored square must win the tie.
        assert_eq!(select_move(BLACK_START, WHITE_START, Player::Black, 1), Some(19));
        assert_eq!(select_move(BLACK_START, WHITE_START, Player::Black, 3), Some(19));
    }

    #[test]
    fn search_is_deterministic() {
        let first = select_move(BLACK_START, WHITE_START, Player::Black, 4);
        let second = select_move(BLACK_START, WHITE_START, Player::Black, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn forced_move_is_chosen_regardless_of_score() {
        // Black's only destination is C1; its static score is terrible in
        // both weight tables but there is nothing else to pick.
        let black = mask(&[0]);
        let white = mask(&[1]);
        assert_eq!(
            u64::from(moves::legal_destinations(black, white)),
            SQUARE_BITS[2]
        );
        assert_eq!(select_move(black, white, Player::Black, 1), Some(2));
    }

    #[test]
    fn winning_move_dominates_positional_score() {
        // One empty square left; filling it ends and wins the game.
        let black = mask(&(0..62).collect::<Vec<_>>());
        let white = mask(&[62]);
        assert_eq!(select_move(black, white, Player::Black, 3), Some(63));

        let square = Bitboard::from(SQUARE_BITS[63]);
        let (next_black, _) = moves::apply_move(black, white, square);
        assert_eq!(next_black.count_occupied(), 64);
    }

    #[test]
    fn pruning_preserves_the_unpruned_choice() {
        // The bound-threaded cutoff only fires on strictly better values,
        // so root value and move must match a full-width search.
        let positions = {
            let mut boards = vec![(BLACK_START, WHITE_START, Player::Black)];
            // A lopsided midgame position reached by lowest-index play.
            let (mut black, mut white) = (BLACK_START, WHITE_START);
            let mut to_move = Player::Black;
            for _ in 0..6 {
                let (mover, opponent) = match to_move {
                    Player::Black => (black, white),
                    Player::White => (white, black),
                };
                let destinations = u64::from(moves::legal_destinations(mover, opponent));
                let index = destinations.trailing_zeros() as usize;
                let (next_mover, next_opponent) =
                    moves::apply_move(mover, opponent, Bitboard::from(SQUARE_BITS[index]));
                match to_move {
                    Player::Black => {
                        black = next_mover;
                        white = next_opponent;
                    }
                    Player::White => {
                        white = next_mover;
                        black = next_opponent;
                    }
                }
                to_move = !to_move;
            }
            boards.push((black, white, to_move));
            boards
        };

        for (black, white, to_move) in positions {
            for depth in 1..=4 {
                let pruned = search(black, white, to_move, to_move, depth, f64::INFINITY);
                let oracle = minimax_unpruned(black, white, to_move, to_move, depth);
                assert_eq!(pruned, oracle, "depth {} diverged", depth);
            }
        }
    }

    #[test]
    fn depth_zero_returns_no_square() {
        assert_eq!(select_move(BLACK_START, WHITE_START, Player::Black, 0), None);
    }
}
