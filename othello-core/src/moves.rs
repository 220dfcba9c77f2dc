//! Legal-move and flip computation over raw bitboard pairs.
//!
//! Move generation uses a fixed-point bit-parallel sweep: per direction, the
//! mover's disks are smeared through contiguous opponent disks, and one more
//! step into an empty square marks a destination. A line can cross at most
//! six opponent disks on an 8-wide board, so six extension steps reach the
//! fixed point.
//!
//! For efficiency these operations are unchecked and may produce a board
//! where both sides occupy the same square if their contracts are violated.
//! In particular, [`apply_move`] requires a destination already validated
//! with [`is_legal`].

use crate::bitboard::{neighbor_mask, Bitboard, Direction};

/// Compute a mask of every empty square the mover can play on.
#[inline]
pub fn legal_destinations(mover: Bitboard, opponent: Bitboard) -> Bitboard {
    let empties = !(mover | opponent);
    let mut destinations = Bitboard::default();

    for &direction in Direction::ALL.iter() {
        // Opponent disks adjacent to ours along this line, extended through
        // contiguous opponent disks until the run stops growing.
        let mut run = neighbor_mask(mover, direction) & opponent;
        for _ in 0..5 {
            run |= neighbor_mask(run, direction) & opponent;
        }
        destinations |= neighbor_mask(run, direction) & empties;
    }

    destinations
}

/// Return whether `square_bit` is a legal destination for the mover.
/// `square_bit` must be a one-hot mask.
#[inline]
pub fn is_legal(mover: Bitboard, opponent: Bitboard, square_bit: Bitboard) -> bool {
    !(legal_destinations(mover, opponent) & square_bit).is_empty()
}

/// Return whether the mover has any legal destination at all.
#[inline]
pub fn has_any_move(mover: Bitboard, opponent: Bitboard) -> bool {
    !legal_destinations(mover, opponent).is_empty()
}

/// Compute the mask of opponent disks flipped by playing `square_bit`.
///
/// Walks outward from the placed disk in each direction across contiguous
/// opponent disks; a run counts only if it ends on one of the mover's disks.
#[inline]
pub fn flipped_by(mover: Bitboard, opponent: Bitboard, square_bit: Bitboard) -> Bitboard {
    let mut flips = Bitboard::default();

    for &direction in Direction::ALL.iter() {
        let mut run = Bitboard::default();
        let mut probe = neighbor_mask(square_bit, direction);
        while !(probe & opponent).is_empty() {
            run |= probe;
            probe = neighbor_mask(probe, direction);
        }
        if !(probe & mover).is_empty() {
            flips |= run;
        }
    }

    flips
}

/// Play `square_bit` for the mover, returning the updated (mover, opponent)
/// pair. The destination must already have been checked with [`is_legal`];
/// an illegal placement corrupts the board.
#[inline]
pub fn apply_move(
    mover: Bitboard,
    opponent: Bitboard,
    square_bit: Bitboard,
) -> (Bitboard, Bitboard) {
    let flips = flipped_by(mover, opponent, square_bit);
    ((mover ^ flips) | square_bit, opponent ^ flips)
}

/// Disk totals for each side of a board pair.
#[inline]
pub fn disk_counts(first: Bitboard, second: Bitboard) -> (u32, u32) {
    (first.count_occupied(), second.count_occupied())
}
