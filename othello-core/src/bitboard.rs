//! Low-level bitboard operations.
//!
//! Under the hood, everything works on u64 bitboards in row-major order:
//! bit 0 is the upper-left corner (A1), bit 63 the lower-right (H8).
//! Columns advance east, rows advance south, so "one square east" is a
//! left shift by 1 and "one square south" is a left shift by 8.

use crate::utils;
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// Starting bitboard for Black: E4 and D5.
pub const BLACK_START: Bitboard = Bitboard(0x0000_0008_1000_0000);

/// Starting bitboard for White: D4 and E5.
pub const WHITE_START: Bitboard = Bitboard(0x0000_0010_0800_0000);

/// Square index -> its bit value. Saves a shift in loops indexed by square.
pub const SQUARE_BITS: [u64; 64] = {
    let mut table = [0u64; 64];
    let mut index = 0;
    while index < 64 {
        table[index] = 1u64 << index;
        index += 1;
    }
    table
};

/// Count the set bits of a 64-bit value with a branch-free divide-and-conquer
/// bit summation: pairs, then nibbles, then bytes, then folded byte sums.
/// Exact for every input; no lookup table and no loop.
#[inline]
pub fn population_count(x: u64) -> u32 {
    const PAIRS: u64 = 0x5555_5555_5555_5555;
    const NIBBLES: u64 = 0x3333_3333_3333_3333;
    const BYTES: u64 = 0x0f0f_0f0f_0f0f_0f0f;

    let x = x - ((x >> 1) & PAIRS);
    let x = (x & NIBBLES) + ((x >> 2) & NIBBLES);
    let x = (x + (x >> 4)) & BYTES;
    let x = x + (x >> 8);
    let x = x + (x >> 16);
    let x = x + (x >> 32);
    (x & 0x7f) as u32
}

/// One of the eight compass directions a line of disks can run in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];
}

// Masks selecting everything except the far-left and far-right columns.
// Shifting a bit off the side of the board must not wrap it into the
// adjacent row, so every east-component shift clears the A file and every
// west-component shift clears the H file after shifting.
const NOT_A_FILE: u64 = 0xfefe_fefe_fefe_fefe;
const NOT_H_FILE: u64 = 0x7f7f_7f7f_7f7f_7f7f;

/// Shift every set bit one step in `direction`, dropping bits that would
/// leave the board instead of letting them wrap across an edge.
#[inline]
pub fn neighbor_mask(bits: Bitboard, direction: Direction) -> Bitboard {
    let raw = u64::from(bits);
    let shifted = match direction {
        Direction::North => raw >> 8,
        Direction::NorthEast => (raw >> 7) & NOT_A_FILE,
        Direction::East => (raw << 1) & NOT_A_FILE,
        Direction::SouthEast => (raw << 9) & NOT_A_FILE,
        Direction::South => raw << 8,
        Direction::SouthWest => (raw << 7) & NOT_H_FILE,
        Direction::West => (raw >> 1) & NOT_H_FILE,
        Direction::NorthWest => (raw >> 9) & NOT_H_FILE,
    };
    Bitboard(shifted)
}

impl Bitboard {
    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u32 {
        population_count(self.0)
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub fn count_empty(self) -> u32 {
        64 - population_count(self.0)
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return true if the square with this row-major index is set.
    #[inline]
    pub fn contains_index(self, index: u8) -> bool {
        self.0 & SQUARE_BITS[index as usize] != 0
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let raw = self.0;
        utils::format_grid(
            SQUARE_BITS.iter().map(|bit| match raw & bit {
                0 => '.',
                _ => '#',
            }),
            f,
        )
    }
}
