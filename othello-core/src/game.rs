//! The canonical game state machine.
//!
//! [`Game`] validates every mutation before touching the board, so unlike
//! the raw [`moves`](crate::moves) layer it can never reach an inconsistent
//! state. It also owns the pass counters, the cached terminal judgement,
//! and the undo/redo history stacks.

use crate::bitboard::{Bitboard, BLACK_START, SQUARE_BITS, WHITE_START};
use crate::location::LocationList;
use crate::moves;
use crate::utils;
use crate::NUM_SPACES;
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl Player {
    #[inline]
    fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// The outcome of a game relative to a reference side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win,
    Lose,
    Draw,
}

/// A rejected [`Game`] mutation. Every variant leaves the game unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The supplied square index is outside 0..=63.
    OutOfRange,
    /// The destination is not currently reversible for the side to move.
    IllegalMove,
    /// Undo or redo was attempted with no history entry available.
    EmptyHistory,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfRange => write!(f, "square index outside the board"),
            GameError::IllegalMove => write!(f, "destination is not reversible for the side to move"),
            GameError::EmptyHistory => write!(f, "no history entry to restore"),
        }
    }
}

impl std::error::Error for GameError {}

/// Terminal judgement over a raw board pair, relative to `reference`.
///
/// The game is over when neither side has a legal destination or the board
/// is full; the outcome then follows from the disk counts. Shared with the
/// tree search, which needs the same judgement on simulated boards.
pub fn judge_position(black: Bitboard, white: Bitboard, reference: Player) -> GameResult {
    let (black_count, white_count) = moves::disk_counts(black, white);
    let finished = black_count + white_count == NUM_SPACES as u32
        || (!moves::has_any_move(black, white) && !moves::has_any_move(white, black));

    if !finished {
        return GameResult::InProgress;
    }

    let (mine, theirs) = match reference {
        Player::Black => (black_count, white_count),
        Player::White => (white_count, black_count),
    };

    if mine > theirs {
        GameResult::Win
    } else if mine < theirs {
        GameResult::Lose
    } else {
        GameResult::Draw
    }
}

/// The complete state of an Othello game.
///
/// The undo history is asymmetric on purpose: only moves made by the
/// designated player side are snapshotted, so undoing rolls back to the
/// position before that player's last move, skipping any opponent replies
/// in between.
#[derive(Clone, Debug)]
pub struct Game {
    black: Bitboard,
    white: Bitboard,
    turn: Player,
    player_side: Player,
    consecutive_passes: [u8; 2],
    result: GameResult,
    undo_log: Vec<(Bitboard, Bitboard)>,
    redo_log: Vec<(Bitboard, Bitboard)>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Player::default())
    }
}

impl Game {
    /// Start a game from the standard four-disk layout, with `player_side`
    /// designated as the side whose moves are recorded for undo.
    pub fn new(player_side: Player) -> Self {
        Self {
            black: BLACK_START,
            white: WHITE_START,
            turn: Player::Black,
            player_side,
            consecutive_passes: [0, 0],
            result: GameResult::InProgress,
            undo_log: Vec::new(),
            redo_log: Vec::new(),
        }
    }

    /// The canonical board pair, black first.
    #[inline]
    pub fn boards(&self) -> (Bitboard, Bitboard) {
        (self.black, self.white)
    }

    /// The board pair from `side`'s perspective: (mover, opponent).
    #[inline]
    pub fn boards_for(&self, side: Player) -> (Bitboard, Bitboard) {
        match side {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// The side designated as the player for undo logging.
    #[inline]
    pub fn player_side(&self) -> Player {
        self.player_side
    }

    /// Disk totals, black first.
    #[inline]
    pub fn disk_counts(&self) -> (u32, u32) {
        moves::disk_counts(self.black, self.white)
    }

    /// Every square `side` could play on right now.
    pub fn legal_destinations(&self, side: Player) -> LocationList {
        let (mover, opponent) = self.boards_for(side);
        LocationList::from(moves::legal_destinations(mover, opponent))
    }

    /// Whether `side` has any legal destination.
    pub fn playable(&self, side: Player) -> bool {
        let (mover, opponent) = self.boards_for(side);
        moves::has_any_move(mover, opponent)
    }

    /// Whether the side to move has any legal destination. When this is
    /// false the orchestrating caller advances the turn with [`pass_turn`].
    ///
    /// [`pass_turn`]: Game::pass_turn
    pub fn turn_playable(&self) -> bool {
        self.playable(self.turn)
    }

    /// Play a move for the side to move at a row-major square index.
    ///
    /// The move is validated before any mutation: an index outside the board
    /// fails with [`GameError::OutOfRange`] and a non-reversible destination
    /// with [`GameError::IllegalMove`]. On success the pre-move board is
    /// snapshotted for undo (player-side moves only), the redo buffer is
    /// discarded, and the turn flips.
    pub fn play(&mut self, index: u8) -> Result<(), GameError> {
        if index as usize >= NUM_SPACES {
            return Err(GameError::OutOfRange);
        }
        let square_bit = Bitboard::from(SQUARE_BITS[index as usize]);

        let (mover, opponent) = self.boards_for(self.turn);
        if !moves::is_legal(mover, opponent, square_bit) {
            return Err(GameError::IllegalMove);
        }

        if self.turn == self.player_side {
            self.undo_log.push((self.black, self.white));
        }
        self.redo_log.clear();
        self.consecutive_passes[self.turn.index()] = 0;

        let (mover, opponent) = moves::apply_move(mover, opponent, square_bit);
        match self.turn {
            Player::Black => {
                self.black = mover;
                self.white = opponent;
            }
            Player::White => {
                self.white = mover;
                self.black = opponent;
            }
        }
        self.turn = !self.turn;
        Ok(())
    }

    /// Record a forced pass for the side to move and flip the turn.
    /// The board is untouched.
    pub fn pass_turn(&mut self) {
        self.consecutive_passes[self.turn.index()] += 1;
        self.turn = !self.turn;
    }

    /// How many consecutive passes `side` has accumulated since its last move.
    pub fn consecutive_passes(&self, side: Player) -> u8 {
        self.consecutive_passes[side.index()]
    }

    /// Judge the current position relative to `reference`, caching the label.
    /// Idempotent; never mutates the board.
    pub fn judge(&mut self, reference: Player) -> GameResult {
        self.result = judge_position(self.black, self.white, reference);
        self.result
    }

    /// The label cached by the last [`judge`](Game::judge) call.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Whether the game has reached a terminal position.
    pub fn is_finished(&self) -> bool {
        judge_position(self.black, self.white, Player::Black) != GameResult::InProgress
    }

    /// Roll the board back to the snapshot taken before the player side's
    /// most recent move, pushing the current board onto the redo buffer.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let (black, white) = self.undo_log.pop().ok_or(GameError::EmptyHistory)?;
        self.redo_log.push((self.black, self.white));
        self.black = black;
        self.white = white;
        Ok(())
    }

    /// Re-apply the board state undone by the most recent [`undo`](Game::undo).
    pub fn redo(&mut self) -> Result<(), GameError> {
        let (black, white) = self.redo_log.pop().ok_or(GameError::EmptyHistory)?;
        self.undo_log.push((self.black, self.white));
        self.black = black;
        self.white = white;
        Ok(())
    }

    /// The undo snapshots, oldest first. Exposed for persistence.
    pub fn undo_log(&self) -> &[(Bitboard, Bitboard)] {
        &self.undo_log
    }

    /// The redo snapshots, oldest first. Exposed for persistence.
    pub fn redo_log(&self) -> &[(Bitboard, Bitboard)] {
        &self.redo_log
    }

    /// Restore a saved game: board pair, side to move, and both history
    /// stacks. Pass counters and the cached result label are reset.
    pub fn load(
        &mut self,
        black: Bitboard,
        white: Bitboard,
        turn: Player,
        undo_log: Vec<(Bitboard, Bitboard)>,
        redo_log: Vec<(Bitboard, Bitboard)>,
    ) {
        self.black = black;
        self.white = white;
        self.turn = turn;
        self.consecutive_passes = [0, 0];
        self.result = GameResult::InProgress;
        self.undo_log = undo_log;
        self.redo_log = redo_log;
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let black = u64::from(self.black);
        let white = u64::from(self.white);
        utils::format_grid(
            SQUARE_BITS.iter().map(|&bit| {
                if black & bit != 0 {
                    '#'
                } else if white & bit != 0 {
                    'O'
                } else {
                    '.'
                }
            }),
            f,
        )
    }
}
