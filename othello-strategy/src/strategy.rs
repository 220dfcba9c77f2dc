//! Pluggable opponents.
//!
//! Everything that can pick a move implements [`Strategy`], so the game
//! loop only ever sees the trait: a stdin-driven human adapter, the
//! one-ply greedy heuristics, and the minimax searcher are interchangeable.

use crate::search;
use arrayvec::ArrayVec;
use othello_core::{moves, Game, Player};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// A move selector for the side to move in a [`Game`].
pub trait Strategy {
    /// Choose a destination square (row-major index) for the side to move.
    /// Returns `None` when that side has no legal destination.
    fn choose(&mut self, game: &Game) -> Option<u8>;
}

/// Look up a strategy by its configuration name.
pub fn by_name(name: &str) -> Option<Box<dyn Strategy>> {
    match name {
        "human" => Some(Box::new(Human)),
        "random" => Some(Box::new(Random::new())),
        "maximize" => Some(Box::new(Maximize::new())),
        "minimize" => Some(Box::new(Minimize::new())),
        "min-max short" => Some(Box::new(Minimax::short())),
        "min-max" => Some(Box::new(Minimax::standard())),
        "min-max long" => Some(Box::new(Minimax::long())),
        _ => None,
    }
}

/// Assign the designated player side by coin flip.
pub fn random_side<R: Rng>(rng: &mut R) -> Player {
    if rng.gen::<bool>() {
        Player::Black
    } else {
        Player::White
    }
}

const MAX_DESTINATIONS: usize = 64;

fn candidate_indices(game: &Game) -> ArrayVec<[u8; MAX_DESTINATIONS]> {
    game.legal_destinations(game.turn())
        .map(|loc| loc.to_index())
        .collect()
}

/// Plays a uniformly random legal destination.
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Random {
    fn choose(&mut self, game: &Game) -> Option<u8> {
        candidate_indices(game).choose(&mut self.rng).copied()
    }
}

/// One-ply greedy: keeps the moves leaving it the most disks and picks
/// among those at random.
pub struct Maximize {
    rng: StdRng,
}

impl Maximize {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for Maximize {
    fn choose(&mut self, game: &Game) -> Option<u8> {
        let (mover, opponent) = game.boards_for(game.turn());
        let mut best_count = 0u32;
        let mut best: ArrayVec<[u8; MAX_DESTINATIONS]> = ArrayVec::new();

        for loc in game.legal_destinations(game.turn()) {
            let (next_mover, _) = moves::apply_move(mover, opponent, loc.to_bit());
            let count = next_mover.count_occupied();
            if count > best_count {
                best_count = count;
                best.clear();
            }
            if count == best_count {
                best.push(loc.to_index());
            }
        }

        best.choose(&mut self.rng).copied()
    }
}

/// One-ply greedy in reverse: keeps the moves leaving it the fewest disks.
pub struct Minimize {
    rng: StdRng,
}

impl Minimize {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for Minimize {
    fn choose(&mut self, game: &Game) -> Option<u8> {
        let (mover, opponent) = game.boards_for(game.turn());
        let mut best_count = u32::MAX;
        let mut best: ArrayVec<[u8; MAX_DESTINATIONS]> = ArrayVec::new();

        for loc in game.legal_destinations(game.turn()) {
            let (next_mover, _) = moves::apply_move(mover, opponent, loc.to_bit());
            let count = next_mover.count_occupied();
            if count < best_count {
                best_count = count;
                best.clear();
            }
            if count == best_count {
                best.push(loc.to_index());
            }
        }

        best.choose(&mut self.rng).copied()
    }
}

/// The tree searcher from [`search`], at a fixed depth.
pub struct Minimax {
    depth: u8,
}

impl Minimax {
    pub fn new(depth: u8) -> Self {
        Self { depth }
    }

    /// Two plies: quick and weak.
    pub fn short() -> Self {
        Self::new(2)
    }

    /// Four plies: the default opponent.
    pub fn standard() -> Self {
        Self::new(4)
    }

    /// Six plies: slow but strong.
    pub fn long() -> Self {
        Self::new(6)
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Strategy for Minimax {
    fn choose(&mut self, game: &Game) -> Option<u8> {
        let (black, white) = game.boards();
        search::select_move(black, white, game.turn(), self.depth)
    }
}

/// Reads moves from stdin in board notation ("C4"), re-prompting until the
/// input parses to a legal destination.
pub struct Human;

impl Strategy for Human {
    fn choose(&mut self, game: &Game) -> Option<u8> {
        let destinations = game.legal_destinations(game.turn());
        if destinations.is_empty() {
            return None;
        }

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            println!("\n{}\n", game);
            print!("Enter a move for {}: ", game.turn());
            std::io::stdout().flush().ok()?;

            let line = lines.next()?.ok()?;
            match othello_core::Location::from_str(line.trim()) {
                Ok(loc) if destinations.contains(loc) => return Some(loc.to_index()),
                Ok(_) => println!("Illegal move. Legal moves: {}", destinations),
                Err(_) => println!("Cannot parse move."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_core::GameResult;

    #[test]
    fn lookup_by_name() {
        for name in &[
            "human",
            "random",
            "maximize",
            "minimize",
            "min-max short",
            "min-max",
            "min-max long",
        ] {
            assert!(by_name(name).is_some(), "missing strategy {:?}", name);
        }
        assert!(by_name("q-learning").is_none());
        assert!(by_name("").is_none());
    }

    #[test]
    fn random_plays_a_legal_destination() {
        let game = Game::default();
        let mut strategy = Random::with_seed(7);
        for _ in 0..10 {
            let index = strategy.choose(&game).unwrap();
            assert!([19, 26, 37, 44].contains(&index));
        }
    }

    #[test]
    fn maximize_takes_the_biggest_capture() {
        // Whatever maximize picks must match the best capture count among
        // white's replies.
        let mut game = Game::default();
        game.play(19).unwrap();

        let (mover, opponent) = game.boards_for(game.turn());
        let mut best_index = None;
        let mut best_count = 0;
        for loc in game.legal_destinations(game.turn()) {
            let (next_mover, _) = moves::apply_move(mover, opponent, loc.to_bit());
            if next_mover.count_occupied() > best_count {
                best_count = next_mover.count_occupied();
                best_index = Some(loc.to_index());
            }
        }

        let mut strategy = Maximize::with_seed(7);
        let chosen = strategy.choose(&game).unwrap();
        let (next_mover, _) = moves::apply_move(
            mover,
            opponent,
            othello_core::Location::from_index(chosen).to_bit(),
        );
        assert_eq!(next_mover.count_occupied(), best_count);
        assert!(best_index.is_some());
    }

    #[test]
    fn minimize_takes_the_smallest_capture() {
        let mut game = Game::default();
        game.play(19).unwrap();

        let (mover, opponent) = game.boards_for(game.turn());
        let mut least = u32::MAX;
        for loc in game.legal_destinations(game.turn()) {
            let (next_mover, _) = moves::apply_move(mover, opponent, loc.to_bit());
            least = least.min(next_mover.count_occupied());
        }

        let mut strategy = Minimize::with_seed(7);
        let chosen = strategy.choose(&game).unwrap();
        let (next_mover, _) = moves::apply_move(
            mover,
            opponent,
            othello_core::Location::from_index(chosen).to_bit(),
        );
        assert_eq!(next_mover.count_occupied(), least);
    }

    #[test]
    fn minimax_strategy_matches_the_searcher() {
        let game = Game::default();
        let mut strategy = Minimax::standard();
        let (black, white) = game.boards();
        assert_eq!(
            strategy.choose(&game),
            search::select_move(black, white, game.turn(), strategy.depth())
        );
    }

    #[test]
    fn strategies_return_none_without_moves() {
        use othello_core::bitboard::{Bitboard, SQUARE_BITS};
        let mut game = Game::default();
        game.load(
            Bitboard::from(SQUARE_BITS[0]),
            Bitboard::from(SQUARE_BITS[63]),
            Player::Black,
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(game.judge(Player::Black), GameResult::Draw);

        assert_eq!(Random::with_seed(1).choose(&game), None);
        assert_eq!(Maximize::with_seed(1).choose(&game), None);
        assert_eq!(Minimize::with_seed(1).choose(&game), None);
    }

    #[test]
    fn minimax_presets() {
        assert_eq!(Minimax::short().depth(), 2);
        assert_eq!(Minimax::standard().depth(), 4);
        assert_eq!(Minimax::long().depth(), 6);
    }

    #[test]
    fn minimax_drives_a_full_game() {
        // Two searchers play each other to the end without ever producing
        // an illegal move or an inconsistent board.
        let mut game = Game::default();
        let mut black = Minimax::short();
        let mut white = Minimax::short();

        while game.judge(Player::Black) == GameResult::InProgress {
            if !game.turn_playable() {
                game.pass_turn();
                continue;
            }
            let strategy: &mut dyn Strategy = match game.turn() {
                Player::Black => &mut black,
                Player::White => &mut white,
            };
            let index = strategy.choose(&game).unwrap();
            game.play(index).unwrap();

            let (black_board, white_board) = game.boards();
            assert!((black_board & white_board).is_empty());
        }
    }
}
