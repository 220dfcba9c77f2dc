//! Miscellaneous project utilities.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};

/// Format 64 characters into a labeled board grid.
/// `pieces` must yield exactly 64 items.
pub fn format_grid<T: Iterator<Item = char>>(mut pieces: T, f: &mut Formatter) -> fmt::Result {
    f.write_str("   A B C D E F G H")?;

    for row in 0..EDGE_LENGTH {
        write!(f, "\n {} ", row + 1)?;
        for _ in 0..EDGE_LENGTH {
            match pieces.next() {
                Some(piece) => write!(f, "{} ", piece)?,
                None => return Err(fmt::Error),
            }
        }
    }

    if pieces.next().is_some() {
        return Err(fmt::Error);
    }
    Ok(())
}
