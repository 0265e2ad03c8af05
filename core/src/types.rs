use core::fmt;
use core::str::FromStr;

use crate::{Result, TriviaError};

pub use trivia_protocol::CategoryId;

/// Position of a clue: column (category) and row (clue) on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub category: u8,
    pub clue: u8,
}

impl CellCoord {
    pub const fn new(category: u8, clue: u8) -> Self {
        Self { category, clue }
    }
}

/// Renders the cell identifier used in the table, `"{category}-{clue}"`.
impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.clue)
    }
}

impl FromStr for CellCoord {
    type Err = TriviaError;

    fn from_str(s: &str) -> Result<Self> {
        let (category, clue) = s.split_once('-').ok_or(TriviaError::InvalidCoords)?;
        let category = category.parse().map_err(|_| TriviaError::InvalidCoords)?;
        let clue = clue.parse().map_err(|_| TriviaError::InvalidCoords)?;
        Ok(Self { category, clue })
    }
}
