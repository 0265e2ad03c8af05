#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub use board::*;
pub use clue::*;
pub use error::*;
pub use fetch::*;
pub use source::*;
pub use types::*;

mod board;
mod clue;
mod error;
mod fetch;
mod source;
mod types;

/// Shape of a board plus the knobs of the fetch loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub categories: u8,
    pub clues_per_category: u8,
    /// Upper bound on rejected batches (and on refetched rounds) before giving up.
    pub max_attempts: u32,
    /// Listing offsets are drawn from `0..category_offset_max`.
    pub category_offset_max: u32,
    /// Clue offsets are drawn from `0..=clue_offset_max`.
    pub clue_offset_max: u32,
}

impl BoardConfig {
    pub const CATEGORIES: u8 = 6;
    pub const CLUES_PER_CATEGORY: u8 = 5;
    pub const MAX_ATTEMPTS: u32 = 5;
    pub const CATEGORY_OFFSET_MAX: u32 = 100;

    pub const fn new_unchecked(categories: u8, clues_per_category: u8, max_attempts: u32) -> Self {
        Self {
            categories,
            clues_per_category,
            max_attempts,
            category_offset_max: Self::CATEGORY_OFFSET_MAX,
            clue_offset_max: 0,
        }
    }

    pub fn new(categories: u8, clues_per_category: u8, max_attempts: u32) -> Self {
        Self::new_unchecked(
            categories.max(1),
            clues_per_category.max(1),
            max_attempts.max(1),
        )
    }

    pub const fn with_offsets(self, category_offset_max: u32, clue_offset_max: u32) -> Self {
        Self {
            category_offset_max,
            clue_offset_max,
            ..self
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(
            Self::CATEGORIES,
            Self::CLUES_PER_CATEGORY,
            Self::MAX_ATTEMPTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_six_by_five() {
        let config = BoardConfig::default();

        assert_eq!(config.categories, 6);
        assert_eq!(config.clues_per_category, 5);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.category_offset_max, 100);
    }

    #[test]
    fn new_clamps_degenerate_values() {
        let config = BoardConfig::new(0, 0, 0);

        assert_eq!(config.categories, 1);
        assert_eq!(config.clues_per_category, 1);
        assert_eq!(config.max_attempts, 1);
    }
}
