use alloc::string::String;
use alloc::vec::Vec;
use thiserror::Error;

use crate::CategoryId;

/// A single category that could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryFailure {
    pub id: CategoryId,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriviaError {
    #[error("Trivia service request failed: {0}")]
    Source(String),
    #[error("No usable category batch after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("Failed to load {} categories", .0.len())]
    CategoryLoad(Vec<CategoryFailure>),
    #[error("Category {title:?} has {found} clues, {needed} needed")]
    ShortCategory {
        title: String,
        found: usize,
        needed: usize,
    },
    #[error("Got {found} categories, {needed} needed")]
    WrongCategoryCount { found: usize, needed: usize },
    #[error("Invalid coordinates")]
    InvalidCoords,
}

impl TriviaError {
    /// Whether a fresh round may fix this error.
    pub const fn is_bad_data(&self) -> bool {
        matches!(self, Self::ShortCategory { .. })
    }
}

pub type Result<T> = core::result::Result<T, TriviaError>;
