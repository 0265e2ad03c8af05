use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;

use trivia_protocol::CategoryDetail;

use crate::*;

/// A named column of clues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub title: String,
    pub clues: Vec<Clue>,
}

/// Maps the service record into the display model; every clue starts hidden.
impl From<CategoryDetail> for Category {
    fn from(detail: CategoryDetail) -> Self {
        let clues = detail
            .clues
            .into_iter()
            .map(|raw| {
                Clue::new(
                    raw.question.unwrap_or_default(),
                    raw.answer.unwrap_or_default(),
                )
            })
            .collect();
        Self {
            title: detail.title,
            clues,
        }
    }
}

/// The categories of one round, trimmed to a full rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    categories: Vec<Category>,
    clues_per_category: u8,
}

impl Board {
    pub fn from_categories(categories: Vec<Category>, config: &BoardConfig) -> Result<Self> {
        let needed = usize::from(config.categories);
        if categories.len() != needed {
            return Err(TriviaError::WrongCategoryCount {
                found: categories.len(),
                needed,
            });
        }

        let clue_count = usize::from(config.clues_per_category);
        let mut trimmed = Vec::with_capacity(needed);
        for mut category in categories {
            if category.clues.len() < clue_count {
                return Err(TriviaError::ShortCategory {
                    found: category.clues.len(),
                    needed: clue_count,
                    title: category.title,
                });
            }
            category.clues.truncate(clue_count);
            trimmed.push(category);
        }

        Ok(Self {
            categories: trimmed,
            clues_per_category: config.clues_per_category,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_count(&self) -> u8 {
        // from_categories caps the length at a u8 config value
        self.categories.len() as u8
    }

    pub fn clues_per_category(&self) -> u8 {
        self.clues_per_category
    }

    pub fn validate_coords(&self, coord: CellCoord) -> Result<CellCoord> {
        if coord.category < self.category_count() && coord.clue < self.clues_per_category {
            Ok(coord)
        } else {
            Err(TriviaError::InvalidCoords)
        }
    }

    pub fn clue_at(&self, coord: CellCoord) -> Result<&Clue> {
        let coord = self.validate_coords(coord)?;
        Ok(&self[coord])
    }

    /// Advances the clue at `coord` one reveal step.
    pub fn reveal(&mut self, coord: CellCoord) -> Result<RevealOutcome> {
        let coord = self.validate_coords(coord)?;
        let clue = &mut self.categories[usize::from(coord.category)].clues[usize::from(coord.clue)];
        let outcome = clue.advance();
        log::trace!("reveal {}: {:?}", coord, outcome);
        Ok(outcome)
    }

    /// Coordinates in table order: one row per clue index, categories left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellCoord>> {
        let categories = self.category_count();
        (0..self.clues_per_category)
            .map(move |clue| (0..categories).map(move |category| CellCoord { category, clue }))
    }

    pub fn is_fully_answered(&self) -> bool {
        self.categories
            .iter()
            .flat_map(|category| category.clues.iter())
            .all(|clue| clue.reveal_state().is_terminal())
    }
}

impl Index<CellCoord> for Board {
    type Output = Clue;

    fn index(&self, coord: CellCoord) -> &Self::Output {
        &self.categories[usize::from(coord.category)].clues[usize::from(coord.clue)]
    }
}
