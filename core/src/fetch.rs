use alloc::string::{String, ToString};
use alloc::vec::Vec;
use futures_util::future::join_all;
use hashbrown::HashSet;
use thiserror::Error;
use trivia_protocol::CategorySummary;
use web_time::Instant;

use crate::*;

/// Why a category batch was thrown away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchRejection {
    #[error("only {found} categories, {needed} needed")]
    TooFew { found: usize, needed: usize },
    #[error("category {id} has a single-letter title {title:?}")]
    SingleLetterTitle { id: CategoryId, title: String },
    #[error("category {id} only has {clues_count} clues")]
    TooFewClues { id: CategoryId, clues_count: u32 },
    #[error("category {id} appears twice")]
    DuplicateId { id: CategoryId },
}

/// Validates a listing and returns the ids of its first `config.categories` entries.
pub fn check_batch(
    batch: &[CategorySummary],
    config: &BoardConfig,
) -> core::result::Result<Vec<CategoryId>, BatchRejection> {
    let needed = usize::from(config.categories);
    if batch.len() < needed {
        return Err(BatchRejection::TooFew {
            found: batch.len(),
            needed,
        });
    }

    let mut seen = HashSet::with_capacity(needed);
    for summary in &batch[..needed] {
        // single-character categories come back from the service without clues
        if summary.title.chars().count() == 1 {
            return Err(BatchRejection::SingleLetterTitle {
                id: summary.id,
                title: summary.title.clone(),
            });
        }
        if let Some(clues_count) = summary.clues_count {
            if clues_count < u32::from(config.clues_per_category) {
                return Err(BatchRejection::TooFewClues {
                    id: summary.id,
                    clues_count,
                });
            }
        }
        if !seen.insert(summary.id) {
            return Err(BatchRejection::DuplicateId { id: summary.id });
        }
    }

    Ok(batch[..needed].iter().map(|summary| summary.id).collect())
}

/// Picks `config.categories` random category ids, refetching rejected batches.
pub async fn fetch_category_ids<S: TriviaSource + ?Sized>(
    source: &S,
    config: &BoardConfig,
    offsets: &mut OffsetSampler,
) -> Result<Vec<CategoryId>> {
    let count = u32::from(config.categories);

    for attempt in 1..=config.max_attempts {
        let offset = offsets.below(config.category_offset_max);
        let batch = source.list_categories(count, offset).await?;

        match check_batch(&batch, config) {
            Ok(ids) => {
                log::debug!("category ids at offset {}: {:?}", offset, ids);
                return Ok(ids);
            }
            Err(rejection) => {
                log::warn!(
                    "discarding category batch at offset {} (attempt {}/{}): {}",
                    offset,
                    attempt,
                    config.max_attempts,
                    rejection
                );
            }
        }
    }

    Err(TriviaError::RetriesExhausted {
        attempts: config.max_attempts,
    })
}

pub async fn load_category<S: TriviaSource + ?Sized>(
    source: &S,
    id: CategoryId,
    offset: u32,
) -> Result<Category> {
    let category = Category::from(source.get_category(id, offset).await?);
    log::debug!(
        "category {} {:?}: {} clues",
        id,
        category.title,
        category.clues.len()
    );
    Ok(category)
}

/// Loads every category concurrently, keeping `ids` order.
pub async fn load_categories<S: TriviaSource + ?Sized>(
    source: &S,
    ids: &[CategoryId],
    config: &BoardConfig,
    offsets: &mut OffsetSampler,
) -> Result<Vec<Category>> {
    let loads = ids.iter().map(|&id| {
        let offset = offsets.up_to(config.clue_offset_max);
        async move { (id, load_category(source, id, offset).await) }
    });

    let mut categories = Vec::with_capacity(ids.len());
    let mut failures = Vec::new();
    for (id, result) in join_all(loads).await {
        match result {
            Ok(category) => categories.push(category),
            Err(err) => failures.push(CategoryFailure {
                id,
                message: err.to_string(),
            }),
        }
    }

    if failures.is_empty() {
        Ok(categories)
    } else {
        for failure in &failures {
            log::error!("category {} failed: {}", failure.id, failure.message);
        }
        Err(TriviaError::CategoryLoad(failures))
    }
}

/// Fetches, loads and assembles a whole round.
///
/// A round whose data turns out unusable is started over, at most
/// `config.max_attempts` times.
pub async fn load_board<S: TriviaSource + ?Sized>(
    source: &S,
    config: &BoardConfig,
    seed: u64,
) -> Result<Board> {
    let started_at = Instant::now();
    let mut offsets = OffsetSampler::new(seed);

    for round in 1..=config.max_attempts {
        let ids = fetch_category_ids(source, config, &mut offsets).await?;
        let categories = load_categories(source, &ids, config, &mut offsets).await?;

        match Board::from_categories(categories, config) {
            Ok(board) => {
                log::info!("board loaded in {:?}", started_at.elapsed());
                return Ok(board);
            }
            Err(err) if err.is_bad_data() => {
                log::warn!(
                    "discarding round (attempt {}/{}): {}",
                    round,
                    config.max_attempts,
                    err
                );
            }
            Err(err) => return Err(err),
        }
    }

    Err(TriviaError::RetriesExhausted {
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, VecDeque};
    use trivia_protocol::{CategoryDetail, RawClue};

    #[derive(Default)]
    struct FakeSource {
        batches: RefCell<VecDeque<Vec<CategorySummary>>>,
        categories: BTreeMap<CategoryId, CategoryDetail>,
        list_calls: Cell<u32>,
        category_calls: Cell<u32>,
    }

    impl FakeSource {
        fn with_batches(batches: impl IntoIterator<Item = Vec<CategorySummary>>) -> Self {
            Self {
                batches: RefCell::new(batches.into_iter().collect()),
                ..Default::default()
            }
        }

        fn category(mut self, id: CategoryId, clues: usize) -> Self {
            self.categories.insert(id, detail(id, clues));
            self
        }
    }

    impl TriviaSource for FakeSource {
        async fn list_categories(&self, count: u32, _offset: u32) -> Result<Vec<CategorySummary>> {
            assert_eq!(count, 6);
            self.list_calls.set(self.list_calls.get() + 1);
            self.batches
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| TriviaError::Source("connection refused".into()))
        }

        async fn get_category(&self, id: CategoryId, _offset: u32) -> Result<CategoryDetail> {
            self.category_calls.set(self.category_calls.get() + 1);
            self.categories
                .get(&id)
                .cloned()
                .ok_or_else(|| TriviaError::Source(format!("404 for category {id}")))
        }
    }

    fn summary(id: CategoryId, title: &str) -> CategorySummary {
        CategorySummary {
            id,
            title: title.into(),
            clues_count: None,
        }
    }

    fn batch(ids: impl IntoIterator<Item = CategoryId>) -> Vec<CategorySummary> {
        ids.into_iter()
            .map(|id| summary(id, &format!("category {id}")))
            .collect()
    }

    fn detail(id: CategoryId, clues: usize) -> CategoryDetail {
        CategoryDetail {
            id,
            title: format!("category {id}"),
            clues_count: Some(clues as u32),
            clues: (0..clues)
                .map(|i| RawClue {
                    id: Some(i as u64),
                    question: Some(format!("q{id}.{i}")),
                    answer: Some(format!("a{id}.{i}")),
                    value: Some(200),
                })
                .collect(),
        }
    }

    fn config() -> BoardConfig {
        BoardConfig::default()
    }

    #[test]
    fn good_batch_yields_ids_in_order() {
        let source = FakeSource::with_batches([batch([6, 5, 4, 3, 2, 1])]);

        let ids = block_on(fetch_category_ids(&source, &config(), &mut OffsetSampler::new(0)));

        assert_eq!(ids, Ok(vec![6, 5, 4, 3, 2, 1]));
        assert_eq!(source.list_calls.get(), 1);
    }

    #[test]
    fn single_letter_batch_is_discarded_and_refetched() {
        let mut bad = batch(1..=6);
        bad[3].title = "Q".into();
        let source = FakeSource::with_batches([bad, batch(11..=16)]);

        let ids = block_on(fetch_category_ids(&source, &config(), &mut OffsetSampler::new(0)));

        assert_eq!(ids, Ok((11..=16).collect::<Vec<_>>()));
        assert_eq!(source.list_calls.get(), 2);
    }

    #[test]
    fn rejected_batches_stop_after_max_attempts() {
        let bad = || {
            let mut bad = batch(1..=6);
            bad[0].title = "X".into();
            bad
        };
        let source = FakeSource::with_batches([bad(), bad(), bad(), batch(11..=16)]);
        let config = BoardConfig::new(6, 5, 3);

        let ids = block_on(fetch_category_ids(&source, &config, &mut OffsetSampler::new(0)));

        assert_eq!(ids, Err(TriviaError::RetriesExhausted { attempts: 3 }));
        assert_eq!(source.list_calls.get(), 3);
    }

    #[test]
    fn source_errors_propagate_without_retry() {
        let source = FakeSource::default();

        let ids = block_on(fetch_category_ids(&source, &config(), &mut OffsetSampler::new(0)));

        assert!(matches!(ids, Err(TriviaError::Source(_))));
        assert_eq!(source.list_calls.get(), 1);
    }

    #[test]
    fn check_batch_rejections() {
        let config = config();

        assert_eq!(
            check_batch(&batch(1..=4), &config),
            Err(BatchRejection::TooFew {
                found: 4,
                needed: 6
            })
        );

        let mut single = batch(1..=6);
        single[5].title = "é".into();
        assert!(matches!(
            check_batch(&single, &config),
            Err(BatchRejection::SingleLetterTitle { id: 6, .. })
        ));

        let mut thin = batch(1..=6);
        thin[2].clues_count = Some(4);
        assert_eq!(
            check_batch(&thin, &config),
            Err(BatchRejection::TooFewClues {
                id: 3,
                clues_count: 4
            })
        );

        let duplicated = batch([1, 2, 3, 2, 5, 6]);
        assert_eq!(
            check_batch(&duplicated, &config),
            Err(BatchRejection::DuplicateId { id: 2 })
        );
    }

    #[test]
    fn check_batch_accepts_two_letter_titles_and_ignores_extra_entries() {
        let mut entries = batch(1..=8);
        entries[0].title = "TV".into();
        entries[1].clues_count = Some(5);
        entries[7].title = "Z".into();

        assert_eq!(check_batch(&entries, &config()), Ok(vec![1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn load_categories_keeps_order_and_maps_clues() {
        let source = FakeSource::default().category(1, 5).category(2, 0);

        let categories = block_on(load_categories(
            &source,
            &[2, 1],
            &config(),
            &mut OffsetSampler::new(0),
        ))
        .unwrap();

        assert_eq!(categories[0].title, "category 2");
        assert!(categories[0].clues.is_empty());
        assert_eq!(categories[1].clues[4], Clue::new("q1.4", "a1.4"));
    }

    #[test]
    fn load_categories_aggregates_every_failure() {
        let source = FakeSource::default().category(1, 5).category(2, 5);

        let result = block_on(load_categories(
            &source,
            &[1, 99, 2, 98],
            &config(),
            &mut OffsetSampler::new(0),
        ));

        let Err(TriviaError::CategoryLoad(failures)) = result else {
            panic!("expected aggregated failure, got {result:?}");
        };
        let failed: Vec<_> = failures.iter().map(|f| f.id).collect();
        assert_eq!(failed, vec![99, 98]);
        assert!(failures[0].message.contains("404"));
        assert_eq!(source.category_calls.get(), 4);
    }

    #[test]
    fn load_board_builds_full_hidden_board() {
        let source = (1..=6).fold(FakeSource::with_batches([batch(1..=6)]), |source, id| {
            source.category(id, 7)
        });

        let board = block_on(load_board(&source, &config(), 1)).unwrap();

        assert_eq!(board.category_count(), 6);
        assert!(board.categories().iter().all(|c| c.clues.len() == 5));
        assert!(
            board
                .rows()
                .flatten()
                .all(|coord| board[coord].reveal_state() == RevealState::Hidden)
        );
        assert_eq!(board.categories()[0].title, "category 1");
    }

    #[test]
    fn load_board_refetches_round_with_short_category() {
        let source = (1..=6)
            .chain(11..=16)
            .fold(
                FakeSource::with_batches([batch(1..=6), batch(11..=16)]),
                |source, id| source.category(id, 5),
            )
            .category(4, 2);

        let board = block_on(load_board(&source, &config(), 1)).unwrap();

        assert_eq!(board.categories()[0].title, "category 11");
        assert_eq!(source.list_calls.get(), 2);
    }

    #[test]
    fn load_board_gives_up_after_max_rounds() {
        let source = FakeSource::with_batches([batch(1..=6), batch(1..=6), batch(1..=6)])
            .category(1, 1)
            .category(2, 5)
            .category(3, 5)
            .category(4, 5)
            .category(5, 5)
            .category(6, 5);
        let config = BoardConfig::new(6, 5, 2);

        let result = block_on(load_board(&source, &config, 1));

        assert_eq!(result, Err(TriviaError::RetriesExhausted { attempts: 2 }));
        assert_eq!(source.list_calls.get(), 2);
    }

    #[test]
    fn load_board_surfaces_category_failures() {
        let source = FakeSource::with_batches([batch(1..=6)]).category(1, 5);

        let result = block_on(load_board(&source, &config(), 1));

        assert!(matches!(result, Err(TriviaError::CategoryLoad(ref f)) if f.len() == 5));
        assert_eq!(source.list_calls.get(), 1);
    }
}
