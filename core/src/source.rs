use alloc::vec::Vec;
use rand::prelude::*;
use trivia_protocol::{CategoryDetail, CategorySummary};

use crate::*;

/// Read access to the remote trivia service.
///
/// Implementations map transport and decoding failures into
/// [`TriviaError::Source`].
#[allow(async_fn_in_trait)]
pub trait TriviaSource {
    async fn list_categories(&self, count: u32, offset: u32) -> Result<Vec<CategorySummary>>;

    async fn get_category(&self, id: CategoryId, offset: u32) -> Result<CategoryDetail>;
}

/// Seeded source of the random request offsets used to sample the service.
#[derive(Clone, Debug)]
pub struct OffsetSampler {
    rng: SmallRng,
}

impl OffsetSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Offset in `0..max`, or 0 when `max` is 0.
    pub fn below(&mut self, max: u32) -> u32 {
        if max == 0 {
            0
        } else {
            self.rng.random_range(0..max)
        }
    }

    /// Offset in `0..=max`.
    pub fn up_to(&mut self, max: u32) -> u32 {
        self.rng.random_range(0..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_in_range() {
        let mut offsets = OffsetSampler::new(7);

        for _ in 0..200 {
            assert!(offsets.below(100) < 100);
            assert!(offsets.up_to(3) <= 3);
        }
        assert_eq!(offsets.below(0), 0);
        assert_eq!(offsets.up_to(0), 0);
    }

    #[test]
    fn same_seed_gives_same_offsets() {
        let mut a = OffsetSampler::new(42);
        let mut b = OffsetSampler::new(42);

        for _ in 0..20 {
            assert_eq!(a.below(100), b.below(100));
        }
    }
}
