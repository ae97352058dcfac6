//! Train/test partitioning of an object's scans.

use rand::Rng;
use rand::seq::SliceRandom;

/// Share of scans that go to the training subset, in percent.
pub const DEFAULT_TRAIN_PERCENT: u32 = 80;

/// Disjoint train and test subsets of one object's scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAssignment<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

impl<T> SplitAssignment<T> {
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }
}

/// Index at which a shuffled list of `total` items is cut: `floor(total * percent / 100)`.
pub fn split_index(total: usize, train_percent: u32) -> usize {
    total * train_percent.min(100) as usize / 100
}

/// Shuffle `items` uniformly, then cut at [`split_index`].
///
/// The prefix becomes `train` and the suffix `test`. Empty input gives two
/// empty lists; a single item always lands in `test` at the default ratio.
pub fn partition<T, R: Rng + ?Sized>(mut items: Vec<T>, train_percent: u32, rng: &mut R) -> SplitAssignment<T> {
    items.shuffle(rng);
    let cut = split_index(items.len(), train_percent);
    let test = items.split_off(cut);
    SplitAssignment { train: items, test }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_partition_sizes_and_disjointness() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in 0..30usize {
            let items: Vec<usize> = (0..n).collect();
            let split = partition(items, DEFAULT_TRAIN_PERCENT, &mut rng);

            assert_eq!(split.train.len(), n * 8 / 10);
            assert_eq!(split.len(), n);

            let train: HashSet<_> = split.train.iter().copied().collect();
            let test: HashSet<_> = split.test.iter().copied().collect();
            assert!(train.is_disjoint(&test));
            let all: HashSet<_> = train.union(&test).copied().collect();
            assert_eq!(all, (0..n).collect::<HashSet<_>>());
        }
    }

    #[test]
    fn test_partition_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let split = partition(Vec::<String>::new(), DEFAULT_TRAIN_PERCENT, &mut rng);
        assert!(split.is_empty());
    }

    #[test]
    fn test_partition_single_item_goes_to_test() {
        let mut rng = StdRng::seed_from_u64(0);
        let split = partition(vec!["only"], DEFAULT_TRAIN_PERCENT, &mut rng);
        assert!(split.train.is_empty());
        assert_eq!(split.test, vec!["only"]);
    }

    #[test]
    fn test_partition_is_seed_deterministic() {
        let items: Vec<u32> = (0..50).collect();
        let a = partition(items.clone(), 80, &mut StdRng::seed_from_u64(9));
        let b = partition(items, 80, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_index_integer_arithmetic() {
        assert_eq!(split_index(5, 80), 4);
        assert_eq!(split_index(10, 80), 8);
        assert_eq!(split_index(1, 80), 0);
        assert_eq!(split_index(7, 100), 7);
        assert_eq!(split_index(7, 0), 0);
    }
}
