//! Train/test partitioning
//!
//! The held-out size is `ceil(test_fraction * n)` and the train subset gets
//! the rest. Both subsets come out in permutation order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::errors::{PrepError, PrepResult};

/// Train and test subsets of one collection
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

/// (train, test) sizes for `total` samples
pub fn split_sizes(total: usize, test_fraction: f64) -> PrepResult<(usize, usize)> {
    let test = (test_fraction * total as f64).ceil() as usize;
    let test = test.min(total);
    let train = total - test;
    if train == 0 {
        return Err(PrepError::EmptySplit { total, test });
    }
    Ok((train, test))
}

/// Partition `items` with a permutation drawn from `seed`
pub fn train_test_split<T>(items: Vec<T>, test_fraction: f64, seed: u64) -> PrepResult<TrainTestSplit<T>> {
    let total = items.len();
    let (_, n_test) = split_sizes(total, test_fraction)?;

    let mut order: Vec<usize> = (0..total).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let test = order[..n_test].iter().filter_map(|&i| slots[i].take()).collect();
    let train = order[n_test..].iter().filter_map(|&i| slots[i].take()).collect();

    Ok(TrainTestSplit { train, test })
}

/// Shuffle in place, from `seed` when given, otherwise from entropy
pub fn shuffle_in_place<T>(items: &mut [T], seed: Option<u64>) {
    match seed {
        Some(seed) => items.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => items.shuffle(&mut thread_rng()),
    }
}
