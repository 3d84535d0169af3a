//! Time-respecting fold geometry.

use std::ops::Range;

/// One train/test partition over row indices.
///
/// `train` is always a prefix starting at 0 and `test` begins exactly where
/// `train` ends, so train strictly precedes test in time and the two never
/// overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Range<usize>,
    pub test: Range<usize>,
}

/// Expanding-window folds over `n_samples` ordered rows.
///
/// Every test block spans `n_samples / (n_splits + 1)` rows; the division
/// remainder enlarges the first train prefix rather than being discarded.
/// Returns `None` when `n_samples < n_splits + 1` (some test block would be
/// empty) or `n_splits` is zero.
pub fn walk_forward_folds(n_samples: usize, n_splits: usize) -> Option<Vec<Fold>> {
    if n_splits == 0 || n_samples < n_splits + 1 {
        return None;
    }
    let test_size = n_samples / (n_splits + 1);
    let first_test = n_samples - n_splits * test_size;
    Some(
        (0..n_splits)
            .map(|i| {
                let test_start = first_test + i * test_size;
                Fold { train: 0..test_start, test: test_start..test_start + test_size }
            })
            .collect(),
    )
}
