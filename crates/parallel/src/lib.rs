//! Parallel/sequential execution helpers.
//!
//! The pipeline fans out in two places: scoring raw documents and running
//! the per-symbol feature/evaluation chain. Both go through this crate, so
//! the `cfg` logic for the `parallel` feature lives in ONE place and call
//! sites stay clean.
//!
//! # Runtime Override
//!
//! Every helper takes a `force_sequential` parameter. When `true`,
//! execution is sequential even with the `parallel` feature enabled, which
//! keeps profiling comparisons and deterministic test runs a flag away
//! instead of a rebuild away.
//!
//! # Example
//!
//! ```ignore
//! // Instead of:
//! // #[cfg(feature = "parallel")]
//! // let scored: Vec<_> = docs.par_iter().map(score).collect();
//! // #[cfg(not(feature = "parallel"))]
//! // let scored: Vec<_> = docs.iter().map(score).collect();
//!
//! // Just write:
//! let scored = parallel::map_slice(&docs, score, false);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map a function over a slice, potentially in parallel.
///
/// Returns a Vec of results in the same order as input (parallel preserves
/// order).
///
/// # Parameters
/// - `force_sequential`: When true, forces sequential execution even if parallel feature is enabled
#[inline]
pub fn map_slice<T, F, R>(slice: &[T], f: F, force_sequential: bool) -> Vec<R>
where
    T: Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            slice.iter().map(f).collect()
        } else {
            slice.par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        slice.iter().map(f).collect()
    }
}

/// Map over a Vec, consuming it, potentially in parallel.
///
/// The per-symbol stage takes its job list by value; each job moves into
/// exactly one closure call, so results line up with input order without
/// cloning the bars.
///
/// # Parameters
/// - `force_sequential`: When true, forces sequential execution even if parallel feature is enabled
#[inline]
pub fn map_vec<T, F, R>(vec: Vec<T>, f: F, force_sequential: bool) -> Vec<R>
where
    T: Send,
    F: Fn(T) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            vec.into_iter().map(f).collect()
        } else {
            vec.into_par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        vec.into_iter().map(f).collect()
    }
}
