//! Search statistics and candidate counting.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Subsets examined | Subject subsets of size k visited so far |
//! | Candidates examined | Group tuples validated so far |
//! | Schedules found | Candidates that passed pairwise validation |
//! | Conflicts rejected | Candidates discarded for overlapping groups |
//!
//! A fully drained search satisfies
//! `candidates_examined == candidate_count(catalog, k)` and
//! `candidates_examined == schedules_found + conflicts_rejected`.

use serde::Serialize;

use crate::models::Subject;

/// Counters kept by a running search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Subject subsets visited.
    pub subsets_examined: u64,
    /// Group tuples validated.
    pub candidates_examined: u64,
    /// Valid schedules yielded.
    pub schedules_found: u64,
    /// Tuples discarded because two groups overlap.
    pub conflicts_rejected: u64,
}

impl SearchStats {
    /// Fraction of examined candidates that were valid (0.0..1.0).
    ///
    /// Returns `None` before any candidate has been examined.
    pub fn acceptance_rate(&self) -> Option<f64> {
        if self.candidates_examined == 0 {
            return None;
        }
        Some(self.schedules_found as f64 / self.candidates_examined as f64)
    }
}

/// Number of group tuples a full search over `catalog` examines for `k`
/// subjects: the sum, over every k-subset, of the product of its
/// subjects' group counts. Saturates at `u128::MAX`.
///
/// `k == 0` counts the single empty tuple; `k > catalog.len()` counts zero.
pub fn candidate_count(catalog: &[Subject], k: usize) -> u128 {
    let counts: Vec<u128> = catalog.iter().map(|s| s.group_count() as u128).collect();
    let n = counts.len();
    if k > n {
        return 0;
    }

    // ways[j] = sum over j-subsets of the first i subjects of their product.
    let mut ways = vec![0u128; k + 1];
    ways[0] = 1;
    for count in counts {
        for j in (1..=k).rev() {
            ways[j] = ways[j].saturating_add(ways[j - 1].saturating_mul(count));
        }
    }
    ways[k]
}
