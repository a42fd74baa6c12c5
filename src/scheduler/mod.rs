//! Schedule search and search statistics.
//!
//! Provides the brute-force enumerator that turns a catalog and a subject
//! count into a lazy stream of conflict-free schedules.
//!
//! # Algorithm
//!
//! `Scheduler` walks every k-subset of the catalog and, for each subset,
//! every combination of one group per subject. Each combination is
//! validated pairwise and kept only if no two groups overlap. Nothing is
//! pruned early, so the candidate count is known up front.
//!
//! # Statistics
//!
//! `SearchStats` tracks subsets, candidates, accepted schedules and
//! rejected conflicts while the iterator is being consumed.

mod search;
mod stats;

pub use search::{enumerate_schedules, Scheduler, Schedules};
pub use stats::{candidate_count, SearchStats};
