//! Brute-force schedule search.
//!
//! # Algorithm
//!
//! 1. Enumerate every k-subset of the catalog in lexicographic index order.
//! 2. For each subset, walk the cartesian product of the subjects' groups
//!    (sorted by id), rightmost subject fastest.
//! 3. Validate each tuple as a [`Schedule`]; yield it on success, discard
//!    it on a schedule conflict.
//!
//! Results are produced lazily. Dropping the iterator abandons the search.
//!
//! # Complexity
//! O(C(n, k) * g^k * k^2 * b^2) for n subjects, g groups per subject and
//! b blocks per group. There is no pruning: every tuple is built and then
//! validated in full.

use std::collections::HashSet;
use std::iter::FusedIterator;
use std::ops::ControlFlow;

use tracing::{debug, error, trace};

use super::stats::{candidate_count, SearchStats};
use crate::error::{Result, ScheduleError};
use crate::models::{Group, Schedule, Subject};

/// Schedule search over a borrowed catalog.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Group, Subject, TimeBlock, Weekday};
/// use u_timetable::scheduler::Scheduler;
///
/// let calc = Subject::new("Calculus").unwrap()
///     .with_group(Group::with_blocks(1, "Dr. Gauss",
///         [TimeBlock::parse(Weekday::Monday, "07:00", "09:00").unwrap()]).unwrap()).unwrap()
///     .with_group(Group::with_blocks(2, "Dra. Lagrange",
///         [TimeBlock::parse(Weekday::Tuesday, "07:00", "09:00").unwrap()]).unwrap()).unwrap();
/// let physics = Subject::new("Physics").unwrap()
///     .with_group(Group::with_blocks(1, "Dr. Einstein",
///         [TimeBlock::parse(Weekday::Monday, "09:00", "11:00").unwrap()]).unwrap()).unwrap();
/// let catalog = vec![calc, physics];
///
/// let scheduler = Scheduler::new(&catalog).unwrap();
/// assert_eq!(scheduler.schedules(2).count(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scheduler<'a> {
    catalog: &'a [Subject],
}

impl<'a> Scheduler<'a> {
    /// Creates a search over `catalog`.
    ///
    /// # Errors
    /// [`ScheduleError::DuplicateSubject`] if two subjects share a name
    /// (ignoring case). A subset holding both could never form a proper
    /// subject-to-group mapping.
    pub fn new(catalog: &'a [Subject]) -> Result<Self> {
        let mut seen = HashSet::with_capacity(catalog.len());
        for subject in catalog {
            if !seen.insert(subject.key()) {
                return Err(ScheduleError::DuplicateSubject(subject.name().to_string()));
            }
        }
        Ok(Self { catalog })
    }

    /// The catalog being searched.
    pub fn catalog(&self) -> &'a [Subject] {
        self.catalog
    }

    /// Lazily enumerates every valid schedule with exactly `k` subjects.
    ///
    /// `k == 0` yields one empty schedule; `k` larger than the catalog
    /// yields nothing.
    pub fn schedules(&self, k: usize) -> Schedules<'a> {
        Schedules::new(self.catalog, k)
    }

    /// Number of candidate tuples a full search for `k` subjects examines.
    pub fn candidate_count(&self, k: usize) -> u128 {
        candidate_count(self.catalog, k)
    }
}

/// Enumerates every valid schedule of `k` subjects drawn from `catalog`.
///
/// Shorthand for `Scheduler::new(catalog)?.schedules(k)`.
pub fn enumerate_schedules(catalog: &[Subject], k: usize) -> Result<Schedules<'_>> {
    Ok(Scheduler::new(catalog)?.schedules(k))
}

/// Lazy iterator over valid schedules.
///
/// Created by [`Scheduler::schedules`] or [`enumerate_schedules`].
#[derive(Debug, Clone)]
pub struct Schedules<'a> {
    catalog: &'a [Subject],
    /// Catalog indices of the current subset; `None` once subsets run out.
    subset: Option<Vec<usize>>,
    /// Group snapshots for the current subset.
    groups: Vec<Vec<&'a Group>>,
    /// Next tuple of the current product; `None` once it is exhausted.
    cursor: Option<Vec<usize>>,
    stats: SearchStats,
    finished: bool,
}

impl<'a> Schedules<'a> {
    fn new(catalog: &'a [Subject], k: usize) -> Self {
        let mut schedules = Self {
            catalog,
            subset: (k <= catalog.len()).then(|| (0..k).collect()),
            groups: Vec::new(),
            cursor: None,
            stats: SearchStats::default(),
            finished: false,
        };
        schedules.load_subset();
        schedules
    }

    /// Counters for the work done so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Snapshots the groups of the current subset and resets the cursor.
    fn load_subset(&mut self) {
        let Some(subset) = &self.subset else {
            return;
        };
        self.groups = subset.iter().map(|&i| self.catalog[i].groups()).collect();
        self.cursor = self
            .groups
            .iter()
            .all(|g| !g.is_empty())
            .then(|| vec![0; subset.len()]);
        self.stats.subsets_examined += 1;

        debug!(
            subjects = ?subset.iter().map(|&i| self.catalog[i].name()).collect::<Vec<_>>(),
            candidates = self.groups.iter().map(Vec::len).product::<usize>(),
            "searching subject subset"
        );
    }

    /// Moves to the next subset. Returns `false` when none is left.
    fn advance_subset(&mut self) -> bool {
        let n = self.catalog.len();
        let advanced = match self.subset.as_mut() {
            Some(indices) => next_combination(indices, n),
            None => false,
        };
        if advanced {
            self.load_subset();
        } else {
            self.subset = None;
            self.cursor = None;
        }
        advanced
    }

    /// Steps the product cursor, rightmost position fastest.
    fn advance_cursor(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for i in (0..cursor.len()).rev() {
            cursor[i] += 1;
            if cursor[i] < self.groups[i].len() {
                return;
            }
            cursor[i] = 0;
        }
        self.cursor = None;
    }

    fn current_selection(&self) -> Option<Vec<(&'a Subject, &'a Group)>> {
        let subset = self.subset.as_ref()?;
        let cursor = self.cursor.as_ref()?;
        Some(
            subset
                .iter()
                .zip(cursor)
                .zip(&self.groups)
                .map(|((&s, &g), groups)| (&self.catalog[s], groups[g]))
                .collect(),
        )
    }

    /// Accounts for one validated candidate. Only schedule conflicts are
    /// discarded; any other error ends the search.
    fn settle(&mut self, candidate: Result<Schedule<'a>>) -> ControlFlow<Option<Schedule<'a>>> {
        match candidate {
            Ok(schedule) => {
                self.stats.schedules_found += 1;
                ControlFlow::Break(Some(schedule))
            }
            Err(err) if err.is_conflict() => {
                trace!(%err, "discarding candidate");
                self.stats.conflicts_rejected += 1;
                ControlFlow::Continue(())
            }
            Err(err) => {
                error!(%err, "unexpected error while validating a candidate, stopping search");
                self.subset = None;
                self.cursor = None;
                self.finish();
                ControlFlow::Break(None)
            }
        }
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        debug!(
            subsets = self.stats.subsets_examined,
            candidates = self.stats.candidates_examined,
            found = self.stats.schedules_found,
            rejected = self.stats.conflicts_rejected,
            "schedule search exhausted"
        );
    }
}

impl<'a> Iterator for Schedules<'a> {
    type Item = Schedule<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(selection) = self.current_selection() else {
                if self.advance_subset() {
                    continue;
                }
                self.finish();
                return None;
            };
            self.advance_cursor();
            self.stats.candidates_examined += 1;

            if let ControlFlow::Break(outcome) = self.settle(Schedule::from_distinct(selection)) {
                return outcome;
            }
        }
    }
}

impl FusedIterator for Schedules<'_> {}

/// Advances `indices` to the next k-combination of `0..n` in
/// lexicographic order. Returns `false` after the last one.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    for i in (0..k).rev() {
        if indices[i] < n - k + i {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, TimeBlock, Weekday};
    use chrono::NaiveTime;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn block(day: Weekday, start: &str, end: &str) -> TimeBlock {
        TimeBlock::parse(day, start, end).unwrap()
    }

    fn subject(name: &str, groups: Vec<Group>) -> Subject {
        let mut s = Subject::new(name).unwrap();
        for g in groups {
            s.add_group(g).unwrap();
        }
        s
    }

    fn group(id: GroupId, teacher: &str, blocks: Vec<TimeBlock>) -> Group {
        Group::with_blocks(id, teacher, blocks).unwrap()
    }

    fn calc_physics(physics_start: &str, physics_end: &str) -> Vec<Subject> {
        vec![
            subject(
                "Calc",
                vec![
                    group(1, "Dr. Gauss", vec![block(Weekday::Monday, "07:00", "09:00")]),
                    group(2, "Dra. Lagrange", vec![block(Weekday::Tuesday, "07:00", "09:00")]),
                ],
            ),
            subject(
                "Physics",
                vec![group(
                    1,
                    "Dr. Einstein",
                    vec![block(Weekday::Monday, physics_start, physics_end)],
                )],
            ),
        ]
    }

    fn picks(schedule: &Schedule<'_>) -> Vec<(String, GroupId)> {
        schedule
            .entries()
            .map(|(s, g)| (s.name().to_string(), g.id()))
            .collect()
    }

    #[test]
    fn test_boundary_touch_yields_both() {
        let catalog = calc_physics("09:00", "11:00");
        let found: Vec<_> = enumerate_schedules(&catalog, 2).unwrap().map(|s| picks(&s)).collect();
        assert_eq!(
            found,
            vec![
                vec![("Calc".to_string(), 1), ("Physics".to_string(), 1)],
                vec![("Calc".to_string(), 2), ("Physics".to_string(), 1)],
            ]
        );
    }

    #[test]
    fn test_overlap_rejects_one() {
        let catalog = calc_physics("08:00", "10:00");
        let mut search = enumerate_schedules(&catalog, 2).unwrap();
        let found: Vec<_> = search.by_ref().map(|s| picks(&s)).collect();
        assert_eq!(found, vec![vec![("Calc".to_string(), 2), ("Physics".to_string(), 1)]]);

        let stats = search.stats();
        assert_eq!(stats.subsets_examined, 1);
        assert_eq!(stats.candidates_examined, 2);
        assert_eq!(stats.schedules_found, 1);
        assert_eq!(stats.conflicts_rejected, 1);
    }

    #[test]
    fn test_k_larger_than_catalog_is_empty() {
        let catalog = calc_physics("09:00", "11:00");
        let mut search = enumerate_schedules(&catalog, 3).unwrap();
        assert!(search.next().is_none());
        assert!(search.next().is_none());
        assert_eq!(search.stats().subsets_examined, 0);
    }

    #[test]
    fn test_k_zero_yields_one_empty_schedule() {
        let catalog = calc_physics("09:00", "11:00");
        let found: Vec<_> = enumerate_schedules(&catalog, 0).unwrap().collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_empty());

        assert_eq!(enumerate_schedules(&[], 0).unwrap().count(), 1);
        assert_eq!(enumerate_schedules(&[], 1).unwrap().count(), 0);
    }

    #[test]
    fn test_single_subject_subsets() {
        let catalog = calc_physics("08:00", "10:00");
        let found: Vec<_> = enumerate_schedules(&catalog, 1).unwrap().map(|s| picks(&s)).collect();
        assert_eq!(
            found,
            vec![
                vec![("Calc".to_string(), 1)],
                vec![("Calc".to_string(), 2)],
                vec![("Physics".to_string(), 1)],
            ]
        );
    }

    #[test]
    fn test_subsets_in_lexicographic_order() {
        let catalog: Vec<Subject> = ["A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let day = Weekday::ALL[i];
                subject(name, vec![group(1, "T", vec![block(day, "08:00", "10:00")])])
            })
            .collect();

        let order: Vec<String> = enumerate_schedules(&catalog, 2)
            .unwrap()
            .map(|s| s.entries().map(|(subj, _)| subj.name()).collect::<Vec<_>>().join(""))
            .collect();
        assert_eq!(order, vec!["AB", "AC", "AD", "BC", "BD", "CD"]);
    }

    #[test]
    fn test_product_rightmost_fastest() {
        let catalog = vec![
            subject(
                "A",
                vec![
                    group(1, "T", vec![block(Weekday::Monday, "08:00", "09:00")]),
                    group(2, "T", vec![block(Weekday::Tuesday, "08:00", "09:00")]),
                ],
            ),
            subject(
                "B",
                vec![
                    group(1, "T", vec![block(Weekday::Wednesday, "08:00", "09:00")]),
                    group(2, "T", vec![block(Weekday::Thursday, "08:00", "09:00")]),
                ],
            ),
        ];
        let ids: Vec<Vec<GroupId>> = enumerate_schedules(&catalog, 2)
            .unwrap()
            .map(|s| s.entries().map(|(_, g)| g.id()).collect())
            .collect();
        assert_eq!(ids, vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
    }

    #[test]
    fn test_subject_without_groups_contributes_nothing() {
        let mut catalog = calc_physics("09:00", "11:00");
        catalog.push(Subject::new("Ethics").unwrap());

        let scheduler = Scheduler::new(&catalog).unwrap();
        assert_eq!(scheduler.schedules(2).count(), 2);
        assert_eq!(scheduler.schedules(3).count(), 0);
        assert_eq!(scheduler.candidate_count(3), 0);
    }

    #[test]
    fn test_duplicate_subject_names_rejected() {
        let mut catalog = calc_physics("09:00", "11:00");
        catalog.push(Subject::new("calc").unwrap());
        assert_eq!(
            enumerate_schedules(&catalog, 2).unwrap_err(),
            ScheduleError::DuplicateSubject("calc".into())
        );
    }

    #[test]
    fn test_early_abandonment() {
        let catalog: Vec<Subject> = (0..6)
            .map(|i| {
                subject(
                    &format!("S{i}"),
                    (1..=3)
                        .map(|id| {
                            group(id, "T", vec![TimeBlock::new(
                                Weekday::ALL[i],
                                NaiveTime::from_hms_opt(7 + id, 0, 0).unwrap(),
                                NaiveTime::from_hms_opt(8 + id, 0, 0).unwrap(),
                            )
                            .unwrap()])
                        })
                        .collect(),
                )
            })
            .collect();

        let mut search = enumerate_schedules(&catalog, 3).unwrap();
        let first = search.next().unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(search.stats().candidates_examined, 1);
        assert_eq!(search.stats().subsets_examined, 1);
        assert!((search.stats().candidates_examined as u128) < candidate_count(&catalog, 3));
    }

    #[test]
    fn test_only_conflicts_are_discarded() {
        let catalog = calc_physics("08:00", "10:00");
        let mut search = enumerate_schedules(&catalog, 2).unwrap();

        let conflict = ScheduleError::ScheduleConflict {
            first_subject: "Calc".into(),
            first_group: 1,
            second_subject: "Physics".into(),
            second_group: 1,
        };
        assert!(search.settle(Err(conflict)).is_continue());
        assert_eq!(search.stats().conflicts_rejected, 1);

        assert!(matches!(
            search.settle(Err(ScheduleError::DuplicateSubject("Calc".into()))),
            ControlFlow::Break(None)
        ));
        assert_eq!(search.stats().conflicts_rejected, 1);
        assert!(search.next().is_none());
        assert!(search.next().is_none());
    }

    #[test]
    fn test_drained_stats_match_candidate_count() {
        let catalog = calc_physics("08:00", "10:00");
        let mut search = enumerate_schedules(&catalog, 1).unwrap();
        search.by_ref().for_each(drop);
        let stats = *search.stats();
        assert_eq!(stats.subsets_examined, 2);
        assert_eq!(stats.candidates_examined as u128, candidate_count(&catalog, 1));
        assert_eq!(
            stats.candidates_examined,
            stats.schedules_found + stats.conflicts_rejected
        );
    }

    fn random_catalog(rng: &mut SmallRng, subjects: usize) -> Vec<Subject> {
        (0..subjects)
            .map(|i| {
                let mut s = Subject::new(format!("Subject {i}")).unwrap();
                let groups = rng.random_range(0..4u32);
                for id in 1..=groups {
                    let mut g = Group::new(id, format!("Teacher {i}-{id}")).unwrap();
                    for _ in 0..rng.random_range(1..4u32) {
                        let day = Weekday::ALL[rng.random_range(0..3usize)];
                        let start = rng.random_range(7..18u32);
                        let len = rng.random_range(1..4u32);
                        let b = TimeBlock::new(
                            day,
                            NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                            NaiveTime::from_hms_opt(start + len, 0, 0).unwrap(),
                        )
                        .unwrap();
                        // Internal conflicts are simply skipped.
                        let _ = g.add_block(b);
                    }
                    s.add_group(g).unwrap();
                }
                s
            })
            .collect()
    }

    /// Counts (candidates, valid) with bitmask subsets and recursive
    /// products, comparing blocks directly.
    fn brute_force(catalog: &[Subject], k: usize) -> (u64, u64) {
        fn walk(groups: &[Vec<&Group>], chosen: &mut Vec<Vec<TimeBlock>>, counts: &mut (u64, u64)) {
            let Some((first, rest)) = groups.split_first() else {
                counts.0 += 1;
                let clash = chosen.iter().enumerate().any(|(i, a)| {
                    chosen[i + 1..]
                        .iter()
                        .any(|b| a.iter().any(|x| b.iter().any(|y| x.overlaps(y))))
                });
                if !clash {
                    counts.1 += 1;
                }
                return;
            };
            for g in first {
                chosen.push(g.sorted_blocks());
                walk(rest, chosen, counts);
                chosen.pop();
            }
        }

        let n = catalog.len();
        let mut counts = (0, 0);
        for mask in 0u32..(1 << n) {
            if mask.count_ones() as usize != k {
                continue;
            }
            let groups: Vec<Vec<&Group>> = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| catalog[i].groups())
                .collect();
            walk(&groups, &mut Vec::new(), &mut counts);
        }
        counts
    }

    #[test]
    fn test_matches_brute_force_on_random_catalogs() {
        let mut rng = SmallRng::seed_from_u64(42);
        for round in 0..25 {
            let n = rng.random_range(1..7usize);
            let catalog = random_catalog(&mut rng, n);
            for k in 0..=n + 1 {
                let (candidates, valid) = brute_force(&catalog, k);

                let mut search = enumerate_schedules(&catalog, k).unwrap();
                let found = search.by_ref().count() as u64;
                let stats = search.stats();

                assert_eq!(found, valid, "round {round}, k={k}");
                assert_eq!(stats.candidates_examined, candidates, "round {round}, k={k}");
                assert_eq!(candidate_count(&catalog, k), candidates as u128);
            }
        }
    }
}
