//! Schedule (solution) model.
//!
//! A schedule is one conflict-free choice of a single group for each of
//! a set of subjects. It borrows subjects and groups from the catalog
//! that owns them and is validated once, at construction.
//!
//! # Validation
//! Every pair of selected groups is checked with [`Group::overlaps`].
//! The first conflicting pair, in selection order, is reported.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::{Group, GroupId, Subject, TimeBlock, Weekday};
use crate::error::{Result, ScheduleError};

/// A validated, immutable assignment of one group per subject.
#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    selection: Vec<(&'a Subject, &'a Group)>,
    by_weekday: BTreeMap<Weekday, Vec<ScheduledBlock<'a>>>,
}

/// A block placed in a schedule, with the subject and group it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledBlock<'a> {
    /// The time block.
    pub block: &'a TimeBlock,
    /// Subject the block is taught for.
    pub subject: &'a Subject,
    /// Group the block belongs to.
    pub group: &'a Group,
}

/// Owned, serializable view of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    /// Chosen groups in selection order.
    pub selections: Vec<SelectionSummary>,
    /// Weekly contact time in minutes.
    pub total_minutes: u32,
}

/// One subject/group pair of a [`ScheduleSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    /// Subject name.
    pub subject: String,
    /// Chosen group id.
    pub group_id: GroupId,
    /// Group teacher.
    pub teacher: String,
    /// Group blocks in week order.
    pub blocks: Vec<TimeBlock>,
}

impl<'a> Schedule<'a> {
    /// Validates a selection and builds a schedule.
    ///
    /// # Errors
    /// - [`ScheduleError::DuplicateSubject`] if a subject appears twice.
    /// - [`ScheduleError::ScheduleConflict`] for the first pair of
    ///   overlapping groups.
    ///
    /// # Example
    /// ```
    /// use u_timetable::models::{Group, Schedule, Subject, TimeBlock, Weekday};
    ///
    /// let calc = Subject::new("Calculus").unwrap()
    ///     .with_group(Group::with_blocks(1, "Dr. Gauss",
    ///         [TimeBlock::parse(Weekday::Monday, "07:00", "09:00").unwrap()]).unwrap())
    ///     .unwrap();
    /// let physics = Subject::new("Physics").unwrap()
    ///     .with_group(Group::with_blocks(1, "Dr. Einstein",
    ///         [TimeBlock::parse(Weekday::Monday, "09:00", "11:00").unwrap()]).unwrap())
    ///     .unwrap();
    ///
    /// let schedule = Schedule::new([
    ///     (&calc, calc.find_group(1).unwrap()),
    ///     (&physics, physics.find_group(1).unwrap()),
    /// ]).unwrap();
    /// assert_eq!(schedule.len(), 2);
    /// ```
    pub fn new(selection: impl IntoIterator<Item = (&'a Subject, &'a Group)>) -> Result<Self> {
        let selection: Vec<_> = selection.into_iter().collect();

        let mut seen = HashSet::with_capacity(selection.len());
        for (subject, _) in &selection {
            if !seen.insert(subject.key()) {
                return Err(ScheduleError::DuplicateSubject(subject.name().to_string()));
            }
        }

        Self::from_distinct(selection)
    }

    /// Builds a schedule from a selection whose subjects are known to be
    /// distinct. Only conflicts are checked.
    pub(crate) fn from_distinct(selection: Vec<(&'a Subject, &'a Group)>) -> Result<Self> {
        validate_conflicts(&selection)?;
        let by_weekday = organize_by_weekday(&selection);
        Ok(Self {
            selection,
            by_weekday,
        })
    }

    /// Number of subjects.
    #[inline]
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// Whether the schedule has no subjects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// `(subject, group)` pairs in selection order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&'a Subject, &'a Group)> + '_ {
        self.selection.iter().copied()
    }

    /// Group chosen for a subject, if the subject is part of this schedule.
    pub fn group_for(&self, subject: &Subject) -> Option<&'a Group> {
        self.selection
            .iter()
            .find(|(s, _)| *s == subject)
            .map(|(_, g)| *g)
    }

    /// Blocks on one day, ordered by start time.
    pub fn blocks_on(&self, day: Weekday) -> &[ScheduledBlock<'a>] {
        self.by_weekday.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days with at least one block, in week order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.by_weekday.keys().copied()
    }

    /// Weekly contact time in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.selection.iter().map(|(_, g)| g.total_minutes()).sum()
    }

    /// Owned summary suitable for serialization.
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            selections: self
                .selection
                .iter()
                .map(|(subject, group)| SelectionSummary {
                    subject: subject.name().to_string(),
                    group_id: group.id(),
                    teacher: group.teacher().to_string(),
                    blocks: group.sorted_blocks(),
                })
                .collect(),
            total_minutes: self.total_minutes(),
        }
    }
}

/// Checks all `C(n, 2)` pairs in selection order.
fn validate_conflicts(selection: &[(&Subject, &Group)]) -> Result<()> {
    for (i, (first_subject, first_group)) in selection.iter().enumerate() {
        for (second_subject, second_group) in &selection[i + 1..] {
            if first_group.overlaps(second_group) {
                return Err(ScheduleError::ScheduleConflict {
                    first_subject: first_subject.name().to_string(),
                    first_group: first_group.id(),
                    second_subject: second_subject.name().to_string(),
                    second_group: second_group.id(),
                });
            }
        }
    }
    Ok(())
}

fn organize_by_weekday<'a>(
    selection: &[(&'a Subject, &'a Group)],
) -> BTreeMap<Weekday, Vec<ScheduledBlock<'a>>> {
    let mut by_weekday: BTreeMap<Weekday, Vec<ScheduledBlock<'a>>> = BTreeMap::new();
    for &(subject, group) in selection {
        for block in group.blocks() {
            by_weekday
                .entry(block.weekday())
                .or_default()
                .push(ScheduledBlock {
                    block,
                    subject,
                    group,
                });
        }
    }
    // Stable: equal starts keep selection order.
    for blocks in by_weekday.values_mut() {
        blocks.sort_by_key(|entry| entry.block.start());
    }
    by_weekday
}

impl fmt::Display for Schedule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "========================================";
        writeln!(f, "{RULE}")?;
        writeln!(f, "           PROPOSED SCHEDULE")?;
        write!(f, "{RULE}")?;

        for (day, blocks) in &self.by_weekday {
            write!(f, "\n\n--- {} ---", day.name().to_uppercase())?;
            for entry in blocks {
                write!(
                    f,
                    "\n  {} - {} | {} (group {}) - {}",
                    entry.block.start().format("%H:%M"),
                    entry.block.end().format("%H:%M"),
                    entry.subject.name(),
                    entry.group.id(),
                    entry.group.teacher()
                )?;
            }
        }
        Ok(())
    }
}
