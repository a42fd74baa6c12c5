//! Error types for timetable models and schedule search.
//!
//! Every validation failure is raised where the violation happens and
//! propagates to the caller. The search engine is the single place that
//! swallows an error kind: [`ScheduleError::ScheduleConflict`] is the
//! expected outcome of most candidates and is discarded there.

use chrono::NaiveTime;
use thiserror::Error;

use crate::models::{GroupId, TimeBlock};

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised while building or validating timetable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A time string is not in `HH:MM` form.
    #[error("invalid {field} '{value}': expected HH:MM")]
    InvalidFormat {
        /// Which time field was being parsed (`start` or `end`).
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A block's start is not strictly before its end.
    #[error("start time {} must be before end time {}", .start.format("%H:%M"), .end.format("%H:%M"))]
    InvalidRange {
        /// Block start.
        start: NaiveTime,
        /// Block end.
        end: NaiveTime,
    },

    /// A weekday name is not one of Monday..Saturday.
    #[error("unknown weekday '{0}': expected Monday through Saturday")]
    InvalidWeekday(String),

    /// A group id is not a positive integer.
    #[error("group id must be a positive integer, got {0}")]
    InvalidId(i64),

    /// A teacher name is blank.
    #[error("teacher name must not be blank")]
    InvalidTeacher,

    /// A subject name is blank.
    #[error("subject name must not be blank")]
    InvalidName,

    /// A subject appears more than once where subjects must be distinct.
    #[error("subject '{0}' appears more than once")]
    DuplicateSubject(String),

    /// A subject already holds a group with this id.
    #[error("group {group_id} already exists in subject '{subject}'")]
    DuplicateGroup {
        /// Subject name.
        subject: String,
        /// Conflicting group id.
        group_id: GroupId,
    },

    /// No group with this id exists in the subject.
    #[error("no group with id {group_id} in subject '{subject}'")]
    NotFound {
        /// Subject name.
        subject: String,
        /// Missing group id.
        group_id: GroupId,
    },

    /// A new block overlaps a block already stored in the same group.
    #[error("internal conflict in group {group_id}: block '{block}' overlaps '{existing}'")]
    InternalConflict {
        /// Group being modified.
        group_id: GroupId,
        /// Block that was rejected.
        block: TimeBlock,
        /// Block already in the group.
        existing: TimeBlock,
    },

    /// Two selected groups overlap.
    #[error(
        "schedule conflict between group {first_group} ({first_subject}) \
         and group {second_group} ({second_subject})"
    )]
    ScheduleConflict {
        /// Subject of the first conflicting group.
        first_subject: String,
        /// First conflicting group id.
        first_group: GroupId,
        /// Subject of the second conflicting group.
        second_subject: String,
        /// Second conflicting group id.
        second_group: GroupId,
    },
}

impl ScheduleError {
    /// Whether this is a cross-group schedule conflict.
    #[inline]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ScheduleConflict { .. })
    }
}
