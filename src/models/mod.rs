//! Timetable domain models.
//!
//! Provides the core data types for describing a course catalog and the
//! schedules chosen from it.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Language school | Gym |
//! |-------------|------------|-----------------|-----|
//! | Subject | Course | Level | Class type |
//! | Group | Section | Cohort | Session slot |
//! | TimeBlock | Lecture meeting | Lesson | Class time |
//! | Schedule | Enrollment plan | Weekly plan | Membership plan |

mod group;
mod schedule;
mod subject;
mod time_block;

pub use group::{Group, GroupId};
pub use schedule::{Schedule, ScheduleSummary, ScheduledBlock, SelectionSummary};
pub use subject::Subject;
pub use time_block::{TimeBlock, Weekday};
