//! Group (course section) model.
//!
//! A group is one offering of a subject: a teacher and the weekly
//! blocks in which the group meets. A group's own blocks never overlap.
//!
//! # Identity
//! Groups compare and hash by id alone. Ids are scoped to their subject,
//! so group 1 of "Calculus" equals group 1 of "Physics". Keep groups of
//! different subjects out of the same set or map, or key them by
//! `(subject, id)`. Use [`Group::same_content`] for a full comparison.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::TimeBlock;
use crate::error::{Result, ScheduleError};

/// Group identifier, unique within one subject.
pub type GroupId = u32;

/// One section of a subject: a teacher plus weekly time blocks.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    id: GroupId,
    teacher: String,
    blocks: BTreeSet<TimeBlock>,
}

impl Group {
    /// Creates a group with no blocks.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidId`] if `id` is zero.
    /// - [`ScheduleError::InvalidTeacher`] if `teacher` is blank.
    pub fn new(id: GroupId, teacher: impl Into<String>) -> Result<Self> {
        if id == 0 {
            return Err(ScheduleError::InvalidId(0));
        }
        let teacher = teacher.into();
        let teacher = teacher.trim();
        if teacher.is_empty() {
            return Err(ScheduleError::InvalidTeacher);
        }
        Ok(Self {
            id,
            teacher: teacher.to_string(),
            blocks: BTreeSet::new(),
        })
    }

    /// Creates a group and adds each block through [`Group::add_block`].
    ///
    /// Construction is all-or-nothing: on the first conflicting block the
    /// partially filled group is dropped and the conflict is returned.
    ///
    /// # Example
    /// ```
    /// use u_timetable::models::{Group, TimeBlock, Weekday};
    ///
    /// let group = Group::with_blocks(1, "Dr. Gauss", [
    ///     TimeBlock::parse(Weekday::Monday, "07:00", "09:00").unwrap(),
    ///     TimeBlock::parse(Weekday::Wednesday, "07:00", "09:00").unwrap(),
    /// ]).unwrap();
    /// assert_eq!(group.block_count(), 2);
    /// ```
    pub fn with_blocks(
        id: GroupId,
        teacher: impl Into<String>,
        blocks: impl IntoIterator<Item = TimeBlock>,
    ) -> Result<Self> {
        let mut group = Self::new(id, teacher)?;
        for block in blocks {
            group.add_block(block)?;
        }
        Ok(group)
    }

    /// Group id.
    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Teacher name.
    #[inline]
    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    /// Adds a block, rejecting it if it overlaps one already stored.
    ///
    /// An identical block is absorbed without error. On conflict the
    /// group is left unchanged.
    pub fn add_block(&mut self, block: TimeBlock) -> Result<()> {
        if let Some(existing) = self.blocks.iter().find(|b| block.overlaps(b)) {
            if *existing == block {
                return Ok(());
            }
            return Err(ScheduleError::InternalConflict {
                group_id: self.id,
                block,
                existing: *existing,
            });
        }
        self.blocks.insert(block);
        Ok(())
    }

    /// Whether any block of this group overlaps any block of `other`.
    pub fn overlaps(&self, other: &Group) -> bool {
        self.blocks
            .iter()
            .any(|mine| other.blocks.iter().any(|theirs| mine.overlaps(theirs)))
    }

    /// Blocks in week order (day, then start time).
    pub fn sorted_blocks(&self) -> Vec<TimeBlock> {
        self.blocks.iter().copied().collect()
    }

    /// Iterates over blocks in week order without copying.
    pub fn blocks(&self) -> impl Iterator<Item = &TimeBlock> + '_ {
        self.blocks.iter()
    }

    /// Number of blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Weekly contact time in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.blocks.iter().map(TimeBlock::duration_minutes).sum()
    }

    /// Same id. Equivalent to `==`.
    #[inline]
    pub fn same_id(&self, other: &Group) -> bool {
        self.id == other.id
    }

    /// Same id, teacher and blocks.
    pub fn same_content(&self, other: &Group) -> bool {
        self.id == other.id && self.teacher == other.teacher && self.blocks == other.blocks
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Group: {}", self.id)?;
        writeln!(f, "Teacher: {}", self.teacher)?;
        write!(f, "Blocks:")?;
        if self.blocks.is_empty() {
            return write!(f, "\n  - (no blocks assigned)");
        }
        for block in &self.blocks {
            write!(f, "\n  - {block}")?;
        }
        Ok(())
    }
}
