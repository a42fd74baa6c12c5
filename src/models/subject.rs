//! Subject (course) model.
//!
//! A subject owns the groups offered for it, keyed by group id.
//! Subjects compare and hash by name, ignoring case.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Group, GroupId};
use crate::error::{Result, ScheduleError};

/// A course with its alternative groups.
#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    name: String,
    groups: BTreeMap<GroupId, Group>,
}

impl Subject {
    /// Creates a subject with no groups.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidName`] if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::InvalidName);
        }
        Ok(Self {
            name: name.to_string(),
            groups: BTreeMap::new(),
        })
    }

    /// Adds a group, consuming and returning the subject.
    pub fn with_group(mut self, group: Group) -> Result<Self> {
        self.add_group(group)?;
        Ok(self)
    }

    /// Subject name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a group.
    ///
    /// # Errors
    /// [`ScheduleError::DuplicateGroup`] if a group with the same id exists.
    pub fn add_group(&mut self, group: Group) -> Result<()> {
        if self.groups.contains_key(&group.id()) {
            return Err(ScheduleError::DuplicateGroup {
                subject: self.name.clone(),
                group_id: group.id(),
            });
        }
        self.groups.insert(group.id(), group);
        Ok(())
    }

    /// Looks up a group by id.
    pub fn find_group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Removes and returns a group.
    ///
    /// # Errors
    /// [`ScheduleError::NotFound`] if no group has this id.
    pub fn remove_group(&mut self, id: GroupId) -> Result<Group> {
        self.groups.remove(&id).ok_or_else(|| ScheduleError::NotFound {
            subject: self.name.clone(),
            group_id: id,
        })
    }

    /// Groups sorted by ascending id.
    pub fn groups(&self) -> Vec<&Group> {
        self.groups.values().collect()
    }

    /// Number of groups.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether at least one group is offered.
    #[inline]
    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Owned case-insensitive name key, for map lookups by name.
    pub(crate) fn key(&self) -> String {
        self.name.to_lowercase()
    }

    fn folded_name(&self) -> impl Iterator<Item = char> + '_ {
        self.name.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.folded_name().eq(other.folded_name())
    }
}

impl Eq for Subject {}

impl Hash for Subject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.folded_name() {
            c.hash(state);
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            return write!(f, "Subject: {}\n(no groups available)", self.name);
        }
        write!(f, "--- Subject: {} ---", self.name)?;
        for group in self.groups.values() {
            write!(f, "\n\n{group}")?;
        }
        Ok(())
    }
}
