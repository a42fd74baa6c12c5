//! Catalog documents: the JSON boundary for course data.
//!
//! A [`CatalogDocument`] mirrors the model types with plain strings and
//! integers so it can be read from or written to JSON. [`CatalogDocument::build`]
//! turns it into validated [`Subject`] values; that is where `"HH:MM"`
//! times and weekday names are parsed.
//!
//! ```json
//! {"subjects": [{"name": "Calculus", "groups": [
//!     {"id": 1, "teacher": "Dr. Gauss",
//!      "blocks": [{"day": "Mon", "start": "07:00", "end": "09:00"}]}]}]}
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::error::ScheduleError;
use crate::models::{Group, GroupId, Subject, TimeBlock, Weekday};
use crate::validation::{validate_catalog, ValidationError};

const DEMO_CATALOG: &str = include_str!("../data/demo_catalog.json");

/// Errors raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid catalog JSON.
    #[error("malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A subject, group or block entry violates a model invariant.
    #[error("subject '{subject}': {source}")]
    Subject {
        /// Name of the subject entry as written in the document.
        subject: String,
        /// Model error.
        #[source]
        source: ScheduleError,
    },

    /// The built catalog failed whole-catalog validation.
    #[error("catalog failed validation: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serializable description of a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Subjects in catalog order.
    pub subjects: Vec<SubjectEntry>,
}

/// A subject as written in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectEntry {
    /// Subject name.
    pub name: String,
    /// Offered groups.
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// A group as written in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    /// Group id; must be a positive integer.
    pub id: i64,
    /// Teacher name.
    pub teacher: String,
    /// Weekly blocks.
    #[serde(default)]
    pub blocks: Vec<BlockEntry>,
}

/// A time block as written in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockEntry {
    /// Weekday name, full or abbreviated (`"Monday"`, `"Mon"`).
    pub day: String,
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`.
    pub end: String,
}

impl CatalogDocument {
    /// Parses a JSON document. No model validation happens here.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Describes existing subjects as a document.
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        Self {
            subjects: subjects.iter().map(SubjectEntry::from_subject).collect(),
        }
    }

    /// Renders the document as indented JSON.
    pub fn to_json_string_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds and validates the subjects described by this document.
    ///
    /// # Errors
    /// - [`CatalogError::Subject`] for the first entry that violates a model
    ///   invariant (bad time, unknown day, overlapping blocks, ...).
    /// - [`CatalogError::Validation`] if the catalog as a whole is invalid.
    pub fn build(&self) -> Result<Vec<Subject>, CatalogError> {
        let subjects = self
            .subjects
            .iter()
            .map(|entry| {
                entry.build().map_err(|source| CatalogError::Subject {
                    subject: entry.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        validate_catalog(&subjects).map_err(CatalogError::Validation)?;

        debug!(
            subjects = subjects.len(),
            groups = subjects.iter().map(Subject::group_count).sum::<usize>(),
            "catalog built"
        );
        Ok(subjects)
    }
}

impl SubjectEntry {
    fn from_subject(subject: &Subject) -> Self {
        Self {
            name: subject.name().to_string(),
            groups: subject
                .groups()
                .into_iter()
                .map(GroupEntry::from_group)
                .collect(),
        }
    }

    fn build(&self) -> Result<Subject, ScheduleError> {
        let mut subject = Subject::new(self.name.as_str())?;
        for group in &self.groups {
            subject.add_group(group.build()?)?;
        }
        Ok(subject)
    }
}

impl GroupEntry {
    fn from_group(group: &Group) -> Self {
        Self {
            id: i64::from(group.id()),
            teacher: group.teacher().to_string(),
            blocks: group.blocks().map(BlockEntry::from_block).collect(),
        }
    }

    fn build(&self) -> Result<Group, ScheduleError> {
        let id = GroupId::try_from(self.id)
            .ok()
            .filter(|&id| id > 0)
            .ok_or(ScheduleError::InvalidId(self.id))?;
        let blocks = self
            .blocks
            .iter()
            .map(BlockEntry::build)
            .collect::<Result<Vec<_>, _>>()?;
        Group::with_blocks(id, self.teacher.as_str(), blocks)
    }
}

impl BlockEntry {
    fn from_block(block: &TimeBlock) -> Self {
        Self {
            day: block.weekday().short_name().to_string(),
            start: block.start().format("%H:%M").to_string(),
            end: block.end().format("%H:%M").to_string(),
        }
    }

    fn build(&self) -> Result<TimeBlock, ScheduleError> {
        let day: Weekday = self.day.parse()?;
        TimeBlock::parse(day, &self.start, &self.end)
    }
}

/// Reads, builds and validates a catalog from a JSON file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Subject>, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CatalogDocument::from_json_str(&json)?.build()
}

/// The bundled four-subject engineering catalog.
pub fn demo_catalog() -> Result<Vec<Subject>, CatalogError> {
    CatalogDocument::from_json_str(DEMO_CATALOG)?.build()
}
