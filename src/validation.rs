//! Input validation for course catalogs.
//!
//! Checks structural integrity of a catalog before searching it.
//! Detects:
//! - Duplicate subject names (case-insensitive)
//! - Subjects that offer no groups
//!
//! Per-subject and per-group invariants (unique group ids, non-overlapping
//! blocks) are already enforced by the model types themselves.

use std::collections::HashMap;

use tracing::warn;

use crate::models::Subject;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two subjects share a name.
    DuplicateSubject,
    /// A subject has no groups.
    EmptySubject,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a catalog.
///
/// Checks:
/// 1. No two subjects share a name (ignoring case)
/// 2. Every subject offers at least one group
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &[Subject]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut first_seen: HashMap<String, &str> = HashMap::new();
    for subject in catalog {
        if let Some(original) = first_seen.insert(subject.key(), subject.name()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSubject,
                format!(
                    "Duplicate subject: '{}' (already listed as '{}')",
                    subject.name(),
                    original
                ),
            ));
        }
    }

    for subject in catalog.iter().filter(|s| !s.has_groups()) {
        warn!(subject = subject.name(), "subject offers no groups");
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptySubject,
            format!("Subject '{}' has no groups", subject.name()),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, TimeBlock, Weekday};

    fn subject(name: &str) -> Subject {
        Subject::new(name)
            .unwrap()
            .with_group(
                Group::with_blocks(
                    1,
                    "Teacher",
                    [TimeBlock::parse(Weekday::Monday, "07:00", "09:00").unwrap()],
                )
                .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = vec![subject("Calculus"), subject("Physics")];
        assert!(validate_catalog(&catalog).is_ok());
        assert!(validate_catalog(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_subject() {
        let catalog = vec![subject("Calculus"), subject("Physics"), subject("calculus")];

        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateSubject);
        assert!(errors[0].message.contains("'calculus'"));
        assert!(errors[0].message.contains("'Calculus'"));
    }

    #[test]
    fn test_empty_subject() {
        let catalog = vec![subject("Calculus"), Subject::new("Ethics").unwrap()];

        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptySubject && e.message.contains("Ethics")));
    }

    #[test]
    fn test_multiple_errors() {
        let catalog = vec![
            Subject::new("Ethics").unwrap(),
            Subject::new("ETHICS").unwrap(),
        ];

        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
