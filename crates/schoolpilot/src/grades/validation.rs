use std::collections::HashSet;

use super::domain::{Course, GradeEntry};

/// Rejected engine input. Always caller-correctable; `field` names the offending value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl GradeError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            GradeError::InvalidInput { field, .. } => field,
        }
    }
}

pub(crate) fn validate_course(course: &Course) -> Result<(), GradeError> {
    if course.categories.is_empty() {
        return Err(GradeError::invalid(
            "categories",
            "at least one category is required",
        ));
    }

    let mut seen = HashSet::new();
    for (index, category) in course.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            return Err(GradeError::invalid(
                format!("categories[{index}].name"),
                "must not be empty",
            ));
        }
        if !category.weight.is_finite() || category.weight < 0.0 {
            return Err(GradeError::invalid(
                format!("categories[{index}].weight"),
                format!("must be a finite non-negative number, got {}", category.weight),
            ));
        }
        if !seen.insert(category.name.as_str()) {
            return Err(GradeError::invalid(
                format!("categories[{index}].name"),
                format!("duplicate category '{}'", category.name),
            ));
        }
    }

    if let Some(importance) = course.policies.importance {
        if !importance.is_finite() {
            return Err(GradeError::invalid(
                "policies.importance",
                "must be a finite number",
            ));
        }
    }

    validate_entries("grades", &course.grades)
}

pub(crate) fn validate_entries(label: &str, entries: &[GradeEntry]) -> Result<(), GradeError> {
    for (index, entry) in entries.iter().enumerate() {
        if !entry.score.is_finite() || entry.score < 0.0 {
            return Err(GradeError::invalid(
                format!("{label}[{index}].score"),
                format!("must be a finite non-negative number, got {}", entry.score),
            ));
        }
        if !entry.max.is_finite() || entry.max <= 0.0 {
            return Err(GradeError::invalid(
                format!("{label}[{index}].max"),
                format!("must be a finite positive number, got {}", entry.max),
            ));
        }
    }
    Ok(())
}

pub(crate) fn validate_target(target: f64) -> Result<(), GradeError> {
    if target.is_finite() {
        Ok(())
    } else {
        Err(GradeError::invalid("target", "must be a finite number"))
    }
}

pub(crate) fn validate_assumed_max(max_score: f64) -> Result<(), GradeError> {
    if max_score.is_finite() && max_score > 0.0 {
        Ok(())
    } else {
        Err(GradeError::invalid(
            "max_score",
            format!("must be a finite positive number, got {max_score}"),
        ))
    }
}
