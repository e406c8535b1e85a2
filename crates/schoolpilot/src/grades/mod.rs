//! Grade calculation and projection engine.
//!
//! Category averages are point-pooled (`sum(score) / sum(max)`), and categories without entries
//! are left out of the overall with the remaining weights renormalized. Every operation takes
//! the complete course state and keeps nothing between calls.

mod calculate;
mod config;
mod domain;
pub mod import;
mod letter;
mod required;
pub mod router;
mod standing;
mod validation;
mod what_if;

#[cfg(test)]
mod tests;

pub use calculate::{CategoryBreakdown, GradeResult};
pub use config::{GradingConfig, DEFAULT_ACHIEVABILITY_EPSILON, DEFAULT_ASSUMED_MAX};
pub use domain::{Category, Course, GradeEntry, GradePolicies};
pub use import::{GradebookImportError, GradebookImporter};
pub use letter::{round_to_tenth, LetterGrade};
pub use required::{RequiredOutcome, RequiredScore, RequiredScoreQuery};
pub use router::grade_router;
pub use standing::{CourseSummary, Standing, BOUNDARY_WINDOW};
pub use validation::GradeError;
pub use what_if::WhatIfProjection;

use calculate::Gradebook;
use std::collections::BTreeMap;

/// Stateless engine; holds only its configuration and is safe to share across requests.
#[derive(Debug, Clone, Default)]
pub struct GradeEngine {
    config: GradingConfig,
}

impl GradeEngine {
    pub fn new(config: GradingConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Current overall percentage, letter, and per-category breakdown.
    pub fn calculate(&self, course: &Course) -> Result<GradeResult, GradeError> {
        validation::validate_course(course)?;
        let result = Gradebook::for_course(course).into_result()?;
        tracing::debug!(
            categories = course.categories.len(),
            grades = course.grades.len(),
            overall = ?result.overall,
            "calculated course grade"
        );
        Ok(result)
    }

    /// Score needed on one new entry in `query.category` to bring the overall to `query.target`.
    pub fn required_score(
        &self,
        course: &Course,
        query: &RequiredScoreQuery,
    ) -> Result<RequiredScore, GradeError> {
        validation::validate_course(course)?;
        validation::validate_target(query.target)?;
        let assumed_max = query.max_score.unwrap_or(self.config.default_assumed_max);
        validation::validate_assumed_max(assumed_max)?;

        required::solve(
            course,
            query,
            assumed_max,
            self.config.achievability_epsilon,
        )
    }

    /// Overall before and after appending `hypotheticals`; the course itself is not modified.
    pub fn what_if(
        &self,
        course: &Course,
        hypotheticals: &[GradeEntry],
    ) -> Result<WhatIfProjection, GradeError> {
        validation::validate_course(course)?;
        if hypotheticals.is_empty() {
            return Err(GradeError::invalid(
                "hypotheticals",
                "at least one hypothetical entry is required",
            ));
        }
        validation::validate_entries("hypotheticals", hypotheticals)?;

        let current = Gradebook::for_course(course).into_result()?;

        let mut combined = course.grades.clone();
        combined.extend_from_slice(hypotheticals);
        let projected =
            Gradebook::tally(&course.categories, &combined, &course.policies).into_result()?;

        let projection = WhatIfProjection::between(&current, projected);
        tracing::debug!(
            hypotheticals = hypotheticals.len(),
            current = ?projection.current,
            projected = ?projection.projected,
            "projected what-if grade"
        );
        Ok(projection)
    }

    /// Overall, letter, and standing for several courses. A rejected course reports its error
    /// without failing the others.
    pub fn summarize(&self, courses: &BTreeMap<String, Course>) -> Vec<CourseSummary> {
        courses
            .iter()
            .map(|(name, course)| match self.calculate(course) {
                Ok(result) => CourseSummary::graded(name.clone(), &result),
                Err(err) => {
                    tracing::warn!(course = %name, error = %err, "skipping course in summary");
                    CourseSummary::rejected(name.clone(), err.to_string())
                }
            })
            .collect()
    }
}
