use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::domain::{Category, Course, GradeEntry, GradePolicies};
use super::letter::{round_to_tenth, LetterGrade};
use super::validation::GradeError;

/// Per-category line of a grade result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Point-pooled percentage, `None` while the category has no entries.
    pub average: Option<f64>,
    /// Declared weight, not the renormalized one.
    pub weight: f64,
    pub assignments: usize,
}

/// Output of `calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// `None` means nothing is graded yet, which is distinct from 0%.
    pub overall: Option<f64>,
    pub letter: Option<LetterGrade>,
    pub categories: BTreeMap<String, CategoryBreakdown>,
    /// Share of declared weight backed by graded categories, 0-100.
    pub weight_coverage: f64,
}

/// Unrounded state of one category.
#[derive(Debug, Clone)]
pub(crate) struct CategoryTally<'a> {
    pub(crate) category: &'a Category,
    pub(crate) average: Option<f64>,
    pub(crate) assignments: usize,
}

/// Full-precision view of a course; rounding only happens when converting to `GradeResult`.
#[derive(Debug, Clone)]
pub(crate) struct Gradebook<'a> {
    pub(crate) tallies: Vec<CategoryTally<'a>>,
    weighted_sum: f64,
    weight_used: f64,
    weight_total: f64,
}

impl<'a> Gradebook<'a> {
    pub(crate) fn tally(
        categories: &'a [Category],
        grades: &[GradeEntry],
        policies: &GradePolicies,
    ) -> Self {
        let mut tallies = Vec::with_capacity(categories.len());
        let mut weighted_sum = 0.0;
        let mut weight_used = 0.0;
        let mut weight_total = 0.0;

        for category in categories {
            let entries = entries_for(grades, &category.name);
            let average = pooled_average(&entries, policies.drop_count(&category.name));

            if let Some(avg) = average {
                weighted_sum += avg * category.weight;
                weight_used += category.weight;
            }
            weight_total += category.weight;

            tallies.push(CategoryTally {
                category,
                average,
                assignments: entries.len(),
            });
        }

        Self {
            tallies,
            weighted_sum,
            weight_used,
            weight_total,
        }
    }

    pub(crate) fn for_course(course: &'a Course) -> Self {
        Self::tally(&course.categories, &course.grades, &course.policies)
    }

    /// Weighted average over graded categories, weights renormalized to sum to one.
    pub(crate) fn overall(&self) -> Option<f64> {
        if self.weight_used > 0.0 {
            Some(self.weighted_sum / self.weight_used)
        } else {
            None
        }
    }

    /// Weighted sum and weight of every graded category except `excluded`.
    pub(crate) fn contribution_excluding(&self, excluded: &str) -> (f64, f64) {
        self.tallies
            .iter()
            .filter(|tally| tally.category.name != excluded)
            .filter_map(|tally| tally.average.map(|avg| (avg, tally.category.weight)))
            .fold((0.0, 0.0), |(sum, weight), (avg, w)| {
                (sum + avg * w, weight + w)
            })
    }

    /// Inputs are validated as finite, but their sums can still overflow.
    pub(crate) fn ensure_finite(&self) -> Result<(), GradeError> {
        if let Some(tally) = self
            .tallies
            .iter()
            .find(|tally| tally.average.is_some_and(|avg| !avg.is_finite()))
        {
            return Err(GradeError::invalid(
                "grades",
                format!(
                    "points in category '{}' are too large to average",
                    tally.category.name
                ),
            ));
        }

        let totals = [self.weighted_sum, self.weight_used, self.weight_total];
        if totals.iter().any(|total| !total.is_finite())
            || self.overall().is_some_and(|overall| !overall.is_finite())
        {
            return Err(GradeError::invalid(
                "grades",
                "weighted total is too large to represent",
            ));
        }
        Ok(())
    }

    pub(crate) fn into_result(self) -> Result<GradeResult, GradeError> {
        self.ensure_finite()?;
        let overall = self.overall().map(round_to_tenth);
        let weight_coverage = if self.weight_total > 0.0 {
            round_to_tenth(self.weight_used / self.weight_total * 100.0)
        } else {
            0.0
        };

        let categories = self
            .tallies
            .into_iter()
            .map(|tally| {
                (
                    tally.category.name.clone(),
                    CategoryBreakdown {
                        average: tally.average.map(round_to_tenth),
                        weight: tally.category.weight,
                        assignments: tally.assignments,
                    },
                )
            })
            .collect();

        Ok(GradeResult {
            overall,
            letter: overall.map(LetterGrade::from_percentage),
            categories,
            weight_coverage,
        })
    }
}

pub(crate) fn entries_for<'g>(grades: &'g [GradeEntry], category: &str) -> Vec<&'g GradeEntry> {
    grades
        .iter()
        .filter(|entry| entry.category == category)
        .collect()
}

/// Points-based aggregate: `100 * sum(score) / sum(max)` after discarding the `drop` lowest
/// entries by individual percentage. Nothing is dropped unless more than `drop` entries exist.
pub(crate) fn pooled_average(entries: &[&GradeEntry], drop: usize) -> Option<f64> {
    let points = entries.iter().map(|entry| (entry.score, entry.max));
    pool_points(points, drop)
}

pub(crate) fn pool_points(points: impl Iterator<Item = (f64, f64)>, drop: usize) -> Option<f64> {
    let mut points: Vec<(f64, f64)> = points.collect();
    if points.is_empty() {
        return None;
    }

    let skip = if drop > 0 && points.len() > drop {
        points.sort_by(|a, b| (a.0 / a.1).total_cmp(&(b.0 / b.1)));
        drop
    } else {
        0
    };

    let (score, max) = points
        .iter()
        .skip(skip)
        .fold((0.0, 0.0), |(s, m), (score, max)| (s + score, m + max));

    if max > 0.0 {
        Some(score * 100.0 / max)
    } else {
        None
    }
}
