use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::calculate::{CategoryBreakdown, GradeResult};
use super::letter::{round_to_tenth, LetterGrade};

/// Projection of a course's overall grade after hypothetical entries are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfProjection {
    pub current: Option<f64>,
    pub projected: Option<f64>,
    pub projected_letter: Option<LetterGrade>,
    /// `projected - current`; `None` when either side is ungraded.
    pub change: Option<f64>,
    /// Category breakdown after the hypotheticals.
    pub categories: BTreeMap<String, CategoryBreakdown>,
}

impl WhatIfProjection {
    pub(crate) fn between(current: &GradeResult, projected: GradeResult) -> Self {
        let change = match (current.overall, projected.overall) {
            (Some(before), Some(after)) => Some(round_to_tenth(after - before)),
            _ => None,
        };

        Self {
            current: current.overall,
            projected: projected.overall,
            projected_letter: projected.letter,
            change,
            categories: projected.categories,
        }
    }
}
