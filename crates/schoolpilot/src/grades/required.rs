use serde::{Deserialize, Serialize};

use super::calculate::{entries_for, pool_points, Gradebook};
use super::domain::{Course, GradeEntry};
use super::letter::{display_number, round_to_tenth};
use super::validation::GradeError;

const BISECTION_STEPS: usize = 100;
const BRACKET_EXPANSIONS: usize = 32;
const ROUNDING_STEPS: usize = 10;

/// Parameters for a required-score query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredScoreQuery {
    /// Target overall percentage.
    pub target: f64,
    pub category: String,
    /// Points possible on the next entry; the engine default applies when absent.
    #[serde(default)]
    pub max_score: Option<f64>,
}

impl RequiredScoreQuery {
    pub fn new(target: f64, category: impl Into<String>) -> Self {
        Self {
            target,
            category: category.into(),
            max_score: None,
        }
    }

    pub fn with_max_score(mut self, max_score: f64) -> Self {
        self.max_score = Some(max_score);
        self
    }
}

/// How a required score relates to the 0-100% range of a single new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredOutcome {
    /// A score within range reaches the target.
    Achievable,
    /// More than a perfect score would be needed.
    Unreachable,
    /// Even a zero keeps the overall at or above the target.
    Secured,
    /// The category is unknown or carries no weight, so it cannot move the overall.
    MissingWeight,
}

impl RequiredOutcome {
    pub const fn is_achievable(self) -> bool {
        matches!(self, Self::Achievable | Self::Secured)
    }
}

/// Output of `required_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredScore {
    /// Raw points needed on the new entry. May be negative or exceed the entry's max.
    pub required: Option<f64>,
    /// `required` as a percentage of the new entry's max.
    pub required_pct: Option<f64>,
    pub achievable: bool,
    pub outcome: RequiredOutcome,
    pub explanation: String,
}

pub(crate) fn solve(
    course: &Course,
    query: &RequiredScoreQuery,
    assumed_max: f64,
    epsilon: f64,
) -> Result<RequiredScore, GradeError> {
    let RequiredScoreQuery {
        target, category, ..
    } = query;
    let target = *target;

    let weight = course
        .category(category)
        .map(|category| category.weight)
        .unwrap_or(0.0);
    if weight <= 0.0 {
        return Ok(missing_weight(category));
    }

    let gradebook = Gradebook::for_course(course);
    gradebook.ensure_finite()?;
    let (other_weighted, other_weight) = gradebook.contribution_excluding(category);
    let needed_average = (target * (other_weight + weight) - other_weighted) / weight;

    let existing = entries_for(&course.grades, category);
    let drop = course.policies.drop_count(category);

    let solved = if drop > 0 {
        solve_with_drop(&existing, needed_average, assumed_max, drop)
    } else {
        let (score, max) = existing
            .iter()
            .fold((0.0, 0.0), |(s, m), entry| (s + entry.score, m + entry.max));
        Some(needed_average / 100.0 * (max + assumed_max) - score)
    };

    let (points, outcome) = match solved {
        Some(points) => (points, classify(points / assumed_max * 100.0, epsilon)),
        None => (0.0, RequiredOutcome::Secured),
    };
    let pct = points / assumed_max * 100.0;
    if !needed_average.is_finite() || !pct.is_finite() {
        return Err(GradeError::invalid(
            "target",
            "required score is too large to represent",
        ));
    }

    tracing::debug!(
        category = %category,
        target_pct = target,
        needed_average,
        required_pct = pct,
        ?outcome,
        "solved required score"
    );

    let mut required = round_to_tenth(points);
    let mut required_pct = round_to_tenth(pct);
    if outcome == RequiredOutcome::Achievable {
        let overall_with = |points: f64| {
            let average = pooled_with(&existing, points, assumed_max, drop);
            (other_weighted + average * weight) / (other_weight + weight)
        };
        let rounded = round_up_to_meet(required, assumed_max, |points| {
            round_to_tenth(overall_with(points)) >= round_to_tenth(target)
        });
        if rounded != required {
            required = rounded;
            required_pct = round_to_tenth(rounded / assumed_max * 100.0);
        }
    }

    let explanation = match outcome {
        RequiredOutcome::Secured => format!(
            "You already exceed the target! Even a 0 keeps you at or above {}%.",
            display_number(target)
        ),
        RequiredOutcome::Unreachable => format!(
            "You'd need {}%, which exceeds the max. Target may not be reachable with one assessment.",
            display_number(required_pct)
        ),
        RequiredOutcome::Achievable => format!(
            "Score at least {}/{} ({}%) on your next {} assessment.",
            display_number(required),
            display_number(assumed_max),
            display_number(required_pct),
            category.to_lowercase()
        ),
        RequiredOutcome::MissingWeight => missing_weight_explanation(category),
    };

    Ok(RequiredScore {
        required: Some(required),
        required_pct: Some(required_pct),
        achievable: outcome.is_achievable(),
        outcome,
        explanation,
    })
}

/// Rounding to a tenth can land just under a drop-lowest jump; step up until the rounded
/// score still reaches the target, never past the entry's max.
fn round_up_to_meet(required: f64, assumed_max: f64, meets: impl Fn(f64) -> bool) -> f64 {
    let mut candidate = required;
    for _ in 0..ROUNDING_STEPS {
        if meets(candidate) {
            return candidate;
        }
        let next = round_to_tenth(candidate + 0.1);
        if next > assumed_max {
            break;
        }
        candidate = next;
    }
    required
}

fn missing_weight(category: &str) -> RequiredScore {
    RequiredScore {
        required: None,
        required_pct: None,
        achievable: false,
        outcome: RequiredOutcome::MissingWeight,
        explanation: missing_weight_explanation(category),
    }
}

fn missing_weight_explanation(category: &str) -> String {
    format!("Missing category weight data: '{category}' carries no weight in this course.")
}

fn classify(pct: f64, epsilon: f64) -> RequiredOutcome {
    if pct > 100.0 + epsilon {
        RequiredOutcome::Unreachable
    } else if pct < -epsilon {
        RequiredOutcome::Secured
    } else {
        RequiredOutcome::Achievable
    }
}

fn pooled_with(existing: &[&GradeEntry], points: f64, assumed_max: f64, drop: usize) -> f64 {
    let candidate = std::iter::once((points, assumed_max));
    let all = existing
        .iter()
        .map(|entry| (entry.score, entry.max))
        .chain(candidate);
    pool_points(all, drop).unwrap_or(0.0)
}

/// Drop-lowest makes the category average piecewise in the new score, so bisect on it,
/// widening the bracket past `[0, assumed_max]` when the answer lies outside.
/// Returns `hi`, the smallest score seen that meets the need; `None` means every finite score
/// meets it.
fn solve_with_drop(
    existing: &[&GradeEntry],
    needed: f64,
    assumed_max: f64,
    drop: usize,
) -> Option<f64> {
    let average_at = |points: f64| pooled_with(existing, points, assumed_max, drop);

    let (mut lo, mut hi) = (0.0, assumed_max);

    if average_at(lo) >= needed {
        hi = lo;
        lo = -assumed_max;
        let mut bracketed = false;
        for _ in 0..BRACKET_EXPANSIONS {
            if average_at(lo) < needed {
                bracketed = true;
                break;
            }
            hi = lo;
            lo *= 2.0;
        }
        if !bracketed {
            return None;
        }
    } else if average_at(hi) < needed {
        for _ in 0..BRACKET_EXPANSIONS {
            lo = hi;
            hi *= 2.0;
            if average_at(hi) >= needed {
                break;
            }
        }
    }

    for _ in 0..BISECTION_STEPS {
        let mid = (lo + hi) / 2.0;
        if average_at(mid) < needed {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Some(hi)
}
