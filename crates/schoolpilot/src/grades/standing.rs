use serde::{Deserialize, Serialize};

use super::calculate::GradeResult;
use super::letter::{round_to_tenth, LetterGrade};

/// Points below a letter boundary that still count as "near" it.
pub const BOUNDARY_WINDOW: f64 = 3.0;

/// Letter boundaries watched for near misses, highest first.
const WATCHED_BOUNDARIES: [(f64, LetterGrade); 3] = [
    (90.0, LetterGrade::A),
    (80.0, LetterGrade::B),
    (70.0, LetterGrade::C),
];

const AT_RISK_BELOW: f64 = 70.0;

/// Where an overall percentage sits relative to the letter boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Standing {
    /// Within `BOUNDARY_WINDOW` points below the next letter.
    NearBoundary {
        next_letter: LetterGrade,
        points_short: f64,
    },
    /// Below a C and not close to one.
    AtRisk,
    Secure,
}

impl Standing {
    pub fn classify(overall: f64) -> Self {
        for (boundary, letter) in WATCHED_BOUNDARIES {
            if overall < boundary && overall >= boundary - BOUNDARY_WINDOW {
                return Standing::NearBoundary {
                    next_letter: letter,
                    points_short: round_to_tenth(boundary - overall),
                };
            }
        }

        if overall < AT_RISK_BELOW {
            Standing::AtRisk
        } else {
            Standing::Secure
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Standing::NearBoundary {
                next_letter,
                points_short,
            } => format!("near {next_letter} boundary ({points_short} pts away)"),
            Standing::AtRisk => "at risk (below C)".to_string(),
            Standing::Secure => "secure".to_string(),
        }
    }
}

/// One course's line in a multi-course summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course: String,
    pub overall: Option<f64>,
    pub letter: Option<LetterGrade>,
    pub standing: Option<Standing>,
    /// Set when the course's input was rejected; the other fields are then empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CourseSummary {
    pub(crate) fn graded(course: String, result: &GradeResult) -> Self {
        Self {
            course,
            overall: result.overall,
            letter: result.letter,
            standing: result.overall.map(Standing::classify),
            error: None,
        }
    }

    pub(crate) fn rejected(course: String, error: String) -> Self {
        Self {
            course,
            overall: None,
            letter: None,
            standing: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_boundary_reports_gap_to_next_letter() {
        assert_eq!(
            Standing::classify(88.5),
            Standing::NearBoundary {
                next_letter: LetterGrade::A,
                points_short: 1.5
            }
        );
        assert_eq!(
            Standing::classify(77.0),
            Standing::NearBoundary {
                next_letter: LetterGrade::B,
                points_short: 3.0
            }
        );
    }

    #[test]
    fn near_c_takes_precedence_over_at_risk() {
        assert!(matches!(
            Standing::classify(68.0),
            Standing::NearBoundary {
                next_letter: LetterGrade::C,
                ..
            }
        ));
        assert_eq!(Standing::classify(66.9), Standing::AtRisk);
    }

    #[test]
    fn comfortable_grades_are_secure() {
        assert_eq!(Standing::classify(92.0), Standing::Secure);
        assert_eq!(Standing::classify(84.0), Standing::Secure);
        assert_eq!(Standing::classify(90.0), Standing::Secure);
    }

    #[test]
    fn standing_serializes_with_status_tag() {
        let value = serde_json::to_value(Standing::classify(88.0)).expect("serializes");
        assert_eq!(value["status"], "near_boundary");
        assert_eq!(value["next_letter"], "A");
        assert_eq!(value["points_short"], 2.0);
    }
}
