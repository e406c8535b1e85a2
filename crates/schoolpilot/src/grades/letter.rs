use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade derived from a rounded overall percentage. No plus/minus variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Lowest percentage that still earns each passing letter, highest first.
    pub const THRESHOLDS: [(f64, LetterGrade); 4] = [
        (90.0, LetterGrade::A),
        (80.0, LetterGrade::B),
        (70.0, LetterGrade::C),
        (60.0, LetterGrade::D),
    ];

    /// Callers pass the already-rounded percentage; rounding happens before thresholding.
    pub fn from_percentage(pct: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(floor, _)| pct >= *floor)
            .map(|(_, letter)| *letter)
            .unwrap_or(LetterGrade::F)
    }

    pub const fn label(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round to one decimal place, half away from zero. Negative zero collapses to zero.
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Render a percentage or point value for explanations: "93.3", "100".
pub(crate) fn display_number(value: f64) -> String {
    let rounded = round_to_tenth(value);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_map_to_letters() {
        let cases = [
            (100.0, LetterGrade::A),
            (90.0, LetterGrade::A),
            (89.9, LetterGrade::B),
            (80.0, LetterGrade::B),
            (79.9, LetterGrade::C),
            (70.0, LetterGrade::C),
            (69.9, LetterGrade::D),
            (60.0, LetterGrade::D),
            (59.9, LetterGrade::F),
            (0.0, LetterGrade::F),
        ];
        for (pct, expected) in cases {
            assert_eq!(LetterGrade::from_percentage(pct), expected, "pct {pct}");
        }
    }

    #[test]
    fn rounding_happens_before_thresholding() {
        assert_eq!(round_to_tenth(89.95), 90.0);
        assert_eq!(
            LetterGrade::from_percentage(round_to_tenth(89.95)),
            LetterGrade::A
        );
        assert_eq!(round_to_tenth(89.94), 89.9);
        assert_eq!(
            LetterGrade::from_percentage(round_to_tenth(89.94)),
            LetterGrade::B
        );
    }

    #[test]
    fn negative_zero_is_normalized() {
        let value = round_to_tenth(-0.01);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn display_number_trims_whole_values() {
        assert_eq!(display_number(100.0), "100");
        assert_eq!(display_number(93.333), "93.3");
        assert_eq!(display_number(-20.0), "-20");
    }

    #[test]
    fn letters_serialize_as_plain_strings() {
        let json = serde_json::to_string(&LetterGrade::B).expect("serializes");
        assert_eq!(json, "\"B\"");
    }
}
