use serde::{Deserialize, Serialize};

pub const DEFAULT_ACHIEVABILITY_EPSILON: f64 = 1e-6;
pub const DEFAULT_ASSUMED_MAX: f64 = 100.0;

/// Tunables for the grade engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Slack allowed around 0% and 100% before a required score flips category.
    pub achievability_epsilon: f64,
    /// Points possible on the next entry when a query omits `max_score`.
    pub default_assumed_max: f64,
}

impl GradingConfig {
    /// Out-of-range values fall back to the defaults.
    pub fn sanitized(self) -> Self {
        let achievability_epsilon =
            if self.achievability_epsilon.is_finite() && self.achievability_epsilon >= 0.0 {
                self.achievability_epsilon
            } else {
                DEFAULT_ACHIEVABILITY_EPSILON
            };
        let default_assumed_max =
            if self.default_assumed_max.is_finite() && self.default_assumed_max > 0.0 {
                self.default_assumed_max
            } else {
                DEFAULT_ASSUMED_MAX
            };

        Self {
            achievability_epsilon,
            default_assumed_max,
        }
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            achievability_epsilon: DEFAULT_ACHIEVABILITY_EPSILON,
            default_assumed_max: DEFAULT_ASSUMED_MAX,
        }
    }
}
