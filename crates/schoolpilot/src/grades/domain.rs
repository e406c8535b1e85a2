use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Weighted grading bucket within a course (e.g. "Tests" at 40%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub weight: f64,
}

impl Category {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Recorded or hypothetical score against a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub category: String,
    #[serde(default)]
    pub name: String,
    pub score: f64,
    pub max: f64,
}

impl GradeEntry {
    pub fn new(category: impl Into<String>, name: impl Into<String>, score: f64, max: f64) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            score,
            max,
        }
    }

    /// Score as a fraction of the entry's own maximum; used to rank entries for drop-lowest.
    pub fn fraction(&self) -> f64 {
        self.score / self.max
    }
}

/// Course-level grading policies.
///
/// `marzano` and `importance` only change how the dashboard labels results; the engine computes
/// on a 0-100 percentage basis regardless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradePolicies {
    /// Number of lowest-percentage entries to discard per category.
    #[serde(default)]
    pub drop_lowest: BTreeMap<String, usize>,
    #[serde(default)]
    pub marzano: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
}

impl GradePolicies {
    pub fn drop_count(&self, category: &str) -> usize {
        self.drop_lowest.get(category).copied().unwrap_or(0)
    }

    pub fn with_drop_lowest(mut self, category: impl Into<String>, count: usize) -> Self {
        self.drop_lowest.insert(category.into(), count);
        self
    }
}

/// Full grading state for one course, passed in whole on every engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub grades: Vec<GradeEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub policies: GradePolicies,
}

impl Course {
    pub fn new(categories: Vec<Category>, grades: Vec<GradeEntry>) -> Self {
        Self {
            categories,
            grades,
            policies: GradePolicies::default(),
        }
    }

    pub fn with_policies(mut self, policies: GradePolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
