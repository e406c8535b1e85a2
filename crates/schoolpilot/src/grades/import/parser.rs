use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One graded row of a gradebook export.
#[derive(Debug)]
pub(crate) struct GradebookRecord {
    pub(crate) row: usize,
    pub(crate) category: String,
    pub(crate) name: String,
    pub(crate) score: f64,
    pub(crate) max: f64,
}

#[derive(Debug)]
pub(crate) enum RowError {
    Csv(csv::Error),
    Invalid { row: usize, reason: String },
}

impl From<csv::Error> for RowError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Parse rows, skipping ungraded ones (blank score). Row numbers count the header as row 1.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<GradebookRecord>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<GradebookRow>().enumerate() {
        let row_number = index + 2;
        let row = row?;
        let Some(raw_score) = row.score else {
            continue;
        };

        let (score, max) = parse_score(&raw_score, row.max.as_deref()).map_err(|reason| {
            RowError::Invalid {
                row: row_number,
                reason,
            }
        })?;

        records.push(GradebookRecord {
            row: row_number,
            category: row.category,
            name: row.name.unwrap_or_default(),
            score,
            max,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct GradebookRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
    #[serde(rename = "Max", default, deserialize_with = "empty_string_as_none")]
    max: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `"87"` with a separate max, `"87/100"`, or `"87%"` (out of 100).
fn parse_score(raw: &str, max: Option<&str>) -> Result<(f64, f64), String> {
    let raw = raw.trim();

    let (score, max) = if let Some((score, inline_max)) = raw.split_once('/') {
        (parse_number(score, "score")?, parse_number(inline_max, "max")?)
    } else if let Some(percent) = raw.strip_suffix('%') {
        (parse_number(percent, "score")?, 100.0)
    } else {
        let max = max.ok_or_else(|| format!("score '{raw}' has no max"))?;
        (parse_number(raw, "score")?, parse_number(max, "max")?)
    };

    if max <= 0.0 {
        return Err(format!("max must be positive, got {max}"));
    }
    if score < 0.0 {
        return Err(format!("score must not be negative, got {score}"));
    }
    Ok((score, max))
}

fn parse_number(raw: &str, label: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{label} '{}' is not a number", raw.trim()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{label} '{}' is not finite", raw.trim()))
    }
}

#[cfg(test)]
pub(crate) fn parse_score_for_tests(raw: &str, max: Option<&str>) -> Result<(f64, f64), String> {
    parse_score(raw, max)
}
