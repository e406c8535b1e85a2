use metrics_exporter_prometheus::PrometheusHandle;
use schoolpilot::error::AppError;
use schoolpilot::grades::{Course, GradeEntry};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load a course definition (`categories`, `grades`, `policies`) from a JSON file.
pub(crate) fn read_course(path: &Path) -> Result<Course, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let course = serde_json::from_str(&raw)?;
    Ok(course)
}

/// Parse `<category>:<name>:<score>/<max>` into a grade entry. The name may be empty.
pub(crate) fn parse_hypothetical(raw: &str) -> Result<GradeEntry, String> {
    let mut parts = raw.rsplitn(2, ':');
    let points = parts.next().unwrap_or_default().trim();
    let label = parts
        .next()
        .ok_or_else(|| format!("'{raw}' must look like <category>:<name>:<score>/<max>"))?;

    let (category, name) = label.split_once(':').unwrap_or((label, ""));
    let category = category.trim();
    if category.is_empty() {
        return Err(format!("'{raw}' is missing a category"));
    }

    let (score, max) = points
        .split_once('/')
        .ok_or_else(|| format!("'{points}' must be <score>/<max>"))?;
    let score = parse_number(score)?;
    let max = parse_number(max)?;

    Ok(GradeEntry::new(category, name.trim(), score, max))
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{}' as a number ({err})", raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hypotheticals() {
        assert_eq!(
            parse_hypothetical("Tests:Unit 3 Test:85/100"),
            Ok(GradeEntry::new("Tests", "Unit 3 Test", 85.0, 100.0))
        );
        assert_eq!(
            parse_hypothetical("Homework:9.5/10"),
            Ok(GradeEntry::new("Homework", "", 9.5, 10.0))
        );
        assert_eq!(
            parse_hypothetical("Tests:Ch. 2: Review:40/50"),
            Ok(GradeEntry::new("Tests", "Ch. 2: Review", 40.0, 50.0))
        );
    }

    #[test]
    fn rejects_malformed_hypotheticals() {
        assert!(parse_hypothetical("85/100").is_err());
        assert!(parse_hypothetical(":HW:9/10").is_err());
        assert!(parse_hypothetical("Tests:T1:85").is_err());
        assert!(parse_hypothetical("Tests:T1:a/100").is_err());
    }
}
