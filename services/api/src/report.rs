use crate::infra::{parse_hypothetical, read_course};
use clap::Args;
use schoolpilot::config::AppConfig;
use schoolpilot::error::AppError;
use schoolpilot::grades::{
    Course, GradeEngine, GradeEntry, GradeResult, GradebookImporter, RequiredScore,
    RequiredScoreQuery, Standing, WhatIfProjection,
};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Course JSON file with categories, grades, and policies
    #[arg(long)]
    pub(crate) course: PathBuf,
    /// Optional CSV gradebook export merged into the course grades
    #[arg(long)]
    pub(crate) grades_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RequiredArgs {
    /// Course JSON file with categories, grades, and policies
    #[arg(long)]
    pub(crate) course: PathBuf,
    /// Target overall percentage
    #[arg(long)]
    pub(crate) target: f64,
    /// Category of the next assessment
    #[arg(long)]
    pub(crate) category: String,
    /// Points possible on the next assessment (defaults to APP_GRADES_DEFAULT_MAX)
    #[arg(long)]
    pub(crate) max_score: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct WhatIfArgs {
    /// Course JSON file with categories, grades, and policies
    #[arg(long)]
    pub(crate) course: PathBuf,
    /// Hypothetical score as <category>:<name>:<score>/<max>; repeatable
    #[arg(long = "hypothetical", required = true, value_parser = parse_hypothetical)]
    pub(crate) hypotheticals: Vec<GradeEntry>,
}

fn engine_from_env() -> Result<GradeEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(GradeEngine::new(config.grading))
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs { course, grades_csv } = args;
    let mut course = read_course(&course)?;
    if let Some(path) = grades_csv {
        let imported = GradebookImporter::from_path(path, &course.categories)?;
        course.grades.extend(imported);
    }

    let result = engine_from_env()?.calculate(&course)?;
    print!("{}", render_grade_result(&course, &result));
    Ok(())
}

pub(crate) fn run_required(args: RequiredArgs) -> Result<(), AppError> {
    let RequiredArgs {
        course,
        target,
        category,
        max_score,
    } = args;
    let course = read_course(&course)?;
    let query = RequiredScoreQuery {
        target,
        category,
        max_score,
    };

    let result = engine_from_env()?.required_score(&course, &query)?;
    print!("{}", render_required_score(&query, &result));
    Ok(())
}

pub(crate) fn run_what_if(args: WhatIfArgs) -> Result<(), AppError> {
    let WhatIfArgs {
        course,
        hypotheticals,
    } = args;
    let course = read_course(&course)?;

    let projection = engine_from_env()?.what_if(&course, &hypotheticals)?;
    print!("{}", render_projection(&hypotheticals, &projection));
    Ok(())
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.1}%"),
        None => "--".to_string(),
    }
}

pub(crate) fn render_grade_result(course: &Course, result: &GradeResult) -> String {
    let mut out = String::new();
    let letter = result
        .letter
        .map(|letter| letter.to_string())
        .unwrap_or_else(|| "--".to_string());

    writeln!(&mut out, "Current grade").expect("write heading");
    writeln!(&mut out, "Overall: {} ({letter})", percent(result.overall)).expect("write overall");
    writeln!(
        &mut out,
        "Weight coverage: {:.1}% of declared weight graded",
        result.weight_coverage
    )
    .expect("write coverage");
    if let Some(overall) = result.overall {
        writeln!(&mut out, "Standing: {}", Standing::classify(overall).summary())
            .expect("write standing");
    }

    out.push_str("\nCategories\n");
    for category in &course.categories {
        if let Some(line) = result.categories.get(&category.name) {
            writeln!(
                &mut out,
                "- {} ({:.0}%): {} across {} assignment(s)",
                category.name,
                line.weight * 100.0,
                percent(line.average),
                line.assignments
            )
            .expect("write category");
        }
    }

    out
}

pub(crate) fn render_required_score(query: &RequiredScoreQuery, result: &RequiredScore) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "Required score for {}% overall via {}",
        query.target, query.category
    )
    .expect("write heading");
    writeln!(
        &mut out,
        "Needed on next assessment: {}",
        percent(result.required_pct)
    )
    .expect("write required");
    let achievable = if result.achievable { "yes" } else { "no" };
    writeln!(&mut out, "Achievable: {achievable}").expect("write achievable");
    writeln!(&mut out, "{}", result.explanation).expect("write explanation");
    out
}

pub(crate) fn render_projection(hypotheticals: &[GradeEntry], projection: &WhatIfProjection) -> String {
    let mut out = String::new();
    writeln!(&mut out, "What-if projection").expect("write heading");
    for entry in hypotheticals {
        writeln!(
            &mut out,
            "- {} / {}: {}/{}",
            entry.category, entry.name, entry.score, entry.max
        )
        .expect("write hypothetical");
    }

    let letter = projection
        .projected_letter
        .map(|letter| letter.to_string())
        .unwrap_or_else(|| "--".to_string());
    let change = match projection.change {
        Some(change) => format!("{change:+.1} pts"),
        None => "n/a".to_string(),
    };

    out.push('\n');
    writeln!(&mut out, "Current: {}", percent(projection.current)).expect("write current");
    writeln!(
        &mut out,
        "Projected: {} ({letter})",
        percent(projection.projected)
    )
    .expect("write projected");
    writeln!(&mut out, "Change: {change}").expect("write change");
    out
}
