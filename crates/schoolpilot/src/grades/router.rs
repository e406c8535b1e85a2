use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Course, GradeEntry};
use super::import::GradebookImporter;
use super::required::RequiredScoreQuery;
use super::standing::CourseSummary;
use super::GradeEngine;

/// `POST /api/v1/grades/calculate` body. `grades_csv` entries are appended to `grades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(flatten)]
    pub course: Course,
    #[serde(default)]
    pub grades_csv: Option<String>,
}

/// `POST /api/v1/grades/required` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredScoreRequest {
    #[serde(flatten)]
    pub course: Course,
    #[serde(flatten)]
    pub query: RequiredScoreQuery,
}

/// `POST /api/v1/grades/whatif` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfRequest {
    #[serde(flatten)]
    pub course: Course,
    pub hypotheticals: Vec<GradeEntry>,
}

/// `POST /api/v1/grades/summary` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub courses: BTreeMap<String, Course>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub courses: Vec<CourseSummary>,
}

/// Router exposing the grade engine as JSON endpoints.
pub fn grade_router(engine: Arc<GradeEngine>) -> Router {
    Router::new()
        .route("/api/v1/grades/calculate", post(calculate_handler))
        .route("/api/v1/grades/required", post(required_handler))
        .route("/api/v1/grades/whatif", post(what_if_handler))
        .route("/api/v1/grades/summary", post(summary_handler))
        .with_state(engine)
}

pub(crate) async fn calculate_handler(
    State(engine): State<Arc<GradeEngine>>,
    Json(request): Json<CalculateRequest>,
) -> Response {
    let CalculateRequest {
        mut course,
        grades_csv,
    } = request;

    if let Some(csv) = grades_csv {
        match GradebookImporter::from_reader(Cursor::new(csv.into_bytes()), &course.categories) {
            Ok(imported) => course.grades.extend(imported),
            Err(err) => return rejected(err),
        }
    }

    match engine.calculate(&course) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => rejected(err),
    }
}

pub(crate) async fn required_handler(
    State(engine): State<Arc<GradeEngine>>,
    Json(request): Json<RequiredScoreRequest>,
) -> Response {
    match engine.required_score(&request.course, &request.query) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => rejected(err),
    }
}

pub(crate) async fn what_if_handler(
    State(engine): State<Arc<GradeEngine>>,
    Json(request): Json<WhatIfRequest>,
) -> Response {
    match engine.what_if(&request.course, &request.hypotheticals) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => rejected(err),
    }
}

pub(crate) async fn summary_handler(
    State(engine): State<Arc<GradeEngine>>,
    Json(request): Json<SummaryRequest>,
) -> Response {
    let courses = engine.summarize(&request.courses);
    (StatusCode::OK, Json(SummaryResponse { courses })).into_response()
}

fn rejected(err: impl std::error::Error) -> Response {
    tracing::warn!(error = %err, "rejected grade request");
    let payload = json!({
        "error": err.to_string(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
