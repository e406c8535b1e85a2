use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::grades::{grade_router, Category, Course, GradeEngine, GradeEntry, GradingConfig};

pub(super) fn tests_and_homework() -> Vec<Category> {
    vec![Category::new("Tests", 0.6), Category::new("Homework", 0.4)]
}

pub(super) fn grade(category: &str, name: &str, score: f64, max: f64) -> GradeEntry {
    GradeEntry::new(category, name, score, max)
}

/// Tests 80/100, Homework 95/100 under a 60/40 split: overall 86.0.
pub(super) fn midterm_course() -> Course {
    Course::new(
        tests_and_homework(),
        vec![
            grade("Tests", "Unit 1 Test", 80.0, 100.0),
            grade("Homework", "HW 1", 95.0, 100.0),
        ],
    )
}

/// Tests at 80% carrying 0.8, an empty Final carrying 0.2.
pub(super) fn final_pending_course() -> Course {
    Course::new(
        vec![Category::new("Tests", 0.8), Category::new("Final", 0.2)],
        vec![grade("Tests", "Unit 1 Test", 80.0, 100.0)],
    )
}

pub(super) fn engine() -> GradeEngine {
    GradeEngine::new(GradingConfig::default())
}

pub(super) fn router() -> axum::Router {
    grade_router(Arc::new(engine()))
}

pub(super) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
