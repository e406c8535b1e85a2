use super::common::*;
use crate::grades::{Category, Course, GradeError, GradePolicies, LetterGrade};

#[test]
fn single_category_uses_its_average() {
    let course = Course::new(
        vec![Category::new("Tests", 1.0)],
        vec![grade("Tests", "T1", 90.0, 100.0)],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(90.0));
    assert_eq!(result.letter, Some(LetterGrade::A));
}

#[test]
fn categories_combine_by_weight() {
    let course = Course::new(
        tests_and_homework(),
        vec![
            grade("Tests", "T1", 80.0, 100.0),
            grade("Homework", "HW1", 100.0, 100.0),
        ],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(88.0));
    assert_eq!(result.letter, Some(LetterGrade::B));
    assert_eq!(result.weight_coverage, 100.0);
}

#[test]
fn category_average_pools_points() {
    let course = Course::new(
        vec![Category::new("Quizzes", 1.0)],
        vec![grade("Quizzes", "Q1", 9.0, 10.0), grade("Quizzes", "Q2", 45.0, 50.0)],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.categories["Quizzes"].average, Some(90.0));

    let course = Course::new(
        vec![Category::new("Quizzes", 1.0)],
        vec![grade("Quizzes", "Q1", 9.0, 10.0), grade("Quizzes", "Q2", 5.0, 5.0)],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.categories["Quizzes"].average, Some(93.3));
    assert_eq!(result.overall, Some(93.3));
}

#[test]
fn empty_categories_are_renormalized_away() {
    let course = Course::new(
        vec![Category::new("Tests", 0.4), Category::new("HW", 0.6)],
        vec![grade("Tests", "T1", 80.0, 100.0)],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(80.0));
    assert_eq!(result.weight_coverage, 40.0);

    let hw = &result.categories["HW"];
    assert_eq!(hw.average, None);
    assert_eq!(hw.assignments, 0);
    assert_eq!(hw.weight, 0.6);
}

#[test]
fn no_grades_yields_no_overall() {
    let course = Course::new(tests_and_homework(), Vec::new());
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, None);
    assert_eq!(result.letter, None);
    assert_eq!(result.weight_coverage, 0.0);
}

#[test]
fn orphaned_entries_are_ignored() {
    let mut course = midterm_course();
    course.grades.push(grade("Labs", "Lab 1", 0.0, 100.0));
    let with_orphan = engine().calculate(&course).expect("calculates");
    let without_orphan = engine().calculate(&midterm_course()).expect("calculates");
    assert_eq!(with_orphan, without_orphan);
    assert!(!with_orphan.categories.contains_key("Labs"));

    let only_orphans = Course::new(tests_and_homework(), vec![grade("Labs", "Lab 1", 50.0, 100.0)]);
    let result = engine().calculate(&only_orphans).expect("calculates");
    assert_eq!(result.overall, None);
}

#[test]
fn unnormalized_weights_are_tolerated() {
    let course = Course::new(
        vec![Category::new("Tests", 0.5), Category::new("Homework", 0.25)],
        vec![
            grade("Tests", "T1", 90.0, 100.0),
            grade("Homework", "HW1", 60.0, 100.0),
        ],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(80.0));
}

#[test]
fn rounding_precedes_letter_assignment() {
    let course = Course::new(
        vec![Category::new("Tests", 1.0)],
        vec![grade("Tests", "T1", 8995.0, 10000.0)],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(90.0));
    assert_eq!(result.letter, Some(LetterGrade::A));

    let course = Course::new(
        vec![Category::new("Tests", 1.0)],
        vec![grade("Tests", "T1", 8994.0, 10000.0)],
    );
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(89.9));
    assert_eq!(result.letter, Some(LetterGrade::B));
}

#[test]
fn calculate_is_idempotent() {
    let course = midterm_course();
    let first = engine().calculate(&course).expect("calculates");
    let second = engine().calculate(&course).expect("calculates");
    assert_eq!(first, second);
    assert_eq!(
        first.overall.map(f64::to_bits),
        second.overall.map(f64::to_bits)
    );
}

#[test]
fn drop_lowest_discards_weakest_entries() {
    let course = Course::new(
        vec![Category::new("Quizzes", 1.0)],
        vec![
            grade("Quizzes", "Q1", 50.0, 100.0),
            grade("Quizzes", "Q2", 90.0, 100.0),
            grade("Quizzes", "Q3", 80.0, 100.0),
        ],
    )
    .with_policies(GradePolicies::default().with_drop_lowest("Quizzes", 1));
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(85.0));
    assert_eq!(result.categories["Quizzes"].assignments, 3);
}

#[test]
fn drop_lowest_needs_more_entries_than_it_drops() {
    let course = Course::new(
        vec![Category::new("Quizzes", 1.0)],
        vec![grade("Quizzes", "Q1", 70.0, 100.0)],
    )
    .with_policies(GradePolicies::default().with_drop_lowest("Quizzes", 1));
    let result = engine().calculate(&course).expect("calculates");
    assert_eq!(result.overall, Some(70.0));
}

#[test]
fn overflowing_totals_fail_instead_of_grading() {
    let course = Course::new(
        vec![Category::new("Tests", 1.0)],
        vec![grade("Tests", "T1", 1e308, 1.0), grade("Tests", "T2", 1e308, 1.0)],
    );
    let err = engine().calculate(&course).expect_err("overflow rejected");
    assert_eq!(err.field(), "grades");

    let course = Course::new(
        vec![Category::new("Tests", 1.0)],
        vec![
            grade("Tests", "T1", 1e308, 1e308),
            grade("Tests", "T2", 1e308, 1e308),
        ],
    );
    let err = engine().calculate(&course).expect_err("nan rejected");
    assert_eq!(err.field(), "grades");

    let err = engine()
        .what_if(&midterm_course(), &[grade("Tests", "T2", f64::MAX, 1.0)])
        .expect_err("projection overflow rejected");
    assert_eq!(err.field(), "grades");
}

#[test]
fn invalid_input_is_rejected_with_field() {
    let empty = Course::new(Vec::new(), Vec::new());
    let err = engine().calculate(&empty).expect_err("empty categories rejected");
    assert_eq!(err.field(), "categories");

    let mut zero_max = midterm_course();
    zero_max.grades.push(grade("Tests", "T2", 0.0, 0.0));
    let err = engine().calculate(&zero_max).expect_err("zero max rejected");
    assert_eq!(err.field(), "grades[2].max");

    let mut nan_score = midterm_course();
    nan_score.grades[0].score = f64::NAN;
    let err = engine().calculate(&nan_score).expect_err("nan rejected");
    assert!(matches!(err, GradeError::InvalidInput { ref field, .. } if field == "grades[0].score"));

    let duplicate = Course::new(
        vec![Category::new("Tests", 0.5), Category::new("Tests", 0.5)],
        Vec::new(),
    );
    let err = engine().calculate(&duplicate).expect_err("duplicates rejected");
    assert_eq!(err.field(), "categories[1].name");

    let negative_weight = Course::new(vec![Category::new("Tests", -0.1)], Vec::new());
    assert!(engine().calculate(&negative_weight).is_err());
}
