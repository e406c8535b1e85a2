use schoolpilot::grades::{Category, Course, GradeEngine, GradebookImportError, GradebookImporter};
use std::io::Cursor;

const EXPORT: &str = "\
Category,Name,Score,Max
Unit Tests,Unit 1 Test,87/100,
unit  tests,Unit 2 Test,74,80
Homework,HW 1,90%,
Homework,HW 2,,20
Extra Credit,Bonus,5,5
";

fn categories() -> Vec<Category> {
    vec![
        Category::new("Unit Tests", 0.7),
        Category::new("Homework", 0.3),
    ]
}

#[test]
fn imported_grades_feed_the_engine() {
    let grades = GradebookImporter::from_reader(Cursor::new(EXPORT), &categories())
        .expect("import succeeds");
    assert_eq!(grades.len(), 4);
    assert!(grades.iter().take(2).all(|g| g.category == "Unit Tests"));

    let result = GradeEngine::default()
        .calculate(&Course::new(categories(), grades))
        .expect("calculates");
    // Unit Tests 161/180, Homework 90/100; the Extra Credit row is orphaned.
    let expected: f64 = 161.0 / 180.0 * 100.0 * 0.7 + 90.0 * 0.3;
    assert_eq!(result.overall, Some((expected * 10.0).round() / 10.0));
    assert!(!result.categories.contains_key("Extra Credit"));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = GradebookImporter::from_path("does/not/exist.csv", &categories());
    assert!(matches!(result, Err(GradebookImportError::Io(_))));
}
