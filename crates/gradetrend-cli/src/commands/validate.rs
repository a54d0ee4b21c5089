//! The `gradetrend validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradetrend_core::parser::{load_courses, validate_courses};

pub fn execute(courses_path: PathBuf) -> Result<()> {
    let courses = load_courses(&courses_path)?;

    for course in &courses {
        println!(
            "Course: {} ({} evaluations)",
            course.name,
            course.evaluations.len()
        );
    }

    let warnings = validate_courses(&courses);
    for w in &warnings {
        let prefix = w
            .course_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All course files valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
