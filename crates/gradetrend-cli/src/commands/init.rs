//! The `gradetrend init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradetrend.toml").exists() {
        println!("gradetrend.toml already exists, skipping.");
    } else {
        std::fs::write("gradetrend.toml", SAMPLE_CONFIG)?;
        println!("Created gradetrend.toml");
    }

    std::fs::create_dir_all("courses")?;
    let example_path = std::path::Path::new("courses/example.toml");
    if example_path.exists() {
        println!("courses/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_COURSES)?;
        println!("Created courses/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Fill in courses/example.toml with your evaluations");
    println!("  2. Run: gradetrend validate --courses courses/example.toml");
    println!("  3. Run: gradetrend analyze --courses courses/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradetrend configuration

precision = 1

[[targets]]
label = "D"
percentage = 50

[[targets]]
label = "A"
percentage = 90
"#;

const EXAMPLE_COURSES: &str = r#"# Scores of "-" or missing scores mark evaluations that are not graded yet.

[[courses]]
id = "example-101"
name = "Example Course"

[[courses.evaluations]]
subtitle = "Quiz"
label = "Week 1"
score = 8
total = 10

[[courses.evaluations]]
subtitle = "Quiz"
label = "Week 2"
score = 6.5
total = 10

[[courses.evaluations]]
label = "Midterm"
score = "-"
total = 30

[[courses.evaluations]]
label = "Final exam"
total = 50
"#;
