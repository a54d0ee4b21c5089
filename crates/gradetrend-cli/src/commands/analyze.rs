//! The `gradetrend analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use gradetrend_core::config::{load_config_from, Target};
use gradetrend_core::normalizer::normalize_course;
use gradetrend_core::parser::load_courses;
use gradetrend_core::report::{build_report, CourseSummary};

pub fn execute(
    courses_path: PathBuf,
    targets: Vec<String>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let targets = if targets.is_empty() {
        config.targets.clone()
    } else {
        targets
            .iter()
            .map(|t| t.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
            .collect::<Result<Vec<Target>>>()?
    };

    let raw = load_courses(&courses_path)?;
    tracing::info!("loaded {} course(s) from {}", raw.len(), courses_path.display());

    let courses: Vec<_> = raw.iter().map(normalize_course).collect();
    let report = build_report(&courses, &targets);

    if let Some(path) = &output {
        report.save_json(path)?;
        tracing::info!("report written to {}", path.display());
    }

    match format.as_str() {
        "json" => println!("{}", report.to_json()?),
        "text" => {
            if report.courses.is_empty() {
                println!("No courses with evaluations found.");
            }
            for summary in &report.courses {
                print_summary(summary, config.precision);
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_summary(summary: &CourseSummary, precision: usize) {
    let trend = &summary.trend;
    println!(
        "{} ({}/{} evaluations graded)",
        summary.name,
        summary.completed,
        summary.completed + summary.pending
    );
    println!(
        "  Current trend: {:.p$}% ({})",
        trend.current_trend,
        if trend.is_passing() { "passing" } else { "failing" },
        p = precision
    );
    println!(
        "  Remaining: {:.p$}%",
        trend.remaining_percentage,
        p = precision
    );
    for t in &summary.targets {
        println!(
            "  Required for {}: {:.p$}% ({})",
            t.label,
            t.required,
            t.outlook,
            p = precision
        );
    }
}
