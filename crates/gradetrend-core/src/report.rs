//! Per-course trend summaries with JSON output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Target;
use crate::model::{Course, TrendResult};
use crate::trends::{compute_required_trend, compute_trends, Outlook};

/// Required rate for one configured target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRequirement {
    pub label: String,
    pub percentage: f64,
    /// Rate needed on the remaining work.
    pub required: f64,
    pub outlook: Outlook,
}

/// Trend analysis for one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: String,
    pub name: String,
    /// Graded evaluations.
    pub completed: usize,
    /// Evaluations awaiting a score.
    pub pending: usize,
    pub trend: TrendResult,
    pub targets: Vec<TargetRequirement>,
}

impl CourseSummary {
    /// Analyze one course against the given targets.
    pub fn analyze(course: &Course, targets: &[Target]) -> Self {
        let trend = compute_trends(&course.evaluations);
        let targets = targets
            .iter()
            .map(|t| {
                let required = compute_required_trend(&course.evaluations, t.percentage);
                TargetRequirement {
                    label: t.label.clone(),
                    percentage: t.percentage,
                    required,
                    outlook: Outlook::for_required(required),
                }
            })
            .collect();

        Self {
            id: course.id.clone(),
            name: course.name.clone(),
            completed: course.completed_count(),
            pending: course.pending_count(),
            trend,
            targets,
        }
    }
}

/// Trend summaries for a set of courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    pub courses: Vec<CourseSummary>,
}

/// Analyze every course that has at least one evaluation.
pub fn build_report(courses: &[Course], targets: &[Target]) -> TrendReport {
    let summaries = courses
        .iter()
        .filter(|course| {
            if course.evaluations.is_empty() {
                tracing::info!("skipping {} - no evaluations", course.id);
                false
            } else {
                true
            }
        })
        .map(|course| {
            let summary = CourseSummary::analyze(course, targets);
            tracing::info!(
                course = %course.id,
                current_trend = summary.trend.current_trend,
                required_trend = summary.trend.required_trend,
                "analyzed course"
            );
            summary
        })
        .collect();

    TrendReport {
        generated_at: Utc::now(),
        courses: summaries,
    }
}

impl TrendReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
