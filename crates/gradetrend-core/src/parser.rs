//! TOML course file parser.
//!
//! Loads raw course records from TOML files and directories, and validates
//! them before normalization.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::normalizer::{parse_score_text, parse_total_text, RawCourse, RawEvaluation, ScoreText};

/// Intermediate TOML structure for parsing course files.
#[derive(Debug, Deserialize)]
struct TomlCourseFile {
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    id: String,
    name: String,
    #[serde(default)]
    evaluations: Vec<TomlEvaluation>,
}

/// Scores and totals may be written as numbers or as the text an extractor
/// captured (`"-"`, `"8.5"`).
#[derive(Debug, Deserialize)]
struct TomlEvaluation {
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    score: Option<toml::Value>,
    #[serde(default)]
    total: Option<toml::Value>,
}

fn value_text(value: Option<toml::Value>) -> Option<String> {
    match value? {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parse a single TOML file into its raw courses.
pub fn parse_course_file(path: &Path) -> Result<Vec<RawCourse>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;

    parse_course_file_str(&content, path)
}

/// Parse a TOML string into raw courses (useful for testing).
pub fn parse_course_file_str(content: &str, source_path: &Path) -> Result<Vec<RawCourse>> {
    let parsed: TomlCourseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let courses = parsed
        .courses
        .into_iter()
        .map(|c| RawCourse {
            id: c.id,
            name: c.name,
            evaluations: c
                .evaluations
                .into_iter()
                .map(|e| RawEvaluation {
                    subtitle: e.subtitle,
                    label: e.label,
                    score: value_text(e.score),
                    total: value_text(e.total),
                })
                .collect(),
        })
        .collect();

    Ok(courses)
}

/// Recursively load all `.toml` course files from a directory.
pub fn load_course_directory(dir: &Path) -> Result<Vec<RawCourse>> {
    let mut courses = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            courses.extend(load_course_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_course_file(&path) {
                Ok(parsed) => courses.extend(parsed),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(courses)
}

/// Load a single file or every file under a directory.
pub fn load_courses(path: &Path) -> Result<Vec<RawCourse>> {
    if path.is_dir() {
        load_course_directory(path)
    } else {
        parse_course_file(path)
    }
}

/// A warning from course validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course ID (if applicable).
    pub course_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate raw courses for records that normalization would drop or
/// reinterpret.
pub fn validate_courses(courses: &[RawCourse]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |id: &str, message: String| ValidationWarning {
        course_id: Some(id.to_string()),
        message,
    };

    let mut seen_ids = std::collections::HashSet::new();
    for course in courses {
        if !seen_ids.insert(&course.id) {
            warnings.push(warn(&course.id, format!("duplicate course ID: {}", course.id)));
        }
    }

    for course in courses {
        if course.evaluations.is_empty() {
            warnings.push(warn(&course.id, "course has no evaluations".into()));
            continue;
        }

        let mut graded = 0;
        for (index, eval) in course.evaluations.iter().enumerate() {
            let position = index + 1;
            let total = match parse_total_text(eval.total.as_deref()) {
                Ok(total) => Some(total),
                Err(e) => {
                    warnings.push(warn(
                        &course.id,
                        format!("evaluation #{position} will be dropped: {e}"),
                    ));
                    None
                }
            };

            match parse_score_text(eval.score.as_deref()) {
                ScoreText::Value(score) => {
                    graded += 1;
                    if score < 0.0 {
                        warnings.push(warn(
                            &course.id,
                            format!("evaluation #{position} has a negative score ({score})"),
                        ));
                    }
                    if let Some(total) = total.filter(|t| score > *t) {
                        warnings.push(warn(
                            &course.id,
                            format!("evaluation #{position} scores {score} out of {total}"),
                        ));
                    }
                }
                ScoreText::Invalid => warnings.push(warn(
                    &course.id,
                    format!("evaluation #{position} has an unparseable score and is treated as pending"),
                )),
                ScoreText::Missing => {}
            }
        }

        if graded == 0 {
            warnings.push(warn(&course.id, "no evaluations have been graded yet".into()));
        }
    }

    warnings
}
