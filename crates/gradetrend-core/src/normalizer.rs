//! Raw text to evaluation records.
//!
//! Extractors hand over whatever text they found for an item's subtitle,
//! label, score, and total. This module applies the same acceptance rules for
//! every source: a record needs a positive numeric total, and a score of `-`,
//! empty, or unparseable text means the item is still pending. Numbers are
//! read from the start of the text, so trailing units are ignored.

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::model::{Course, Evaluation, Grade};

/// Name used when neither a subtitle nor a label was found.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Unprocessed text for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvaluation {
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

/// Unprocessed course as extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCourse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub evaluations: Vec<RawEvaluation>,
}

/// Classification of a score cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreText {
    /// Empty or `-`: not graded yet.
    Missing,
    Value(f64),
    /// Present but not a number.
    Invalid,
}

pub fn parse_score_text(text: Option<&str>) -> ScoreText {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() || text == "-" {
        return ScoreText::Missing;
    }
    match leading_number(text) {
        Some(value) if value.is_finite() => ScoreText::Value(value),
        _ => ScoreText::Invalid,
    }
}

/// Parse the numeric prefix of `text`, ignoring trailing units such as
/// `"20 pts"`. Returns `None` when the text does not start with a number.
pub fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    text[..end].parse().ok()
}

/// Parse a total, which must be a finite number above zero.
pub fn parse_total_text(text: Option<&str>) -> Result<f64, NormalizeError> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(NormalizeError::MissingTotal);
    }
    let total = leading_number(text)
        .ok_or_else(|| NormalizeError::InvalidTotal(text.to_string()))?;
    if total.is_finite() && total > 0.0 {
        Ok(total)
    } else {
        Err(NormalizeError::NonPositiveTotal(total))
    }
}

/// Display name for an evaluation: `"<subtitle> - <label>"` when both are
/// present, otherwise whichever one is, otherwise [`UNKNOWN_NAME`].
pub fn evaluation_name(subtitle: Option<&str>, label: Option<&str>) -> String {
    let subtitle = subtitle.map(str::trim).filter(|s| !s.is_empty());
    let label = label.map(str::trim).filter(|s| !s.is_empty());
    match (subtitle, label) {
        (Some(subtitle), Some(label)) => format!("{subtitle} - {label}"),
        (None, Some(only)) | (Some(only), None) => only.to_string(),
        (None, None) => UNKNOWN_NAME.to_string(),
    }
}

pub fn normalize_evaluation(raw: &RawEvaluation) -> Result<Evaluation, NormalizeError> {
    let total = parse_total_text(raw.total.as_deref())?;
    let name = evaluation_name(raw.subtitle.as_deref(), raw.label.as_deref());
    let grade = match parse_score_text(raw.score.as_deref()) {
        ScoreText::Value(score) => Grade::Completed { score, total },
        ScoreText::Missing | ScoreText::Invalid => Grade::Pending { total },
    };
    Ok(Evaluation { name, grade })
}

/// Normalize every record of a course, dropping the ones without a usable
/// total. Document order is preserved.
pub fn normalize_course(raw: &RawCourse) -> Course {
    let evaluations: Vec<Evaluation> = raw
        .evaluations
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_evaluation(record) {
            Ok(evaluation) => Some(evaluation),
            Err(e) => {
                tracing::warn!(course = %raw.id, index, "dropping evaluation: {e}");
                None
            }
        })
        .collect();

    let completed = evaluations.iter().filter(|e| e.is_completed()).count();
    tracing::debug!(
        course = %raw.id,
        completed,
        total = evaluations.len(),
        "normalized course"
    );

    Course {
        id: raw.id.clone(),
        name: raw.name.trim().to_string(),
        evaluations,
    }
}
