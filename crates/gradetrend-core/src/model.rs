//! Core data model types for gradetrend.
//!
//! These are the fundamental types that the trend engine consumes and
//! produces: graded items, courses, and the derived trend result.

use serde::{Deserialize, Serialize};

/// Grading status of a single evaluation.
///
/// A pending evaluation still counts toward the course's weighting but has
/// no score yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Grade {
    /// Graded: points earned out of the item's maximum.
    Completed { score: f64, total: f64 },
    /// Not yet graded; only the maximum is known.
    Pending { total: f64 },
}

impl Grade {
    /// Maximum points for this item.
    pub fn total(&self) -> f64 {
        match self {
            Grade::Completed { total, .. } | Grade::Pending { total } => *total,
        }
    }
}

/// One graded or gradeable item (assignment, quiz, exam) within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Display label.
    pub name: String,
    /// Score and maximum points.
    #[serde(flatten)]
    pub grade: Grade,
}

impl Evaluation {
    /// A graded evaluation.
    pub fn completed(name: impl Into<String>, score: f64, total: f64) -> Self {
        Self {
            name: name.into(),
            grade: Grade::Completed { score, total },
        }
    }

    /// An evaluation that has not been graded yet.
    pub fn pending(name: impl Into<String>, total: f64) -> Self {
        Self {
            name: name.into(),
            grade: Grade::Pending { total },
        }
    }

    pub fn total(&self) -> f64 {
        self.grade.total()
    }

    /// Points earned, or `None` while pending.
    pub fn score(&self) -> Option<f64> {
        match self.grade {
            Grade::Completed { score, .. } => Some(score),
            Grade::Pending { .. } => None,
        }
    }

    /// `score / total * 100`, or `None` while pending.
    pub fn percentage(&self) -> Option<f64> {
        match self.grade {
            Grade::Completed { score, total } => Some(score / total * 100.0),
            Grade::Pending { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.grade, Grade::Completed { .. })
    }
}

/// A course and its evaluations in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier for this course.
    pub id: String,
    /// Human-readable course title.
    pub name: String,
    /// Evaluations in their original order.
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

impl Course {
    /// Number of graded evaluations.
    pub fn completed_count(&self) -> usize {
        self.evaluations.iter().filter(|e| e.is_completed()).count()
    }

    /// Number of evaluations still awaiting a score.
    pub fn pending_count(&self) -> usize {
        self.evaluations.len() - self.completed_count()
    }
}

/// One point on the cumulative progression curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// Share of the final grade evaluated so far (0-100).
    pub x: f64,
    /// Share of the final grade earned so far (0-100).
    pub y: f64,
    /// The evaluation that advanced the curve to this point.
    pub evaluation: Evaluation,
}

/// Trend analysis for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Average performance rate over the weight evaluated so far.
    pub current_trend: f64,
    /// Rate needed on the remaining weight to reach a 50% final grade.
    pub required_trend: f64,
    /// Share of the final grade not yet evaluated.
    pub remaining_percentage: f64,
    /// One point per completed evaluation, in original order.
    pub cumulative_points: Vec<CumulativePoint>,
    /// The input evaluations, unchanged.
    pub evaluations: Vec<Evaluation>,
    pub cumulative_grade_earned: f64,
    pub cumulative_grade_available: f64,
}

impl TrendResult {
    /// Whether the current trend is at or above the 50% midpoint.
    pub fn is_passing(&self) -> bool {
        self.current_trend >= 50.0
    }
}
