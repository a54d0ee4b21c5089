//! Cumulative, weight-normalized grade progression.
//!
//! Every evaluation is weighted by its share of the course's total possible
//! points, pending items included. Completed evaluations are then walked in
//! their original order to build a running curve of grade evaluated (x) versus
//! grade earned (y), both on a 0-100 scale of the final grade.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CumulativePoint, Evaluation, Grade, TrendResult};

/// The midpoint used for [`TrendResult::required_trend`].
pub const PASSING_PERCENTAGE: f64 = 50.0;

/// One step of the cumulative walk over completed evaluations.
struct Step<'a> {
    evaluation: &'a Evaluation,
    available: f64,
    earned: f64,
}

/// Walk completed evaluations in order, accumulating weighted progress.
///
/// Returns `None` when nothing is graded yet or when the course has no
/// positive total weight to normalize against.
fn cumulative_steps(evaluations: &[Evaluation]) -> Option<Vec<Step<'_>>> {
    let total_possible: f64 = evaluations.iter().map(Evaluation::total).sum();
    if total_possible.is_nan() || total_possible <= 0.0 {
        tracing::debug!(total_possible, "no positive weight to normalize against");
        return None;
    }

    let mut available = 0.0;
    let mut earned = 0.0;
    let mut steps = Vec::new();

    for evaluation in evaluations {
        let Grade::Completed { score, total } = evaluation.grade else {
            continue;
        };
        let weight = total / total_possible * 100.0;
        available += weight;
        earned += score / total * weight;

        tracing::debug!(
            name = %evaluation.name,
            total,
            weight,
            cumulative_available = available,
            "evaluation weighted"
        );

        steps.push(Step {
            evaluation,
            available,
            earned,
        });
    }

    if steps.is_empty() {
        None
    } else {
        Some(steps)
    }
}

/// Rate needed on the remaining weight to lift `earned` to `target`.
fn required_rate(earned: f64, available: f64, target: f64) -> f64 {
    if earned >= target {
        return 0.0;
    }
    let remaining = 100.0 - available;
    let needed = target - earned;
    if remaining > 0.0 && needed > 0.0 {
        needed / remaining * 100.0
    } else {
        0.0
    }
}

/// Compute the current trend, the rate required to reach 50%, and the
/// cumulative curve for one course's evaluations.
///
/// With no graded work (or no usable weight) the result is flat: trend 0,
/// required 50, remaining 100, and an empty curve.
pub fn compute_trends(evaluations: &[Evaluation]) -> TrendResult {
    let Some(steps) = cumulative_steps(evaluations) else {
        return TrendResult {
            current_trend: 0.0,
            required_trend: PASSING_PERCENTAGE,
            remaining_percentage: 100.0,
            cumulative_points: Vec::new(),
            evaluations: evaluations.to_vec(),
            cumulative_grade_earned: 0.0,
            cumulative_grade_available: 0.0,
        };
    };

    let (available, earned) = steps
        .last()
        .map(|s| (s.available, s.earned))
        .unwrap_or_default();

    let current_trend = if available > 0.0 {
        earned / available * 100.0
    } else {
        0.0
    };

    let cumulative_points = steps
        .into_iter()
        .map(|s| CumulativePoint {
            x: s.available,
            y: s.earned,
            evaluation: s.evaluation.clone(),
        })
        .collect();

    TrendResult {
        current_trend,
        required_trend: required_rate(earned, available, PASSING_PERCENTAGE),
        remaining_percentage: 100.0 - available,
        cumulative_points,
        evaluations: evaluations.to_vec(),
        cumulative_grade_earned: earned,
        cumulative_grade_available: available,
    }
}

/// Rate required on the remaining evaluations to finish at `target` percent.
///
/// Returns `target` unchanged when nothing has been graded, and `0.0` once the
/// target is already secured or no weight remains.
pub fn compute_required_trend(evaluations: &[Evaluation], target: f64) -> f64 {
    match cumulative_steps(evaluations).as_deref().and_then(<[_]>::last) {
        Some(last) => required_rate(last.earned, last.available, target),
        None => target,
    }
}

/// How reachable a required rate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    /// Nothing more is needed.
    Secured,
    /// Needs a rate of at most 100% on the remaining work.
    Achievable,
    /// Would need more than 100% on the remaining work.
    OutOfReach,
}

impl Outlook {
    pub fn for_required(rate: f64) -> Self {
        if rate == 0.0 {
            Outlook::Secured
        } else if rate <= 100.0 {
            Outlook::Achievable
        } else {
            Outlook::OutOfReach
        }
    }
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outlook::Secured => write!(f, "secured"),
            Outlook::Achievable => write!(f, "achievable"),
            Outlook::OutOfReach => write!(f, "out of reach"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn no_completed_evaluations_is_flat() {
        let evals = vec![
            Evaluation::pending("Quiz 1", 10.0),
            Evaluation::pending("Final", 90.0),
        ];
        let trends = compute_trends(&evals);
        assert_eq!(trends.current_trend, 0.0);
        assert_eq!(trends.required_trend, 50.0);
        assert_eq!(trends.remaining_percentage, 100.0);
        assert!(trends.cumulative_points.is_empty());
        assert_eq!(trends.evaluations, evals);
    }

    #[test]
    fn empty_input_is_flat() {
        let trends = compute_trends(&[]);
        assert_eq!(trends.current_trend, 0.0);
        assert_eq!(trends.required_trend, 50.0);
        assert!(trends.cumulative_points.is_empty());
    }

    #[test]
    fn zero_total_weight_does_not_produce_nan() {
        let evals = vec![Evaluation::completed("Broken", 0.0, 0.0)];
        let trends = compute_trends(&evals);
        assert_eq!(trends.current_trend, 0.0);
        assert_eq!(trends.required_trend, 50.0);
        assert_eq!(trends.remaining_percentage, 100.0);
        assert!(trends.cumulative_points.is_empty());
        assert_eq!(compute_required_trend(&evals, 90.0), 90.0);
    }

    #[test]
    fn negative_total_weight_is_flat() {
        let evals = vec![Evaluation::completed("Broken", 1.0, -5.0)];
        let trends = compute_trends(&evals);
        assert_eq!(trends.current_trend, 0.0);
        assert_eq!(trends.required_trend, 50.0);
        assert_eq!(trends.remaining_percentage, 100.0);
        assert!(trends.cumulative_points.is_empty());
        assert_eq!(compute_required_trend(&evals, 90.0), 90.0);
    }

    #[test]
    fn half_graded_at_half_marks() {
        let evals = vec![
            Evaluation::completed("Quiz 1", 5.0, 10.0),
            Evaluation::pending("Quiz 2", 10.0),
        ];
        let trends = compute_trends(&evals);
        assert!(close(trends.cumulative_grade_available, 50.0));
        assert!(close(trends.cumulative_grade_earned, 25.0));
        assert!(close(trends.current_trend, 50.0));
        assert!(close(trends.remaining_percentage, 50.0));
        assert!(close(trends.required_trend, 50.0));
        assert_eq!(trends.cumulative_points.len(), 1);
        assert!(close(trends.cumulative_points[0].x, 50.0));
        assert!(close(trends.cumulative_points[0].y, 25.0));
        assert_eq!(trends.cumulative_points[0].evaluation, evals[0]);
    }

    #[test]
    fn fully_graded_course_needs_nothing() {
        let evals = vec![
            Evaluation::completed("Quiz 1", 9.0, 10.0),
            Evaluation::completed("Quiz 2", 8.0, 10.0),
        ];
        let trends = compute_trends(&evals);
        assert!(close(trends.cumulative_grade_available, 100.0));
        assert!(close(trends.cumulative_grade_earned, 85.0));
        assert!(close(trends.current_trend, 85.0));
        assert_eq!(trends.required_trend, 0.0);
    }

    #[test]
    fn perfect_marks_trend_at_one_hundred() {
        let evals = vec![
            Evaluation::completed("A", 3.0, 3.0),
            Evaluation::completed("B", 7.0, 7.0),
            Evaluation::completed("C", 11.0, 11.0),
        ];
        let trends = compute_trends(&evals);
        assert_eq!(trends.current_trend, 100.0);
        assert_eq!(trends.required_trend, 0.0);
    }

    #[test]
    fn pending_records_widen_weights_but_add_no_points() {
        let evals = vec![
            Evaluation::pending("Lab 1", 30.0),
            Evaluation::completed("Quiz 1", 10.0, 10.0),
            Evaluation::pending("Final", 60.0),
        ];
        let trends = compute_trends(&evals);
        assert_eq!(trends.cumulative_points.len(), 1);
        assert!(close(trends.cumulative_points[0].x, 10.0));
        assert!(close(trends.cumulative_points[0].y, 10.0));
        // 40 more needed over 90 remaining
        assert!(close(trends.required_trend, 40.0 / 90.0 * 100.0));
    }

    #[test]
    fn curve_keeps_original_order_and_is_monotonic() {
        let evals = vec![
            Evaluation::completed("Quiz 1", 2.0, 10.0),
            Evaluation::pending("Quiz 2", 10.0),
            Evaluation::completed("Midterm", 30.0, 40.0),
            Evaluation::completed("Quiz 3", 0.0, 10.0),
            Evaluation::pending("Final", 30.0),
        ];
        let trends = compute_trends(&evals);
        let names: Vec<_> = trends
            .cumulative_points
            .iter()
            .map(|p| p.evaluation.name.as_str())
            .collect();
        assert_eq!(names, vec!["Quiz 1", "Midterm", "Quiz 3"]);
        for pair in trends.cumulative_points.windows(2) {
            assert!(pair[1].x >= pair[0].x);
            assert!(pair[1].y >= pair[0].y);
        }
    }

    #[test]
    fn earned_past_midpoint_forces_zero() {
        let evals = vec![
            Evaluation::completed("Project", 60.0, 60.0),
            Evaluation::pending("Final", 40.0),
        ];
        let trends = compute_trends(&evals);
        assert_eq!(trends.required_trend, 0.0);
        assert_eq!(compute_required_trend(&evals, 55.0), 0.0);
        assert!(close(compute_required_trend(&evals, 90.0), 75.0));
    }

    #[test]
    fn required_trend_for_empty_is_target() {
        assert_eq!(compute_required_trend(&[], 90.0), 90.0);
    }

    #[test]
    fn required_trend_can_exceed_one_hundred() {
        let evals = vec![
            Evaluation::completed("Midterm", 10.0, 80.0),
            Evaluation::pending("Final", 20.0),
        ];
        let rate = compute_required_trend(&evals, 90.0);
        assert!(close(rate, 400.0));
        assert_eq!(Outlook::for_required(rate), Outlook::OutOfReach);
    }

    #[test]
    fn midpoint_specialization_agrees() {
        let sets = vec![
            vec![],
            vec![Evaluation::pending("Only", 5.0)],
            vec![
                Evaluation::completed("Q1", 3.0, 10.0),
                Evaluation::pending("Q2", 10.0),
            ],
            vec![
                Evaluation::completed("Q1", 9.0, 10.0),
                Evaluation::completed("Q2", 8.0, 10.0),
            ],
            vec![
                Evaluation::completed("Lab", 12.0, 25.0),
                Evaluation::pending("Exam", 50.0),
                Evaluation::completed("Essay", 20.0, 25.0),
            ],
        ];
        for evals in &sets {
            assert_eq!(
                compute_required_trend(evals, PASSING_PERCENTAGE),
                compute_trends(evals).required_trend
            );
        }
    }

    #[test]
    fn outlook_thresholds() {
        assert_eq!(Outlook::for_required(0.0), Outlook::Secured);
        assert_eq!(Outlook::for_required(42.0), Outlook::Achievable);
        assert_eq!(Outlook::for_required(100.0), Outlook::Achievable);
        assert_eq!(Outlook::for_required(100.5), Outlook::OutOfReach);
        assert_eq!(Outlook::OutOfReach.to_string(), "out of reach");
    }
}
