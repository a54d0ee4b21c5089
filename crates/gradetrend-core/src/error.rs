//! Evaluation normalization errors.
//!
//! A record that fails normalization is dropped before it reaches the trend
//! engine, which assumes every total is positive.

use thiserror::Error;

/// Reasons a raw evaluation record cannot be turned into an [`Evaluation`].
///
/// [`Evaluation`]: crate::model::Evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// No total text was extracted.
    #[error("missing total")]
    MissingTotal,

    /// The total text is not a number.
    #[error("invalid total: {0:?}")]
    InvalidTotal(String),

    /// The total parsed but is zero, negative, or not finite.
    #[error("total must be positive, got {0}")]
    NonPositiveTotal(f64),
}
