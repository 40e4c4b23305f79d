// core/scoring.rs
//
// Pure scoring rules: rating → points, and the asymmetric pass penalty.
// No dependencies on the session state machine, just math over scores.

use serde::{Deserialize, Serialize};

/// Lowest meaningful rating a judge can hand out.
pub const RATING_MIN: u8 = 1;
/// Highest rating.
pub const RATING_MAX: u8 = 5;

/// Points awarded per rating 1..=5. Rating 1 scores nothing, same as no match.
const RATING_POINTS: [i64; 5] = [0, 40, 60, 80, 100];

/// Convert a judge rating into a point delta.
/// Ratings outside 1..=5 score nothing.
pub fn rating_delta(rating: u8) -> i64 {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        RATING_POINTS[(rating - 1) as usize]
    } else {
        0
    }
}

/// Penalty for forfeiting a guess.
///
/// A player in the lead gives up half their score (reduction rounded down).
/// A player at or below zero instead absorbs the total positive score held by
/// the rest of the field, so passing stays cheap while ahead and expensive
/// while behind. When every other score is non-positive the penalty is
/// legitimately zero.
pub fn pass_delta(current: i64, other_scores: &[i64]) -> i64 {
    if current > 0 {
        -(current / 2)
    } else {
        -other_scores.iter().map(|&s| s.max(0)).sum::<i64>()
    }
}

/// Outcome of one turn: the applied delta, the rating behind it (0 for a
/// pass), and a line of feedback for the results view. Transient; replaced
/// each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub rating: u8,
    pub delta: i64,
    pub feedback: String,
}

impl Evaluation {
    /// Build an evaluation from a rating, using the fixed point table.
    pub fn from_rating(rating: u8, feedback: impl Into<String>) -> Self {
        Self {
            rating,
            delta: rating_delta(rating),
            feedback: feedback.into(),
        }
    }

    /// Build the evaluation for a pass with an already-computed penalty.
    pub fn from_pass(delta: i64) -> Self {
        Self {
            rating: 0,
            delta,
            feedback: "Passed. Penalty applied.".to_string(),
        }
    }
}

/// Stock feedback line for a rating, used when the judge is a human and the
/// provider supplied no text of its own.
pub fn default_feedback(rating: u8) -> &'static str {
    match rating {
        5 => "Dead on.",
        4 => "Very close.",
        3 => "In the neighborhood.",
        2 => "A faint connection.",
        _ => "No match.",
    }
}
