//! Ranked engine output.

use serde::{Deserialize, Serialize};

/// A single predicted token with the engine's probability for it.
///
/// The pipeline only consumes the token order; probabilities are kept for
/// callers that want to display or log them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub text: String,
    pub probability: f64,
}

impl Prediction {
    pub fn new<T: Into<String>>(text: T, probability: f64) -> Self {
        Prediction {
            text: text.into(),
            probability,
        }
    }
}

/// Sort predictions by probability, highest first. Ties keep their order.
pub fn rank(predictions: &mut [Prediction]) {
    predictions.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
