use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::config::DifficultyTier;

/// Failure from the generative backend. Never fatal to the session; the
/// state machine surfaces it as a retryable condition instead of hanging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Network failure, timeout, or the backend refusing the request.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    /// The backend answered, but the payload violates the contract
    /// (bad JSON, wrong clue count, repeated secret, missing rationale).
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// One turn's generated content. Immutable once delivered; discarded when the
/// next turn's challenge arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// The hidden word, concept, or theme the clues point toward.
    pub secret: String,
    /// Ordered clues; length matches the tier's clue count.
    pub clues: Vec<String>,
    /// Accepted alternative answers (may be empty).
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Why this theme was chosen. Populated at the hardest tier in place of
    /// a single guessable answer.
    #[serde(default)]
    pub rationale: Option<String>,
}

impl Challenge {
    /// The secret plus every accepted alternative.
    pub fn answers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.secret.as_str()).chain(self.alternatives.iter().map(String::as_str))
    }
}

/// The provider's verdict on a guess, used only at the tier that delegates
/// rating to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingReply {
    /// 1..=5; parsing clamps anything the wire carries into that range.
    pub rating: u8,
    pub feedback: String,
}

/// The external collaborator boundary: given a tier and the secrets already
/// used this game, produce a fresh challenge; given a secret and a guess,
/// produce a rating. Implementations hold no game state beyond what they need
/// to answer; repetition avoidance comes in through `excluded`.
pub trait ChallengeProvider {
    fn request_challenge(
        &mut self,
        tier: DifficultyTier,
        excluded: &HashSet<String>,
    ) -> Result<Challenge, ProviderError>;

    fn request_rating(&mut self, secret: &str, guess: &str) -> Result<RatingReply, ProviderError>;
}
