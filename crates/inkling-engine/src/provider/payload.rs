// provider/payload.rs
//
// Wire-format parsing and validation for provider responses. The contract is
// narrow: a challenge payload must carry a fresh secret and a clue list that
// matches the tier; a rating payload carries a 1..=5 verdict. Anything that
// deserializes but breaks the contract is Malformed, never a panic.

use std::collections::HashSet;

use serde::Deserialize;

use crate::api::config::DifficultyTier;
use crate::core::scoring::{RATING_MAX, RATING_MIN};
use crate::provider::port::{Challenge, ProviderError, RatingReply};

#[derive(Debug, Deserialize)]
struct ChallengePayload {
    secret: String,
    clues: Vec<String>,
    #[serde(default)]
    alternatives: Vec<String>,
    #[serde(default)]
    rationale: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RatingPayload {
    rating: i64,
    #[serde(default)]
    feedback: String,
}

/// Parse and validate a challenge response for the given tier.
/// `excluded` is the set of secrets already used this game; a repeat is a
/// contract violation, since the request named them.
pub fn challenge_from_json(
    json: &str,
    tier: DifficultyTier,
    excluded: &HashSet<String>,
) -> Result<Challenge, ProviderError> {
    let payload: ChallengePayload =
        serde_json::from_str(json).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    let secret = payload.secret.trim().to_string();
    if secret.is_empty() {
        return Err(ProviderError::Malformed("empty secret".to_string()));
    }
    if excluded.contains(&secret) {
        return Err(ProviderError::Malformed(format!(
            "secret {secret:?} was already used"
        )));
    }
    if payload.clues.len() != tier.clue_count() {
        return Err(ProviderError::Malformed(format!(
            "expected {} clues, got {}",
            tier.clue_count(),
            payload.clues.len()
        )));
    }
    if tier.expects_alternatives() && payload.alternatives.is_empty() {
        return Err(ProviderError::Malformed(
            "missing accepted alternatives at the evocative tier".to_string(),
        ));
    }
    if tier.expects_rationale() && payload.rationale.as_deref().map_or(true, |r| r.trim().is_empty())
    {
        return Err(ProviderError::Malformed(
            "missing rationale at the open-ended tier".to_string(),
        ));
    }

    Ok(Challenge {
        secret,
        clues: payload.clues,
        alternatives: payload.alternatives,
        rationale: payload.rationale,
    })
}

/// Parse a rating response. Out-of-range ratings are clamped into 1..=5
/// rather than rejected.
pub fn rating_from_json(json: &str) -> Result<RatingReply, ProviderError> {
    let payload: RatingPayload =
        serde_json::from_str(json).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let rating = payload.rating.clamp(RATING_MIN as i64, RATING_MAX as i64) as u8;
    Ok(RatingReply {
        rating,
        feedback: payload.feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_excluded() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn parse_minimal_challenge() {
        let json = r#"{ "secret": "lighthouse", "clues": ["coast", "beam", "warning"] }"#;
        let challenge =
            challenge_from_json(json, DifficultyTier::Standard, &no_excluded()).unwrap();
        assert_eq!(challenge.secret, "lighthouse");
        assert_eq!(challenge.clues.len(), 3);
        assert!(challenge.alternatives.is_empty());
        assert!(challenge.rationale.is_none());
    }

    #[test]
    fn wrong_clue_count_is_malformed() {
        let json = r#"{ "secret": "lighthouse", "clues": ["coast"] }"#;
        let err = challenge_from_json(json, DifficultyTier::Standard, &no_excluded()).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn repeated_secret_is_malformed() {
        let json = r#"{ "secret": "lighthouse", "clues": ["a", "b", "c"] }"#;
        let mut excluded = HashSet::new();
        excluded.insert("lighthouse".to_string());
        let err = challenge_from_json(json, DifficultyTier::Standard, &excluded).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn open_ended_tier_requires_rationale() {
        let json = r#"{ "secret": "impermanence", "clues": ["a", "b", "c", "d"] }"#;
        assert!(challenge_from_json(json, DifficultyTier::Philosophical, &no_excluded()).is_err());

        let json = r#"{
            "secret": "impermanence",
            "clues": ["a", "b", "c", "d"],
            "rationale": "Everything changes; nothing a single word pins down."
        }"#;
        let challenge =
            challenge_from_json(json, DifficultyTier::Philosophical, &no_excluded()).unwrap();
        assert!(challenge.rationale.is_some());
    }

    #[test]
    fn evocative_tier_requires_alternatives() {
        let json = r#"{ "secret": "nostalgia", "clues": ["s1", "s2", "s3"] }"#;
        let err = challenge_from_json(json, DifficultyTier::Evocative, &no_excluded()).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));

        let json = r#"{
            "secret": "nostalgia",
            "clues": ["s1", "s2", "s3"],
            "alternatives": ["longing"]
        }"#;
        let challenge =
            challenge_from_json(json, DifficultyTier::Evocative, &no_excluded()).unwrap();
        assert_eq!(challenge.alternatives, vec!["longing"]);
    }

    #[test]
    fn broken_json_is_malformed_not_a_panic() {
        let err = challenge_from_json("{nope", DifficultyTier::Casual, &no_excluded()).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn rating_is_clamped_into_range() {
        let reply = rating_from_json(r#"{ "rating": 9, "feedback": "wow" }"#).unwrap();
        assert_eq!(reply.rating, 5);
        let reply = rating_from_json(r#"{ "rating": -3 }"#).unwrap();
        assert_eq!(reply.rating, 1);
        assert_eq!(reply.feedback, "");
    }
}
