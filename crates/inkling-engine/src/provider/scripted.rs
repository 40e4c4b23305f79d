// provider/scripted.rs
//
// Deterministic in-process provider over a fixed deck. Used by tests and as
// an offline fallback when no generative backend is reachable. Picks the
// first deck entry for the tier whose secret is not excluded, so a full game
// never repeats a secret until the deck for that tier runs dry.

use std::collections::HashSet;

use crate::api::config::DifficultyTier;
use crate::core::scoring::default_feedback;
use crate::provider::port::{Challenge, ChallengeProvider, ProviderError, RatingReply};

struct DeckEntry {
    tier: DifficultyTier,
    secret: &'static str,
    clues: &'static [&'static str],
    alternatives: &'static [&'static str],
    rationale: Option<&'static str>,
}

const DECK: &[DeckEntry] = &[
    DeckEntry {
        tier: DifficultyTier::Casual,
        secret: "lighthouse",
        clues: &["coastline", "warning beam"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Casual,
        secret: "umbrella",
        clues: &["rainy day", "folds away"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Casual,
        secret: "compass",
        clues: &["always north", "pocket navigator"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Casual,
        secret: "kettle",
        clues: &["whistles when ready", "tea's herald"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Casual,
        secret: "ladder",
        clues: &["rung by rung", "leans to climb"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Standard,
        secret: "echo",
        clues: &["canyon walls", "delayed reply", "fading repeat"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Standard,
        secret: "harvest",
        clues: &["autumn fields", "gathered crop", "season's end"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Standard,
        secret: "labyrinth",
        clues: &["winding paths", "easy to enter", "hard to leave"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Standard,
        secret: "tide",
        clues: &["moon's pull", "twice daily", "shoreline rhythm"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Standard,
        secret: "anvil",
        clues: &["smith's partner", "takes the blows", "iron on iron"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Standard,
        secret: "constellation",
        clues: &["connected dots", "ancient pictures", "night atlas"],
        alternatives: &[],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Evocative,
        secret: "nostalgia",
        clues: &[
            "It arrives uninvited when an old song plays.",
            "It makes the past look warmer than it was.",
            "It is a longing for somewhere you cannot return to.",
        ],
        alternatives: &["homesickness", "longing"],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Evocative,
        secret: "threshold",
        clues: &[
            "You stand on it between two rooms and belong to neither.",
            "Crossing it turns a decision into an act.",
            "Every beginning has one, even if nobody marks it.",
        ],
        alternatives: &["doorway", "boundary"],
        rationale: None,
    },
    DeckEntry {
        tier: DifficultyTier::Philosophical,
        secret: "impermanence",
        clues: &[
            "Rivers keep their names while never keeping their water.",
            "Every photograph is an argument against it, and loses.",
            "Grief and relief both drink from this spring.",
            "It is the one constant every tradition agrees on.",
        ],
        alternatives: &["transience", "change"],
        rationale: Some(
            "No single word is the answer; the clues circle the theme that \
             nothing holds still, and any guess near it deserves credit.",
        ),
    },
    DeckEntry {
        tier: DifficultyTier::Philosophical,
        secret: "freedom",
        clues: &[
            "Prisoners define it more precisely than philosophers.",
            "It weighs nothing and is still heavy to carry.",
            "Every fence describes it by exclusion.",
            "People disagree whether it is a gift or an achievement.",
        ],
        alternatives: &["liberty", "autonomy"],
        rationale: Some(
            "An open-ended theme: the clues gesture at liberty from four \
             directions rather than pinning a guessable object.",
        ),
    },
];

/// Offline provider with a built-in deck and a keyword-overlap rating
/// heuristic. Fully deterministic.
#[derive(Debug, Default)]
pub struct ScriptedProvider;

impl ScriptedProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ChallengeProvider for ScriptedProvider {
    fn request_challenge(
        &mut self,
        tier: DifficultyTier,
        excluded: &HashSet<String>,
    ) -> Result<Challenge, ProviderError> {
        DECK.iter()
            .filter(|entry| entry.tier == tier)
            .find(|entry| !excluded.contains(entry.secret))
            .map(|entry| Challenge {
                secret: entry.secret.to_string(),
                clues: entry.clues.iter().map(|c| c.to_string()).collect(),
                alternatives: entry.alternatives.iter().map(|a| a.to_string()).collect(),
                rationale: entry.rationale.map(|r| r.to_string()),
            })
            .ok_or_else(|| {
                ProviderError::Unavailable(format!("deck exhausted for tier {tier:?}"))
            })
    }

    fn request_rating(&mut self, secret: &str, guess: &str) -> Result<RatingReply, ProviderError> {
        let rating = score_guess(secret, guess);
        Ok(RatingReply {
            rating,
            feedback: default_feedback(rating).to_string(),
        })
    }
}

/// Keyword-overlap heuristic standing in for a generative judge.
fn score_guess(secret: &str, guess: &str) -> u8 {
    let secret_norm = secret.trim().to_lowercase();
    let guess_norm = guess.trim().to_lowercase();
    if guess_norm.is_empty() {
        return 1;
    }
    if guess_norm == secret_norm {
        return 5;
    }
    if secret_norm.contains(&guess_norm) || guess_norm.contains(&secret_norm) {
        return 4;
    }
    let secret_words: HashSet<&str> = secret_norm.split_whitespace().collect();
    let mut shared_long = false;
    let mut shared_any = false;
    for word in guess_norm.split_whitespace() {
        if secret_words.contains(word) {
            shared_any = true;
            shared_long |= word.len() >= 4;
        }
    }
    if shared_long {
        3
    } else if shared_any {
        2
    } else {
        1
    }
}
