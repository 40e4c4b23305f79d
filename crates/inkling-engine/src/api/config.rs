use serde::{Deserialize, Serialize};

/// Shape the provider's clues take at a given difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClueForm {
    /// Short phrases, a word or two each.
    Word,
    /// Full sentences.
    Sentence,
}

/// Difficulty tier, fixed once before play starts.
///
/// Each tier determines how many clues the provider returns, whether they are
/// word- or sentence-form, and which extras accompany them. The easiest tier
/// delegates guess rating to the provider; all others are judged by a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    /// Concrete secrets, 2 short clues, provider-rated guesses.
    Casual,
    /// Concrete secrets, 3 short clues, human-judged.
    Standard,
    /// Evocative secrets, 3 sentence clues plus accepted alternatives.
    Evocative,
    /// Open-ended themes, 4 sentence clues plus a rationale; no single
    /// canonical answer is expected to be guessable.
    Philosophical,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        Self::Casual,
        Self::Standard,
        Self::Evocative,
        Self::Philosophical,
    ];

    /// Number of clues the provider must return for this tier.
    pub fn clue_count(self) -> usize {
        match self {
            Self::Casual => 2,
            Self::Standard => 3,
            Self::Evocative => 3,
            Self::Philosophical => 4,
        }
    }

    /// Whether clues are short phrases or full sentences.
    pub fn clue_form(self) -> ClueForm {
        match self {
            Self::Casual | Self::Standard => ClueForm::Word,
            Self::Evocative | Self::Philosophical => ClueForm::Sentence,
        }
    }

    /// Whether the provider is expected to list accepted alternative answers.
    pub fn expects_alternatives(self) -> bool {
        matches!(self, Self::Evocative)
    }

    /// Whether the provider must explain its choice instead of pointing at a
    /// single guessable secret.
    pub fn expects_rationale(self) -> bool {
        matches!(self, Self::Philosophical)
    }

    /// Whether guess rating is delegated to the provider rather than a human.
    pub fn delegates_rating(self) -> bool {
        matches!(self, Self::Casual)
    }
}

/// Game setup, chosen once before play starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player names in turn order. Blank entries are defaulted to "Player N".
    pub player_names: Vec<String>,
    /// Number of rounds; each player takes one turn per round.
    pub total_rounds: u32,
    /// Difficulty tier for the whole game.
    pub tier: DifficultyTier,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: vec![String::new(), String::new()],
            total_rounds: 3,
            tier: DifficultyTier::Standard,
        }
    }
}
