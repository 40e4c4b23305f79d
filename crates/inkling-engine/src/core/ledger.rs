use serde::{Deserialize, Serialize};

/// One seat at the table: a display name and a cumulative score.
/// Scores are signed and unbounded; pass penalties can push them negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: i64,
}

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Index into the configured turn order.
    pub player: usize,
    pub name: String,
    pub score: i64,
}

/// Per-player cumulative scores, stored in turn order.
/// Simple flat-Vec storage; party games have a handful of players, not thousands.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    players: Vec<Player>,
}

impl ScoreLedger {
    /// Build a ledger from raw name entries, defaulting blank names to
    /// "Player N" (1-based).
    pub fn new(names: &[String]) -> Self {
        let players = names
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let trimmed = raw.trim();
                let name = if trimmed.is_empty() {
                    format!("Player {}", i + 1)
                } else {
                    trimmed.to_string()
                };
                Player { name, score: 0 }
            })
            .collect();
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Score for a player index; 0 for an out-of-range index.
    pub fn score(&self, index: usize) -> i64 {
        self.players.get(index).map_or(0, |p| p.score)
    }

    /// All scores in turn order.
    pub fn scores(&self) -> Vec<i64> {
        self.players.iter().map(|p| p.score).collect()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Apply a point delta to one player. Out-of-range indices are ignored.
    pub fn apply(&mut self, index: usize, delta: i64) {
        if let Some(player) = self.players.get_mut(index) {
            player.score += delta;
        }
    }

    /// Final ranking: highest score first. Stable within ties, so equal scores
    /// keep their turn order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .players
            .iter()
            .enumerate()
            .map(|(player, p)| Standing {
                player,
                name: p.name.clone(),
                score: p.score,
            })
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row.score));
        rows
    }

    /// Zero every score, keeping names. Used by full game reset.
    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_names_are_defaulted() {
        let ledger = ScoreLedger::new(&names(&["Ada", "  ", ""]));
        assert_eq!(ledger.player(0).unwrap().name, "Ada");
        assert_eq!(ledger.player(1).unwrap().name, "Player 2");
        assert_eq!(ledger.player(2).unwrap().name, "Player 3");
    }

    #[test]
    fn apply_accumulates() {
        let mut ledger = ScoreLedger::new(&names(&["a", "b"]));
        ledger.apply(0, 60);
        ledger.apply(0, -25);
        ledger.apply(1, 100);
        assert_eq!(ledger.score(0), 35);
        assert_eq!(ledger.score(1), 100);
    }

    #[test]
    fn apply_out_of_range_is_ignored() {
        let mut ledger = ScoreLedger::new(&names(&["a"]));
        ledger.apply(5, 100);
        assert_eq!(ledger.scores(), vec![0]);
    }

    #[test]
    fn standings_sort_descending_and_stable() {
        let mut ledger = ScoreLedger::new(&names(&["a", "b", "c", "d"]));
        ledger.apply(0, 40);
        ledger.apply(1, 80);
        ledger.apply(2, 40);
        // d stays at 0
        let rows = ledger.standings();
        assert_eq!(rows[0].player, 1);
        // tie between a and c keeps turn order
        assert_eq!(rows[1].player, 0);
        assert_eq!(rows[2].player, 2);
        assert_eq!(rows[3].player, 3);
    }

    #[test]
    fn reset_scores_keeps_names() {
        let mut ledger = ScoreLedger::new(&names(&["Ada"]));
        ledger.apply(0, 80);
        ledger.reset_scores();
        assert_eq!(ledger.score(0), 0);
        assert_eq!(ledger.player(0).unwrap().name, "Ada");
    }
}
