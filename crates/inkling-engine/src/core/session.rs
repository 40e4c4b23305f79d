// core/session.rs
//
// The round/turn state machine. Sans-I/O: operations that need the provider
// return a request value tagged with a monotonic seq; the embedding layer
// performs the round trip and calls `deliver_*` with the same seq. A delivery
// whose seq no longer matches the pending request is stale and is dropped,
// so a late response can never be applied to the wrong turn.

use std::collections::HashSet;

use serde::Serialize;

use crate::api::config::{DifficultyTier, GameConfig};
use crate::api::types::RequestSeq;
use crate::core::ledger::{ScoreLedger, Standing};
use crate::core::scoring::{self, Evaluation};
use crate::provider::port::{Challenge, ProviderError, RatingReply};

/// Where the game currently is. Only `reset()` moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Collecting players / difficulty; nothing has started.
    Setup,
    /// Turn order shown for confirmation. The order itself is fixed:
    /// configured list order, never shuffled here.
    OrderConfirmed,
    /// A challenge is on the table and the current player may guess or pass.
    Playing,
    /// The turn's outcome is shown; waiting for the judge or for advance.
    Evaluating,
    /// A round boundary banner while the next round's challenge is fetched.
    RoundComplete,
    /// All rounds played; standings are final.
    Finished,
    /// A challenge fetch failed; `retry()` issues a fresh request.
    LoadFailed,
}

/// A challenge fetch the embedding layer must perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeRequest {
    pub seq: RequestSeq,
    pub tier: DifficultyTier,
    /// Secrets already used this game; the provider must avoid them.
    pub excluded: Vec<String>,
}

/// A guess-rating fetch (easiest tier only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingRequest {
    pub seq: RequestSeq,
    pub secret: String,
    pub guess: String,
}

/// The single outstanding provider round trip, if any. Doubles as the busy
/// flag: while one is pending, guesses and turn advances are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Challenge(RequestSeq),
    Rating(RequestSeq),
}

/// One game of Inkling: players, rounds, the current challenge, and the
/// scores. All mutation happens through the operations below on a single
/// event-processing thread.
pub struct Session {
    config: GameConfig,
    ledger: ScoreLedger,
    phase: Phase,
    round: u32,
    current_player: usize,
    used_secrets: HashSet<String>,
    challenge: Option<Challenge>,
    evaluation: Option<Evaluation>,
    /// Last submitted guess, shown to the judge.
    guess: Option<String>,
    next_seq: u64,
    pending: Option<Pending>,
}

impl Session {
    pub fn new(mut config: GameConfig) -> Self {
        if config.player_names.is_empty() {
            config.player_names.push(String::new());
        }
        config.total_rounds = config.total_rounds.max(1);
        let ledger = ScoreLedger::new(&config.player_names);
        Self {
            config,
            ledger,
            phase: Phase::Setup,
            round: 1,
            current_player: 0,
            used_secrets: HashSet::new(),
            challenge: None,
            evaluation: None,
            guess: None,
            next_seq: 0,
            pending: None,
        }
    }

    // -- Accessors --

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    pub fn tier(&self) -> DifficultyTier {
        self.config.tier
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn guess(&self) -> Option<&str> {
        self.guess.as_deref()
    }

    /// True while a provider round trip is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Final ranking, highest score first.
    pub fn standings(&self) -> Vec<Standing> {
        self.ledger.standings()
    }

    // -- Operations --

    /// Setup → OrderConfirmed. Displays the configured order; never reorders.
    pub fn confirm_order(&mut self) {
        if self.phase == Phase::Setup {
            self.phase = Phase::OrderConfirmed;
        }
    }

    /// Begin play: round 1, first player, and the first challenge fetch.
    pub fn start_game(&mut self) -> Option<ChallengeRequest> {
        if self.phase != Phase::OrderConfirmed || self.is_busy() {
            return None;
        }
        self.round = 1;
        self.current_player = 0;
        log::info!(
            "game started: {} players, {} rounds, tier {:?}",
            self.ledger.len(),
            self.config.total_rounds,
            self.config.tier
        );
        Some(self.issue_challenge())
    }

    /// Re-issue the challenge fetch after a failure.
    pub fn retry(&mut self) -> Option<ChallengeRequest> {
        if self.phase != Phase::LoadFailed || self.is_busy() {
            return None;
        }
        Some(self.issue_challenge())
    }

    /// Apply (or drop) a challenge fetch result. Returns false when the
    /// delivery was stale or unexpected and nothing changed.
    pub fn deliver_challenge(
        &mut self,
        seq: RequestSeq,
        result: Result<Challenge, ProviderError>,
    ) -> bool {
        match self.pending {
            Some(Pending::Challenge(expected)) if expected == seq => {}
            _ => {
                log::debug!("dropping stale challenge delivery (seq {})", seq.0);
                return false;
            }
        }
        self.pending = None;
        match result {
            Ok(challenge) => {
                self.used_secrets.insert(challenge.secret.clone());
                self.challenge = Some(challenge);
                self.evaluation = None;
                self.guess = None;
                self.phase = Phase::Playing;
                log::info!(
                    "round {} player {}: challenge ready",
                    self.round,
                    self.current_player
                );
            }
            Err(err) => {
                log::warn!("challenge fetch failed: {err}");
                self.phase = Phase::LoadFailed;
            }
        }
        true
    }

    /// Submit a guess for the current challenge. Blank input is rejected
    /// locally and mutates nothing. At the tier that delegates rating, the
    /// returned request must be fulfilled via `deliver_rating`; at all other
    /// tiers the phase moves to Evaluating and a human judge calls `judge`.
    pub fn submit_guess(&mut self, raw: &str) -> Option<RatingRequest> {
        if self.phase != Phase::Playing || self.is_busy() {
            return None;
        }
        let guess = raw.trim();
        if guess.is_empty() {
            return None;
        }
        let secret = self.challenge.as_ref()?.secret.clone();
        self.guess = Some(guess.to_string());
        if self.config.tier.delegates_rating() {
            let seq = self.bump_seq();
            self.pending = Some(Pending::Rating(seq));
            Some(RatingRequest {
                seq,
                secret,
                guess: guess.to_string(),
            })
        } else {
            self.phase = Phase::Evaluating;
            None
        }
    }

    /// Apply (or drop) a rating result. A failed fetch returns the turn to
    /// Playing so the guess can be resubmitted. Returns false for stale
    /// deliveries.
    pub fn deliver_rating(
        &mut self,
        seq: RequestSeq,
        result: Result<RatingReply, ProviderError>,
    ) -> bool {
        match self.pending {
            Some(Pending::Rating(expected)) if expected == seq => {}
            _ => {
                log::debug!("dropping stale rating delivery (seq {})", seq.0);
                return false;
            }
        }
        self.pending = None;
        match result {
            Ok(reply) => {
                self.apply_evaluation(Evaluation::from_rating(reply.rating, reply.feedback));
            }
            Err(err) => {
                log::warn!("rating fetch failed, guess can be resubmitted: {err}");
                self.guess = None;
            }
        }
        true
    }

    /// Human judge hands out a rating for the submitted guess. Out-of-range
    /// ratings score nothing (the resolver's rule), and a second judgement of
    /// the same turn is ignored.
    pub fn judge(&mut self, rating: u8) {
        if self.phase != Phase::Evaluating || self.evaluation.is_some() {
            return;
        }
        self.apply_evaluation(Evaluation::from_rating(
            rating,
            scoring::default_feedback(rating),
        ));
    }

    /// Forfeit the guess for a penalty instead of a possible gain.
    pub fn pass_turn(&mut self) {
        if self.phase != Phase::Playing || self.is_busy() {
            return;
        }
        let current = self.ledger.score(self.current_player);
        let others: Vec<i64> = self
            .ledger
            .scores()
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| i != self.current_player)
            .map(|(_, s)| s)
            .collect();
        let delta = scoring::pass_delta(current, &others);
        self.guess = None;
        self.apply_evaluation(Evaluation::from_pass(delta));
    }

    /// Move to the next (round, player) pair, fetching the next challenge,
    /// or finish the game after the last player of the last round. Never
    /// skips or repeats a pair; never rewinds.
    pub fn advance_turn(&mut self) -> Option<ChallengeRequest> {
        if !matches!(self.phase, Phase::Evaluating | Phase::RoundComplete) || self.is_busy() {
            return None;
        }
        self.challenge = None;
        self.evaluation = None;
        self.guess = None;

        if self.current_player + 1 < self.ledger.len() {
            self.current_player += 1;
            Some(self.issue_challenge())
        } else if self.round < self.config.total_rounds {
            self.round += 1;
            self.current_player = 0;
            self.phase = Phase::RoundComplete;
            log::info!("round {} complete", self.round - 1);
            Some(self.issue_challenge())
        } else {
            self.phase = Phase::Finished;
            log::info!("game finished after {} rounds", self.round);
            None
        }
    }

    /// Full reset: scores zeroed, used secrets cleared, back to Setup. The
    /// only path that moves the game backward. An in-flight response becomes
    /// stale automatically because the pending slot is cleared.
    pub fn reset(&mut self) {
        self.ledger.reset_scores();
        self.phase = Phase::Setup;
        self.round = 1;
        self.current_player = 0;
        self.used_secrets.clear();
        self.challenge = None;
        self.evaluation = None;
        self.guess = None;
        self.pending = None;
    }

    // -- Internals --

    fn bump_seq(&mut self) -> RequestSeq {
        self.next_seq += 1;
        RequestSeq(self.next_seq)
    }

    fn issue_challenge(&mut self) -> ChallengeRequest {
        let seq = self.bump_seq();
        self.pending = Some(Pending::Challenge(seq));
        let mut excluded: Vec<String> = self.used_secrets.iter().cloned().collect();
        excluded.sort();
        ChallengeRequest {
            seq,
            tier: self.config.tier,
            excluded,
        }
    }

    fn apply_evaluation(&mut self, evaluation: Evaluation) {
        self.ledger.apply(self.current_player, evaluation.delta);
        log::info!(
            "player {} rated {} ({:+} points)",
            self.current_player,
            evaluation.rating,
            evaluation.delta
        );
        self.evaluation = Some(evaluation);
        self.phase = Phase::Evaluating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(players: usize, rounds: u32, tier: DifficultyTier) -> GameConfig {
        GameConfig {
            player_names: (0..players).map(|_| String::new()).collect(),
            total_rounds: rounds,
            tier,
        }
    }

    fn challenge(secret: &str) -> Challenge {
        Challenge {
            secret: secret.to_string(),
            clues: vec!["one".to_string(), "two".to_string(), "three".to_string()],
            alternatives: Vec::new(),
            rationale: None,
        }
    }

    /// Deliver a fresh synthetic challenge for the given request, the way the
    /// embedding layer would after a successful fetch.
    fn fulfill(session: &mut Session, request: ChallengeRequest) {
        let secret = format!("secret-{}", request.seq.0);
        assert!(!request.excluded.contains(&secret));
        assert!(session.deliver_challenge(request.seq, Ok(challenge(&secret))));
    }

    #[test]
    fn setup_to_playing() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Standard));
        assert_eq!(session.phase(), Phase::Setup);
        session.confirm_order();
        assert_eq!(session.phase(), Phase::OrderConfirmed);
        let request = session.start_game().unwrap();
        assert!(session.is_busy());
        fulfill(&mut session, request);
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.challenge().is_some());
    }

    #[test]
    fn start_requires_confirmed_order() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Standard));
        assert!(session.start_game().is_none());
    }

    #[test]
    fn three_players_two_rounds_finish_on_sixth_advance() {
        let mut session = Session::new(config(3, 2, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        fulfill(&mut session, request);

        let mut seen = vec![(session.round(), session.current_player())];
        for advance in 1..=6 {
            session.submit_guess("a guess");
            session.judge(5);
            match session.advance_turn() {
                Some(request) => {
                    assert!(advance < 6, "advance {advance} should have finished");
                    fulfill(&mut session, request);
                    assert_eq!(session.phase(), Phase::Playing);
                    seen.push((session.round(), session.current_player()));
                }
                None => {
                    assert_eq!(advance, 6);
                    assert_eq!(session.phase(), Phase::Finished);
                }
            }
        }
        // No skipped or repeated (round, player) pair, in order.
        assert_eq!(
            seen,
            vec![(1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn round_boundary_shows_round_complete_until_delivery() {
        let mut session = Session::new(config(2, 2, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        fulfill(&mut session, request);

        // Finish round 1: both players.
        session.submit_guess("x");
        session.judge(3);
        let request = session.advance_turn().unwrap();
        fulfill(&mut session, request);
        session.submit_guess("y");
        session.judge(3);
        let request = session.advance_turn().unwrap();
        assert_eq!(session.phase(), Phase::RoundComplete);
        fulfill(&mut session, request);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.round(), 2);
        assert_eq!(session.current_player(), 0);
    }

    #[test]
    fn judged_rating_lands_on_the_current_player() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        fulfill(&mut session, request);

        session.submit_guess("something");
        assert_eq!(session.phase(), Phase::Evaluating);
        session.judge(4);
        assert_eq!(session.ledger().score(0), 80);
        assert_eq!(session.evaluation().unwrap().delta, 80);
        // A second judgement of the same turn is ignored.
        session.judge(5);
        assert_eq!(session.ledger().score(0), 80);
    }

    #[test]
    fn blank_guess_is_a_noop() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        fulfill(&mut session, request);

        assert!(session.submit_guess("   ").is_none());
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.guess().is_none());
    }

    #[test]
    fn casual_tier_delegates_rating_and_guards_reentry() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Casual));
        session.confirm_order();
        let request = session.start_game().unwrap();
        fulfill(&mut session, request);

        let rating_req = session.submit_guess("lighthouse").unwrap();
        assert!(session.is_busy());
        // Busy guard: nothing else may mutate the turn.
        assert!(session.submit_guess("another").is_none());
        assert!(session.advance_turn().is_none());
        session.pass_turn();
        assert_eq!(session.phase(), Phase::Playing);

        let ok = session.deliver_rating(
            rating_req.seq,
            Ok(RatingReply {
                rating: 5,
                feedback: "spot on".to_string(),
            }),
        );
        assert!(ok);
        assert_eq!(session.phase(), Phase::Evaluating);
        assert_eq!(session.ledger().score(0), 100);
    }

    #[test]
    fn stale_deliveries_are_discarded() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();

        let stale = RequestSeq(request.seq.0 + 100);
        assert!(!session.deliver_challenge(stale, Ok(challenge("ghost"))));
        assert!(session.is_busy());

        fulfill(&mut session, request);
        // The real delivery already landed; replaying it changes nothing.
        let replay = session.deliver_challenge(RequestSeq(1), Ok(challenge("ghost")));
        assert!(!replay);
        assert_ne!(session.challenge().unwrap().secret, "ghost");
    }

    #[test]
    fn failed_fetch_surfaces_retry_instead_of_hanging() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        session.deliver_challenge(
            request.seq,
            Err(ProviderError::Unavailable("offline".to_string())),
        );
        assert_eq!(session.phase(), Phase::LoadFailed);
        assert!(!session.is_busy());

        let retry = session.retry().unwrap();
        assert_ne!(retry.seq, request.seq);
        fulfill(&mut session, retry);
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn pass_applies_the_asymmetric_penalty() {
        let mut session = Session::new(config(3, 2, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        fulfill(&mut session, request);

        // Player 0 earns 100, then player 1 passes while at zero with a
        // positive field: absorbs player 0's 100.
        session.submit_guess("a");
        session.judge(5);
        let request = session.advance_turn().unwrap();
        fulfill(&mut session, request);
        session.pass_turn();
        assert_eq!(session.ledger().score(1), -100);
        assert_eq!(session.evaluation().unwrap().rating, 0);
    }

    #[test]
    fn used_secrets_accumulate_in_requests() {
        let mut session = Session::new(config(2, 2, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        assert!(request.excluded.is_empty());
        fulfill(&mut session, request);
        let first_secret = session.challenge().unwrap().secret.clone();

        session.submit_guess("x");
        session.judge(2);
        let request = session.advance_turn().unwrap();
        assert_eq!(request.excluded, vec![first_secret]);
    }

    #[test]
    fn reset_returns_to_setup_and_clears_everything() {
        let mut session = Session::new(config(2, 1, DifficultyTier::Standard));
        session.confirm_order();
        let request = session.start_game().unwrap();
        fulfill(&mut session, request);
        session.submit_guess("x");
        session.judge(5);

        session.reset();
        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.ledger().score(0), 0);
        assert!(session.challenge().is_none());
        assert!(!session.is_busy());

        // A response from before the reset is stale.
        assert!(!session.deliver_challenge(RequestSeq(1), Ok(challenge("ghost"))));
    }
}
