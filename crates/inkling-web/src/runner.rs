use glam::Vec2;
use serde::Serialize;

use inkling_engine::provider::payload;
use inkling_engine::provider::port::{ChallengeProvider, ProviderError};
use inkling_engine::{
    color_for, ChallengeRequest, Evaluation, GameConfig, NoteBoard, NoteId, Phase, Player,
    RatingRequest, RequestSeq, ScriptedProvider, Session, Standing, Viewport,
};

/// Wires the session, the note board, and the viewport together for the
/// browser. JS calls the methods below from UI event handlers; provider
/// round trips leave as JSON request descriptors and come back through the
/// `deliver_*` methods tagged with their seq.
///
/// The runner remembers the request it handed out so a delivery can be
/// validated against the tier and exclusion set it was issued for.
pub struct SessionRunner {
    session: Session,
    board: NoteBoard,
    viewport: Viewport,
    viewport_size: Vec2,
    pending_challenge: Option<ChallengeRequest>,
    pending_rating: Option<RatingRequest>,
    offline: ScriptedProvider,
}

/// Everything the presentation layer needs to draw one frame of UI.
#[derive(Serialize)]
struct Snapshot<'a> {
    phase: Phase,
    round: u32,
    total_rounds: u32,
    current_player: usize,
    busy: bool,
    players: &'a [Player],
    clues: Vec<&'a str>,
    rationale: Option<&'a str>,
    /// The hidden answer, revealed only once the turn is being evaluated so
    /// the judge can score the guess against it. Null while guessing.
    secret: Option<&'a str>,
    /// Accepted alternative answers, revealed alongside the secret.
    alternatives: Vec<&'a str>,
    guess: Option<&'a str>,
    evaluation: Option<&'a Evaluation>,
    standings: Vec<Standing>,
    zoom: f32,
    notes: Vec<NoteView>,
}

/// One note as the presentation layer sees it: board position plus the
/// abstraction-derived color.
#[derive(Serialize)]
struct NoteView {
    id: u32,
    text: String,
    abstraction: u8,
    x: f32,
    y: f32,
    color: String,
}

impl SessionRunner {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: Session::new(config),
            board: NoteBoard::new(),
            viewport: Viewport::new(),
            viewport_size: Vec2::new(800.0, 600.0),
            pending_challenge: None,
            pending_rating: None,
            offline: ScriptedProvider::new(),
        }
    }

    // ---- Game operations ----

    pub fn confirm_order(&mut self) {
        self.session.confirm_order();
    }

    pub fn start_game(&mut self) -> Option<String> {
        let request = self.session.start_game()?;
        self.track_challenge(request)
    }

    pub fn retry(&mut self) -> Option<String> {
        let request = self.session.retry()?;
        self.track_challenge(request)
    }

    pub fn submit_guess(&mut self, guess: &str) -> Option<String> {
        let request = self.session.submit_guess(guess)?;
        let json = serde_json::to_string(&request).ok();
        self.pending_rating = Some(request);
        json
    }

    pub fn judge(&mut self, rating: u8) {
        self.session.judge(rating);
    }

    pub fn pass_turn(&mut self) {
        self.session.pass_turn();
    }

    pub fn advance_turn(&mut self) -> Option<String> {
        let request = self.session.advance_turn()?;
        self.track_challenge(request)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.pending_challenge = None;
        self.pending_rating = None;
    }

    // ---- Provider deliveries ----

    /// Apply a challenge response fetched by JS. The payload is validated
    /// against the request it answers; stale seqs are dropped.
    pub fn deliver_challenge(&mut self, seq: u64, json: &str) -> bool {
        let seq = RequestSeq(seq);
        let Some(request) = self.pending_challenge.as_ref().filter(|r| r.seq == seq) else {
            log::debug!("no pending challenge request for seq {}", seq.0);
            return false;
        };
        let excluded = request.excluded.iter().cloned().collect();
        let result = payload::challenge_from_json(json, request.tier, &excluded);
        self.pending_challenge = None;
        self.session.deliver_challenge(seq, result)
    }

    pub fn deliver_challenge_error(&mut self, seq: u64, message: &str) -> bool {
        let seq = RequestSeq(seq);
        if self.pending_challenge.as_ref().map(|r| r.seq) != Some(seq) {
            return false;
        }
        self.pending_challenge = None;
        self.session
            .deliver_challenge(seq, Err(ProviderError::Unavailable(message.to_string())))
    }

    pub fn deliver_rating(&mut self, seq: u64, json: &str) -> bool {
        let seq = RequestSeq(seq);
        if self.pending_rating.as_ref().map(|r| r.seq) != Some(seq) {
            return false;
        }
        self.pending_rating = None;
        let result = payload::rating_from_json(json);
        self.session.deliver_rating(seq, result)
    }

    pub fn deliver_rating_error(&mut self, seq: u64, message: &str) -> bool {
        let seq = RequestSeq(seq);
        if self.pending_rating.as_ref().map(|r| r.seq) != Some(seq) {
            return false;
        }
        self.pending_rating = None;
        self.session
            .deliver_rating(seq, Err(ProviderError::Unavailable(message.to_string())))
    }

    /// Answer the outstanding request from the built-in offline deck instead
    /// of a network backend. Used when no provider is reachable.
    pub fn fulfill_offline(&mut self) -> bool {
        if let Some(request) = self.pending_challenge.take() {
            let excluded = request.excluded.iter().cloned().collect();
            let result = self.offline.request_challenge(request.tier, &excluded);
            return self.session.deliver_challenge(request.seq, result);
        }
        if let Some(request) = self.pending_rating.take() {
            let result = self
                .offline
                .request_rating(&request.secret, &request.guess);
            return self.session.deliver_rating(request.seq, result);
        }
        false
    }

    // ---- Note board ----

    /// Drop a note at the current viewport center. Returns the new id, or
    /// None for blank text.
    pub fn place_note(&mut self, text: &str, abstraction: u8) -> Option<u32> {
        let center = self.viewport.board_center(self.viewport_size);
        self.board.place(text, abstraction, center).map(|id| id.0)
    }

    pub fn remove_note(&mut self, id: u32) -> bool {
        self.board.remove(NoteId(id)).is_some()
    }

    pub fn begin_drag(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.board.begin_drag(NoteId(id), Vec2::new(x, y))
    }

    pub fn update_drag(&mut self, x: f32, y: f32) {
        self.board
            .update_drag(Vec2::new(x, y), self.viewport.zoom());
    }

    pub fn end_drag(&mut self) {
        self.board.end_drag();
    }

    // ---- Viewport ----

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport_size = Vec2::new(width, height);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.viewport.pan(Vec2::new(dx, dy));
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn zoom(&self) -> f32 {
        self.viewport.zoom()
    }

    // ---- Snapshot ----

    /// Serialize the visible state for the presentation layer.
    pub fn snapshot(&self) -> String {
        let challenge = self.session.challenge();
        // The answer stays hidden until the current player is done guessing.
        let revealed = matches!(
            self.session.phase(),
            Phase::Evaluating | Phase::Finished
        );
        let snapshot = Snapshot {
            phase: self.session.phase(),
            round: self.session.round(),
            total_rounds: self.session.total_rounds(),
            current_player: self.session.current_player(),
            busy: self.session.is_busy(),
            players: self.session.ledger().players(),
            clues: challenge
                .map(|c| c.clues.iter().map(String::as_str).collect())
                .unwrap_or_default(),
            rationale: challenge.and_then(|c| c.rationale.as_deref()),
            secret: challenge.filter(|_| revealed).map(|c| c.secret.as_str()),
            alternatives: challenge
                .filter(|_| revealed)
                .map(|c| c.alternatives.iter().map(String::as_str).collect())
                .unwrap_or_default(),
            guess: self.session.guess(),
            evaluation: self.session.evaluation(),
            standings: self.session.standings(),
            zoom: self.viewport.zoom(),
            notes: self
                .board
                .iter()
                .map(|note| NoteView {
                    id: note.id.0,
                    text: note.text.clone(),
                    abstraction: note.abstraction,
                    x: note.pos.x,
                    y: note.pos.y,
                    color: color_for(note.abstraction).css_hex(),
                })
                .collect(),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|e| {
            log::error!("snapshot serialization failed: {e}");
            "{}".to_string()
        })
    }

    fn track_challenge(&mut self, request: ChallengeRequest) -> Option<String> {
        let json = serde_json::to_string(&request).ok();
        self.pending_challenge = Some(request);
        json
    }
}
