pub mod ledger;
pub mod scoring;
pub mod session;

pub use ledger::{Player, ScoreLedger, Standing};
pub use scoring::{pass_delta, rating_delta, Evaluation};
pub use session::{ChallengeRequest, Phase, RatingRequest, Session};
