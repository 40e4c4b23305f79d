// provider/mod.rs
//
// External collaborator boundary: the generative backend that supplies
// challenges and (at the easiest tier) guess ratings. Pure request/response:
// repetition avoidance state travels in the request, not the provider.

pub mod payload;
pub mod port;
pub mod scripted;

pub use payload::{challenge_from_json, rating_from_json};
pub use port::{Challenge, ChallengeProvider, ProviderError, RatingReply};
pub use scripted::ScriptedProvider;
