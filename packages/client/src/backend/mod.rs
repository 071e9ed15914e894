mod errors;
mod http;

pub use errors::BackendError;
pub use http::HttpBackend;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::models::{MatchId, MatchResult, Profile, Question};

/// The duel backend as seen by the client.
///
/// Pairing, question generation, scoring, and profile persistence all live
/// behind this seam. "Nothing available yet" (no opponent, no result) is a
/// normal `None`, distinct from a failed call.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DuelBackend: Send + Sync {
    /// Registers the player's identity for this session. Re-login with a
    /// different name overwrites the identity.
    async fn login(&self, name: &str) -> Result<(), BackendError>;

    /// Fetches the latest persisted stats for the logged-in player.
    async fn get_profile(&self) -> Result<Profile, BackendError>;

    /// Asks the matchmaking pool for a pairing. `None` means no opponent is
    /// currently available; the caller decides whether to ask again.
    async fn find_match(&self) -> Result<Option<MatchId>, BackendError>;

    /// Fetches the match's fixed, ordered question set.
    async fn get_questions(&self, id: &MatchId) -> Result<Vec<Question>, BackendError>;

    /// Sends the full answer sequence, one integer per question, in question
    /// order. Duplicate submissions for the same match are the server's
    /// problem to reject or ignore.
    async fn submit_answers(&self, id: &MatchId, answers: &[i64]) -> Result<(), BackendError>;

    /// One poll for the final outcome. `None` means the opponent has not
    /// finished yet.
    async fn get_result(&self, id: &MatchId) -> Result<Option<MatchResult>, BackendError>;
}
