pub mod profile;
pub mod quiz;
pub mod result;
pub mod session;

pub use profile::Profile;
pub use quiz::{AnswerBuffer, AnswerError, Question};
pub use result::{MatchResult, Outcome};
pub use session::{MatchId, Stage};
