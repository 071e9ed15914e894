use serde::{Deserialize, Serialize};

use crate::models::{AnswerBuffer, MatchResult, Profile, Question};

/// Opaque server-assigned identifier for a pairing between two players.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        MatchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five mutually exclusive phases of one play session.
///
/// Each variant carries exactly the data that is valid for that phase, so an
/// illegal combination (a match without questions, a result without a
/// refreshed profile) cannot be constructed. Transitions happen only inside
/// [`crate::services::SessionService`]; everything a round accumulated is
/// dropped when the session leaves [`Stage::Resolved`].
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    LoggedOut,
    Authenticated(Profile),
    Matched {
        match_id: MatchId,
        questions: Vec<Question>,
        answers: AnswerBuffer,
    },
    Submitted {
        match_id: MatchId,
    },
    Resolved {
        profile: Profile,
        result: MatchResult,
    },
}

impl Stage {
    /// Stage name for diagnostics and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::LoggedOut => "LoggedOut",
            Stage::Authenticated(_) => "Authenticated",
            Stage::Matched { .. } => "Matched",
            Stage::Submitted { .. } => "Submitted",
            Stage::Resolved { .. } => "Resolved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_is_transparent_on_the_wire() {
        let id: MatchId = serde_json::from_str(r#""m1""#).unwrap();

        assert_eq!(id, MatchId::new("m1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""m1""#);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::LoggedOut.name(), "LoggedOut");
        assert_eq!(
            Stage::Submitted {
                match_id: MatchId::new("m1")
            }
            .name(),
            "Submitted"
        );
    }
}
