use serde::{Deserialize, Serialize};

/// Final comparative outcome of a match, immutable once the backend reports
/// it. Absence of a result ("opponent not finished") is modelled as
/// `Option<MatchResult>` at the backend seam, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub own_score: i64,
    pub opponent_score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl MatchResult {
    /// Classifies the result from the owning player's perspective. Equal
    /// scores are a tie, never folded into a win or a loss.
    pub fn outcome(&self) -> Outcome {
        match self.own_score.cmp(&self.opponent_score) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Tie => "tie",
        })
    }
}
