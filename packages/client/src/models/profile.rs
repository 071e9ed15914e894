use serde::{Deserialize, Serialize};

/// A player's persistent identity and lifetime stats.
///
/// The backend owns this record; the client only ever replaces its copy with
/// a fresh fetch, never edits it field by field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub level: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub total_games: u32,
}
