//! Player and bracket side data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Which of the two parallel player groups a player belongs to. Courts carry
/// the same tag (`row_side`); the two sides never cross-play.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    Left,
    Right,
}

impl BracketSide {
    /// Lowercase label as it appears in API payloads and error messages.
    pub fn label(self) -> &'static str {
        match self {
            BracketSide::Left => "left",
            BracketSide::Right => "right",
        }
    }
}

impl std::fmt::Display for BracketSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A player on the tournament roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Bracket group (left/right).
    pub side: BracketSide,
    /// Seeding input, higher is better. Only orders the opening pairings.
    pub seeding_score: u32,
    /// Career specials; seeding tie-breaker after the score.
    pub total_specials: u32,
    /// Career tournaments played; on exact seeding ties fewer ranks higher.
    pub total_tournaments: u32,
}

impl Player {
    /// Create a new player with no career history yet.
    pub fn new(name: impl Into<String>, side: BracketSide, seeding_score: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            side,
            seeding_score,
            total_specials: 0,
            total_tournaments: 0,
        }
    }
}
