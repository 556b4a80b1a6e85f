//! Derived per-round stats and standings rows.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Per-(player, round) tallies. Always rebuilt from scratch for the whole
/// round whenever any score or special in that round changes, never patched
/// incrementally, so edits cannot drift the totals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRoundStats {
    pub player_id: PlayerId,
    pub round_number: u8,
    pub games_won: u32,
    /// `GAMES_PER_MATCH * matches played - games_won` for the round.
    pub games_lost: u32,
    pub specials_count: u32,
}

/// A ranked standings row. Positions are 1-based and numbered independently
/// per bracket side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub games_won: u32,
    pub games_lost: u32,
    pub specials_count: u32,
    pub position: u32,
}

/// Which stats rows a standings computation covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StandingsScope {
    /// One round of one tournament.
    Round(u8),
    /// All rounds of one tournament.
    Tournament,
    /// All rounds of every tournament the caller supplies rows for.
    Global,
}
