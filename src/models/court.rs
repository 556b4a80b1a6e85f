//! Court data and per-side court selection.

use crate::models::player::BracketSide;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a court.
pub type CourtId = Uuid;

/// A bookable court. `row_side` says which hall row the court is in, and
/// therefore which bracket group may play on it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    pub is_active: bool,
    pub row_side: BracketSide,
    /// Display position; also the deterministic assignment tie-break (the
    /// lowest `menu_order` court on a side hosts that side's top group).
    pub menu_order: u32,
}

impl Court {
    /// Create an active court.
    pub fn new(name: impl Into<String>, row_side: BracketSide, menu_order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
            row_side,
            menu_order,
        }
    }
}

/// Active courts on one side, ordered by `menu_order` (input order on ties).
pub fn active_courts_for_side(courts: &[Court], side: BracketSide) -> Vec<&Court> {
    let mut out: Vec<&Court> = courts
        .iter()
        .filter(|c| c.is_active && c.row_side == side)
        .collect();
    out.sort_by_key(|c| c.menu_order);
    out
}
