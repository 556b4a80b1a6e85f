//! Seeding order for the opening pairings.

use crate::models::Player;
use std::cmp::Reverse;

/// Order players for seeding: seeding score descending, then career specials
/// descending, then fewer career tournaments first. The sort is stable, so
/// players tied on all three keep their roster order.
pub fn seeding_order<'a>(players: &[&'a Player]) -> Vec<&'a Player> {
    let mut out = players.to_vec();
    out.sort_by_key(|p| {
        (
            Reverse(p.seeding_score),
            Reverse(p.total_specials),
            p.total_tournaments,
        )
    });
    out
}
