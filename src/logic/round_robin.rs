//! Fixed round-robin pattern for a group of four.

use crate::models::{Lineup, PlayerId};

/// The three pairings of a 4-player doubles round robin, as index pairs into
/// a seeded quad `[0..4]`. Every player partners each of the other three
/// exactly once and opposes each exactly twice.
pub const QUAD_PAIRINGS: [([usize; 2], [usize; 2]); 3] = [
    ([0, 2], [1, 3]),
    ([0, 3], [1, 2]),
    ([0, 1], [2, 3]),
];

/// Expand a quad into its three doubles lineups, in slot order.
pub fn quad_round_robin(quad: [PlayerId; 4]) -> [Lineup; 3] {
    QUAD_PAIRINGS.map(|(a, b)| Lineup::Doubles {
        team1: [quad[a[0]], quad[a[1]]],
        team2: [quad[b[0]], quad[b[1]]],
    })
}
