//! Ranked standings aggregated from stats rows.

use crate::models::{BracketSide, Player, PlayerRoundStats, Standing, StandingsScope, Tournament};
use std::cmp::Reverse;

/// Aggregate stats rows into ranked standings for one bracket side.
///
/// `roster` resolves names and sides; rows whose player is missing from it
/// are skipped (relevant for the global scope, where rows and rosters from
/// several tournaments are concatenated). Ordering is games won descending
/// with specials as the tie-breaker; the sort is stable, so full ties keep
/// the order in which players first appear in `rows`.
pub fn compute_standings(
    rows: &[PlayerRoundStats],
    roster: &[Player],
    side: BracketSide,
    scope: StandingsScope,
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = Vec::new();
    for row in rows {
        if let StandingsScope::Round(round) = scope {
            if row.round_number != round {
                continue;
            }
        }
        let player = match roster.iter().find(|p| p.id == row.player_id) {
            Some(p) => p,
            None => continue,
        };
        if player.side != side {
            continue;
        }
        match standings.iter_mut().find(|s| s.player_id == row.player_id) {
            Some(s) => {
                s.games_won += row.games_won;
                s.games_lost += row.games_lost;
                s.specials_count += row.specials_count;
            }
            None => standings.push(Standing {
                player_id: row.player_id,
                name: player.name.clone(),
                games_won: row.games_won,
                games_lost: row.games_lost,
                specials_count: row.specials_count,
                position: 0,
            }),
        }
    }
    standings.sort_by_key(|s| Reverse((s.games_won, s.specials_count)));
    for (i, s) in standings.iter_mut().enumerate() {
        s.position = i as u32 + 1;
    }
    standings
}

/// Standings for one side of a single tournament.
pub fn tournament_standings(
    t: &Tournament,
    side: BracketSide,
    scope: StandingsScope,
) -> Vec<Standing> {
    compute_standings(&t.round_stats, &t.players, side, scope)
}
