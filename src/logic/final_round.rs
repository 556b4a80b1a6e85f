//! Round 3: quads rebuilt from the opening results, played across all four
//! courts at once.

use crate::logic::approval::validate_match_batch;
use crate::logic::numbering::assign_match_numbers;
use crate::logic::opening_rounds::{COURTS_PER_SIDE, PLAYERS_PER_SIDE};
use crate::logic::round_robin::quad_round_robin;
use crate::models::{
    active_courts_for_side, BracketSide, Court, GameMatch, MatchStatus, Player, PlayerId,
    PlayerRoundStats, Tournament, TournamentError, TournamentStatus,
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Matches in the final round: four quads of three pairings each.
pub const FINAL_MATCH_COUNT: usize = 12;

/// Proposed final round. The four quads are included so organizers can see
/// who ended up in which group before approving.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinalRoundSchedule {
    pub matches: Vec<GameMatch>,
    pub left_top: [PlayerId; 4],
    pub left_bottom: [PlayerId; 4],
    pub right_top: [PlayerId; 4],
    pub right_bottom: [PlayerId; 4],
    pub next_match_number: u32,
}

/// Rank one side's players by their rounds 1 and 2 results: games won
/// descending, then specials descending. The sort is stable, so remaining
/// ties keep roster order.
pub fn reseeded_order(
    players: &[Player],
    stats: &[PlayerRoundStats],
    side: BracketSide,
) -> Result<Vec<PlayerId>, TournamentError> {
    let mut side_players: Vec<&Player> = players.iter().filter(|p| p.side == side).collect();
    if side_players.len() != PLAYERS_PER_SIDE {
        return Err(TournamentError::InsufficientPlayers {
            side,
            required: PLAYERS_PER_SIDE,
            actual: side_players.len(),
        });
    }
    let totals = |id: PlayerId| -> (u32, u32) {
        stats
            .iter()
            .filter(|s| s.player_id == id && (s.round_number == 1 || s.round_number == 2))
            .fold((0, 0), |(won, specials), s| {
                (won + s.games_won, specials + s.specials_count)
            })
    };
    side_players.sort_by_key(|p| Reverse(totals(p.id)));
    Ok(side_players.iter().map(|p| p.id).collect())
}

/// Generate the final round: each side re-split into a top and a bottom quad
/// by opening results, each quad on its own court, all four courts playing in
/// parallel. Match numbers interleave across courts slot by slot so the
/// running order follows the hall, not one court at a time.
pub fn generate_final_round_schedule(
    players: &[Player],
    stats: &[PlayerRoundStats],
    courts: &[Court],
    start_number: u32,
) -> Result<FinalRoundSchedule, TournamentError> {
    let left = reseeded_order(players, stats, BracketSide::Left)?;
    let right = reseeded_order(players, stats, BracketSide::Right)?;
    let left_courts = active_courts_for_side(courts, BracketSide::Left);
    if left_courts.len() < COURTS_PER_SIDE {
        return Err(TournamentError::InsufficientCourts {
            side: BracketSide::Left,
            required: COURTS_PER_SIDE,
            actual: left_courts.len(),
        });
    }
    let right_courts = active_courts_for_side(courts, BracketSide::Right);
    if right_courts.len() < COURTS_PER_SIDE {
        return Err(TournamentError::InsufficientCourts {
            side: BracketSide::Right,
            required: COURTS_PER_SIDE,
            actual: right_courts.len(),
        });
    }

    let left_top = [left[0], left[1], left[2], left[3]];
    let left_bottom = [left[4], left[5], left[6], left[7]];
    let right_top = [right[0], right[1], right[2], right[3]];
    let right_bottom = [right[4], right[5], right[6], right[7]];
    let groups = [
        (quad_round_robin(left_top), left_courts[0]),
        (quad_round_robin(left_bottom), left_courts[1]),
        (quad_round_robin(right_top), right_courts[0]),
        (quad_round_robin(right_bottom), right_courts[1]),
    ];

    let mut matches = Vec::with_capacity(FINAL_MATCH_COUNT);
    for slot in 0..3usize {
        for (lineups, court) in &groups {
            matches.push(GameMatch::new(3, slot as u8 + 1, court.id, lineups[slot]));
        }
    }
    let next_match_number = assign_match_numbers(&mut matches, start_number);
    Ok(FinalRoundSchedule {
        matches,
        left_top,
        left_bottom,
        right_top,
        right_bottom,
        next_match_number,
    })
}

/// Build the final round preview from the tournament's own state. Requires
/// every opening match to be completed so the reseeding reflects real
/// results.
pub fn preview_final_round(t: &Tournament) -> Result<FinalRoundSchedule, TournamentError> {
    if t.has_round(3) {
        return Err(TournamentError::ScheduleAlreadyGenerated { round: 3 });
    }
    if t.matches.is_empty() {
        return Err(TournamentError::InvalidState);
    }
    if t.courts.is_empty() {
        return Err(TournamentError::CourtsNotLoaded);
    }
    for round in [1u8, 2] {
        if t.round_matches(round).any(|m| m.status != MatchStatus::Completed) {
            return Err(TournamentError::IncompleteResults { round });
        }
    }
    generate_final_round_schedule(&t.players, &t.round_stats, &t.courts, t.max_match_number() + 1)
}

/// Validate and install an approved final round. Numbering must continue
/// directly after the opening matches.
pub fn approve_final_round(
    t: &mut Tournament,
    schedule: FinalRoundSchedule,
) -> Result<(), TournamentError> {
    if t.has_round(3) {
        return Err(TournamentError::ScheduleAlreadyGenerated { round: 3 });
    }
    if t.matches.is_empty() {
        return Err(TournamentError::InvalidState);
    }
    for round in [1u8, 2] {
        if t.round_matches(round).any(|m| m.status != MatchStatus::Completed) {
            return Err(TournamentError::IncompleteResults { round });
        }
    }
    let start = t.max_match_number() + 1;
    validate_match_batch(t, &schedule.matches, &[3], FINAL_MATCH_COUNT, start)?;
    let mut matches = schedule.matches;
    matches.sort_by_key(|m| m.match_number);
    t.matches.extend(matches);
    t.final_round_stale = false;
    t.status = TournamentStatus::InProgress;
    Ok(())
}

/// Throw away the round 3 schedule and its derived stats, e.g. after an
/// opening result was corrected underneath it. The opening rounds stay as
/// they are; a fresh preview will re-seed from the corrected totals.
pub fn discard_final_round(t: &mut Tournament) -> Result<(), TournamentError> {
    if !t.has_round(3) {
        return Err(TournamentError::InvalidState);
    }
    t.matches.retain(|m| m.round_number != 3);
    t.round_stats.retain(|s| s.round_number != 3);
    t.final_round_stale = false;
    t.status = TournamentStatus::InProgress;
    Ok(())
}
