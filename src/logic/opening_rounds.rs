//! Rounds 1 and 2: seeded quads playing a fixed round robin on their court.

use crate::logic::approval::validate_match_batch;
use crate::logic::numbering::assign_match_numbers;
use crate::logic::round_robin::quad_round_robin;
use crate::logic::seeding::seeding_order;
use crate::models::{
    active_courts_for_side, BracketSide, Court, GameMatch, Player, PlayerId, Tournament,
    TournamentError, TournamentStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Players required on each bracket side before scheduling.
pub const PLAYERS_PER_SIDE: usize = 8;
/// Active courts required on each side's row (one per quad).
pub const COURTS_PER_SIDE: usize = 2;
/// Total matches in the opening schedule: both sides, rounds 1 and 2.
pub const OPENING_MATCH_COUNT: usize = 24;

/// Proposed opening schedule, numbered from 1 with the left row first.
/// Nothing is stored at preview time; organizers may edit the lineups before
/// sending the batch back for approval.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpeningSchedule {
    pub matches: Vec<GameMatch>,
    /// Where round 3 numbering would continue.
    pub next_match_number: u32,
}

/// Generate one side's matches for rounds 1 and 2.
///
/// The side's eight players are seeded, split into a top and a bottom quad,
/// and each quad plays its three-pairing round robin on its own court (top
/// quad on the side's first court by menu order). Round 2 repeats the round 1
/// pairings: with four players there is exactly one schedule in which
/// everyone partners everyone once, so a second pass is the only balanced
/// way to double the playing time.
pub fn generate_opening_schedule(
    players: &[Player],
    side: BracketSide,
    courts: &[Court],
    start_number: u32,
) -> Result<Vec<GameMatch>, TournamentError> {
    let side_players: Vec<&Player> = players.iter().filter(|p| p.side == side).collect();
    if side_players.len() != PLAYERS_PER_SIDE {
        return Err(TournamentError::InsufficientPlayers {
            side,
            required: PLAYERS_PER_SIDE,
            actual: side_players.len(),
        });
    }
    let mut ids = HashSet::new();
    if !side_players.iter().all(|p| ids.insert(p.id)) {
        return Err(TournamentError::Validation(format!(
            "Duplicate player id in the {} row",
            side
        )));
    }
    let side_courts = active_courts_for_side(courts, side);
    if side_courts.len() < COURTS_PER_SIDE {
        return Err(TournamentError::InsufficientCourts {
            side,
            required: COURTS_PER_SIDE,
            actual: side_courts.len(),
        });
    }

    let seeded = seeding_order(&side_players);
    let top_quad: [PlayerId; 4] = [seeded[0].id, seeded[1].id, seeded[2].id, seeded[3].id];
    let bottom_quad: [PlayerId; 4] = [seeded[4].id, seeded[5].id, seeded[6].id, seeded[7].id];
    let groups = [
        (quad_round_robin(top_quad), side_courts[0]),
        (quad_round_robin(bottom_quad), side_courts[1]),
    ];

    let mut matches = Vec::with_capacity(OPENING_MATCH_COUNT / 2);
    for round in [1u8, 2] {
        for slot in 0..3usize {
            for (lineups, court) in &groups {
                matches.push(GameMatch::new(round, slot as u8 + 1, court.id, lineups[slot]));
            }
        }
    }
    assign_match_numbers(&mut matches, start_number);
    Ok(matches)
}

/// Build the full opening preview: left row numbered from 1, then the right
/// row continuing the sequence.
pub fn preview_opening_schedule(t: &Tournament) -> Result<OpeningSchedule, TournamentError> {
    if !t.matches.is_empty() {
        return Err(TournamentError::ScheduleAlreadyGenerated { round: 1 });
    }
    let mut matches = generate_opening_schedule(&t.players, BracketSide::Left, &t.courts, 1)?;
    let right_start = matches.len() as u32 + 1;
    let mut right =
        generate_opening_schedule(&t.players, BracketSide::Right, &t.courts, right_start)?;
    matches.append(&mut right);
    let next_match_number = matches.len() as u32 + 1;
    Ok(OpeningSchedule {
        matches,
        next_match_number,
    })
}

/// Validate and install an approved opening schedule, then start play.
pub fn approve_opening_schedule(
    t: &mut Tournament,
    schedule: OpeningSchedule,
) -> Result<(), TournamentError> {
    if !t.matches.is_empty() {
        return Err(TournamentError::ScheduleAlreadyGenerated { round: 1 });
    }
    validate_match_batch(t, &schedule.matches, &[1, 2], OPENING_MATCH_COUNT, 1)?;
    let mut matches = schedule.matches;
    matches.sort_by_key(|m| m.match_number);
    t.matches = matches;
    t.status = TournamentStatus::InProgress;
    Ok(())
}
