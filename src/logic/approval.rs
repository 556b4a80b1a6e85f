//! Shared validation for approving a (possibly edited) schedule batch.

use crate::models::{
    CourtId, GameMatch, Lineup, MatchStatus, Player, PlayerId, Tournament, TournamentError,
};
use std::collections::HashSet;

/// Re-check a schedule batch against the tournament's roster and courts
/// before installing it.
///
/// A preview can be edited between generation and approval, so this verifies
/// shape from scratch: round structure, per-court sequencing, contiguous
/// numbering from `start_number`, known references, and booking conflicts.
/// It does not re-derive pairing balance; reshuffling players is exactly
/// what the edit phase is for.
pub(crate) fn validate_match_batch(
    t: &Tournament,
    matches: &[GameMatch],
    expected_rounds: &[u8],
    expected_len: usize,
    start_number: u32,
) -> Result<(), TournamentError> {
    if matches.len() != expected_len {
        return Err(TournamentError::Validation(format!(
            "Schedule must contain {} matches (got {})",
            expected_len,
            matches.len()
        )));
    }
    for round in expected_rounds {
        if !matches.iter().any(|m| m.round_number == *round) {
            return Err(TournamentError::Validation(format!(
                "Schedule is missing round {}",
                round
            )));
        }
    }

    let mut numbers: Vec<u32> = matches.iter().map(|m| m.match_number).collect();
    numbers.sort_unstable();
    let expected: Vec<u32> = (start_number..start_number + matches.len() as u32).collect();
    if numbers != expected {
        return Err(TournamentError::Validation(format!(
            "Match numbers must run {} to {} without gaps or duplicates",
            start_number,
            start_number + matches.len() as u32 - 1
        )));
    }

    // (round, court, sequence) and (round, sequence, player) must be unique:
    // a court hosts one match per slot, a player plays on one court per slot.
    let mut court_slots: HashSet<(u8, CourtId, u8)> = HashSet::new();
    let mut player_slots: HashSet<(u8, u8, PlayerId)> = HashSet::new();

    for m in matches {
        let label = format!("Match {}", m.match_number);
        if !expected_rounds.contains(&m.round_number) {
            return Err(TournamentError::Validation(format!(
                "{}: unexpected round {}",
                label, m.round_number
            )));
        }
        if !(1..=3).contains(&m.round_within_group) {
            return Err(TournamentError::Validation(format!(
                "{}: sequence number {} is out of range",
                label, m.round_within_group
            )));
        }
        if m.status != MatchStatus::Scheduled || m.score.is_some() || !m.specials.is_empty() {
            return Err(TournamentError::Validation(format!(
                "{}: must be scheduled with no result yet",
                label
            )));
        }

        let court = t.court(m.court_id).ok_or_else(|| {
            TournamentError::Validation(format!("{}: unknown court", label))
        })?;
        if !court.is_active {
            return Err(TournamentError::Validation(format!(
                "{}: court '{}' is not active",
                label, court.name
            )));
        }

        let (team1, team2) = match m.lineup {
            Lineup::Doubles { team1, team2 } => (team1, team2),
            Lineup::Singles { .. } => {
                return Err(TournamentError::Validation(format!(
                    "{}: tournament rounds are doubles",
                    label
                )))
            }
        };
        let ids = [team1[0], team1[1], team2[0], team2[1]];
        let mut seen: HashSet<PlayerId> = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(TournamentError::Validation(format!(
                    "{}: the same player appears on both teams",
                    label
                )));
            }
        }
        let players: Vec<&Player> = ids
            .iter()
            .map(|id| {
                t.player(*id).ok_or_else(|| {
                    TournamentError::Validation(format!("{}: unknown player", label))
                })
            })
            .collect::<Result<_, _>>()?;
        if players.iter().any(|p| p.side != players[0].side) {
            return Err(TournamentError::Validation(format!(
                "{}: lineup mixes bracket sides",
                label
            )));
        }
        if court.row_side != players[0].side {
            return Err(TournamentError::Validation(format!(
                "{}: court '{}' is on the {} row",
                label, court.name, court.row_side
            )));
        }

        if !court_slots.insert((m.round_number, m.court_id, m.round_within_group)) {
            return Err(TournamentError::Validation(format!(
                "{}: court '{}' already has a match in this slot",
                label, court.name
            )));
        }
        for id in ids {
            if !player_slots.insert((m.round_number, m.round_within_group, id)) {
                return Err(TournamentError::Validation(format!(
                    "{}: a player is booked on two courts in the same slot",
                    label
                )));
            }
        }
    }

    Ok(())
}
