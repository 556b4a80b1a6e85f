//! Score entry, match lifecycle, specials, and the per-round stats rebuild.

use crate::models::{
    MatchId, MatchStatus, PlayerId, PlayerRoundStats, Score, Special, Tournament, TournamentError,
    GAMES_PER_MATCH,
};
use chrono::Utc;

/// Record or update a match score. Scores on completed matches are locked;
/// reopen the match first. Changing an opening-round result after the final
/// round was generated flags the final round as stale.
pub fn record_score(
    t: &mut Tournament,
    match_id: MatchId,
    team1: u8,
    team2: u8,
) -> Result<(), TournamentError> {
    if team1 > GAMES_PER_MATCH || team2 > GAMES_PER_MATCH || team1 + team2 != GAMES_PER_MATCH {
        return Err(TournamentError::ScoreSumInvalid { team1, team2 });
    }
    let has_final = t.has_round(3);
    let m = t
        .match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.status == MatchStatus::Completed {
        return Err(TournamentError::InvalidMatchStatus { actual: m.status });
    }
    let score = Score { team1, team2 };
    let changed = m.score != Some(score);
    m.score = Some(score);
    m.status = MatchStatus::InProgress;
    let round = m.round_number;
    if changed && round < 3 && has_final {
        t.final_round_stale = true;
    }
    recompute_round_stats(t, round);
    Ok(())
}

/// Mark an in-progress match as completed. Returns whether every match in
/// the tournament is now completed, so the caller can close out the
/// tournament itself.
pub fn complete_match(t: &mut Tournament, match_id: MatchId) -> Result<bool, TournamentError> {
    let m = t
        .match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.status != MatchStatus::InProgress {
        return Err(TournamentError::InvalidMatchStatus { actual: m.status });
    }
    m.status = MatchStatus::Completed;
    m.completed_at = Some(Utc::now());
    let round = m.round_number;
    recompute_round_stats(t, round);
    Ok(t.matches.iter().all(|m| m.status == MatchStatus::Completed))
}

/// Reopen a completed match for corrections. The recorded score stays on the
/// board (and in the stats) until it is actually edited.
pub fn reopen_match(t: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    let m = t
        .match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.status != MatchStatus::Completed {
        return Err(TournamentError::InvalidMatchStatus { actual: m.status });
    }
    m.status = MatchStatus::InProgress;
    m.completed_at = None;
    Ok(())
}

/// Record one special for a player in a match, stacking onto an existing
/// entry with the same label. Specials never change a match score; they only
/// break ranking ties.
pub fn record_special(
    t: &mut Tournament,
    match_id: MatchId,
    player_id: PlayerId,
    label: &str,
) -> Result<(), TournamentError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(TournamentError::Validation(
            "Special label must not be empty".to_string(),
        ));
    }
    if t.player(player_id).is_none() {
        return Err(TournamentError::PlayerNotFound(player_id));
    }
    let has_final = t.has_round(3);
    let m = t
        .match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.status == MatchStatus::Scheduled {
        return Err(TournamentError::InvalidMatchStatus { actual: m.status });
    }
    if !m.lineup.contains(player_id) {
        return Err(TournamentError::Validation(
            "That player is not part of this match".to_string(),
        ));
    }
    match m
        .specials
        .iter_mut()
        .find(|s| s.player_id == player_id && s.label == label)
    {
        Some(s) => s.count += 1,
        None => m.specials.push(Special {
            player_id,
            label: label.to_string(),
            count: 1,
        }),
    }
    let round = m.round_number;
    if round < 3 && has_final {
        t.final_round_stale = true;
    }
    recompute_round_stats(t, round);
    Ok(())
}

/// Take back one special with the given label. The entry disappears entirely
/// when its count reaches zero.
pub fn remove_special(
    t: &mut Tournament,
    match_id: MatchId,
    player_id: PlayerId,
    label: &str,
) -> Result<(), TournamentError> {
    let label = label.trim();
    let has_final = t.has_round(3);
    let m = t
        .match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let idx = m
        .specials
        .iter()
        .position(|s| s.player_id == player_id && s.label == label)
        .ok_or_else(|| {
            TournamentError::Validation(format!(
                "No '{}' special recorded for that player",
                label
            ))
        })?;
    if m.specials[idx].count > 1 {
        m.specials[idx].count -= 1;
    } else {
        m.specials.remove(idx);
    }
    let round = m.round_number;
    if round < 3 && has_final {
        t.final_round_stale = true;
    }
    recompute_round_stats(t, round);
    Ok(())
}

/// Rebuild every stats row of one round from its matches. The full recompute
/// keeps edits, reopens, and removals idempotent: the rows always equal what
/// the current match data says, regardless of the path that led there.
fn recompute_round_stats(t: &mut Tournament, round: u8) {
    let mut rows: Vec<PlayerRoundStats> = Vec::new();
    for player in &t.players {
        let mut played: u32 = 0;
        let mut games_won: u32 = 0;
        let mut specials_count: u32 = 0;
        for m in t.matches.iter().filter(|m| m.round_number == round) {
            if !m.counts_for_stats() || !m.lineup.contains(player.id) {
                continue;
            }
            played += 1;
            games_won += m.games_won_by(player.id);
            specials_count += m.special_count_of(player.id);
        }
        if played > 0 {
            rows.push(PlayerRoundStats {
                player_id: player.id,
                round_number: round,
                games_won,
                games_lost: played * u32::from(GAMES_PER_MATCH) - games_won,
                specials_count,
            });
        }
    }
    t.round_stats.retain(|s| s.round_number != round);
    t.round_stats.extend(rows);
}
