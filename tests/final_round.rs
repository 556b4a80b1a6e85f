//! Integration tests for final round reseeding, scheduling, and discard.

use padel_tournament_web::logic::{reseeded_order, FINAL_MATCH_COUNT};
use padel_tournament_web::{
    approve_final_round, approve_opening_schedule, complete_match, discard_final_round,
    preview_final_round, preview_opening_schedule, record_score, record_special, reopen_match,
    BracketSide, Court, MatchId, Player, PlayerId, PlayerRoundStats, Tournament, TournamentError,
    TournamentStatus,
};

fn setup_tournament() -> Tournament {
    let mut t = Tournament::new("Test night");
    for i in 0..8u32 {
        t.add_player(format!("L{i}"), BracketSide::Left, 80 - i).unwrap();
    }
    for i in 0..8u32 {
        t.add_player(format!("R{i}"), BracketSide::Right, 80 - i).unwrap();
    }
    t.add_court(Court::new("Court 1", BracketSide::Left, 1)).unwrap();
    t.add_court(Court::new("Court 2", BracketSide::Left, 2)).unwrap();
    t.add_court(Court::new("Court 3", BracketSide::Right, 1)).unwrap();
    t.add_court(Court::new("Court 4", BracketSide::Right, 2)).unwrap();
    t
}

fn started_tournament() -> Tournament {
    let mut t = setup_tournament();
    let schedule = preview_opening_schedule(&t).unwrap();
    approve_opening_schedule(&mut t, schedule).unwrap();
    t
}

/// Every opening match scored 5-3 for team 1 and completed.
fn openings_done() -> Tournament {
    let mut t = started_tournament();
    let ids: Vec<MatchId> = t.matches.iter().map(|m| m.id).collect();
    for id in ids {
        record_score(&mut t, id, 5, 3).unwrap();
        complete_match(&mut t, id).unwrap();
    }
    t
}

fn player_id(t: &Tournament, name: &str) -> PlayerId {
    t.players.iter().find(|p| p.name == name).unwrap().id
}

#[test]
fn preview_requires_an_opening_schedule() {
    let t = setup_tournament();
    assert!(matches!(
        preview_final_round(&t),
        Err(TournamentError::InvalidState)
    ));
}

#[test]
fn preview_requires_all_opening_matches_completed() {
    let t = started_tournament();
    assert!(matches!(
        preview_final_round(&t),
        Err(TournamentError::IncompleteResults { round: 1 })
    ));

    // Finish round 1 only; round 2 is then the blocker.
    let mut t = started_tournament();
    let round1: Vec<MatchId> = t
        .matches
        .iter()
        .filter(|m| m.round_number == 1)
        .map(|m| m.id)
        .collect();
    for id in round1 {
        record_score(&mut t, id, 4, 4).unwrap();
        complete_match(&mut t, id).unwrap();
    }
    assert!(matches!(
        preview_final_round(&t),
        Err(TournamentError::IncompleteResults { round: 2 })
    ));
}

#[test]
fn preview_requires_court_data() {
    let mut t = openings_done();
    t.courts.clear();
    assert!(matches!(
        preview_final_round(&t),
        Err(TournamentError::CourtsNotLoaded)
    ));
}

#[test]
fn reseeding_uses_opening_results_not_initial_seeding() {
    // With every match 5-3, the quad anchor (seed 1) wins all three slots.
    let t = openings_done();
    let schedule = preview_final_round(&t).unwrap();
    let expected_top = [
        player_id(&t, "L0"),
        player_id(&t, "L4"),
        player_id(&t, "L1"),
        player_id(&t, "L2"),
    ];
    let expected_bottom = [
        player_id(&t, "L3"),
        player_id(&t, "L5"),
        player_id(&t, "L6"),
        player_id(&t, "L7"),
    ];
    assert_eq!(schedule.left_top, expected_top);
    assert_eq!(schedule.left_bottom, expected_bottom);
}

#[test]
fn reseeding_breaks_win_ties_on_specials() {
    let mut t = openings_done();
    // L1, L2, L3 are tied on games won. A special lifts L3 above both.
    let l3 = player_id(&t, "L3");
    let match_with_l3 = t
        .matches
        .iter()
        .find(|m| m.round_number == 1 && m.lineup.contains(l3))
        .unwrap()
        .id;
    record_special(&mut t, match_with_l3, l3, "golden point").unwrap();
    let schedule = preview_final_round(&t).unwrap();
    assert_eq!(
        schedule.left_top,
        [
            player_id(&t, "L0"),
            player_id(&t, "L4"),
            player_id(&t, "L3"),
            player_id(&t, "L1"),
        ]
    );
}

#[test]
fn reseeding_ignores_final_round_rows() {
    let players: Vec<Player> = (0..8u32)
        .map(|i| Player::new(format!("P{i}"), BracketSide::Left, 50))
        .collect();
    let mut rows: Vec<PlayerRoundStats> = players
        .iter()
        .enumerate()
        .map(|(i, p)| PlayerRoundStats {
            player_id: p.id,
            round_number: 1,
            games_won: 40 - i as u32, // strictly decreasing: roster order wins
            games_lost: i as u32,
            specials_count: 0,
        })
        .collect();
    // A huge round 3 row for the last player must not affect the order.
    rows.push(PlayerRoundStats {
        player_id: players[7].id,
        round_number: 3,
        games_won: 100,
        games_lost: 0,
        specials_count: 0,
    });
    let order = reseeded_order(&players, &rows, BracketSide::Left).unwrap();
    let expected: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    assert_eq!(order, expected);
}

#[test]
fn final_round_runs_across_all_four_courts_with_interleaved_numbers() {
    let t = openings_done();
    let schedule = preview_final_round(&t).unwrap();
    assert_eq!(schedule.matches.len(), FINAL_MATCH_COUNT);
    assert_eq!(schedule.next_match_number, 37);
    let expected_courts = [t.courts[0].id, t.courts[1].id, t.courts[2].id, t.courts[3].id];
    for (i, m) in schedule.matches.iter().enumerate() {
        assert_eq!(m.round_number, 3);
        assert_eq!(m.match_number, 25 + i as u32);
        assert_eq!(m.round_within_group, 1 + i as u8 / 4); // 4 courts per slot
        assert_eq!(m.court_id, expected_courts[i % 4]);
    }
}

#[test]
fn approve_extends_the_schedule_and_clears_staleness() {
    let mut t = openings_done();
    let schedule = preview_final_round(&t).unwrap();
    approve_final_round(&mut t, schedule).unwrap();
    assert_eq!(t.matches.len(), 36);
    let numbers: Vec<u32> = t.matches.iter().map(|m| m.match_number).collect();
    assert_eq!(numbers[24..], (25..=36).collect::<Vec<u32>>()[..]);
    assert!(!t.final_round_stale);
    assert_eq!(t.status, TournamentStatus::InProgress);
    assert!(matches!(
        preview_final_round(&t),
        Err(TournamentError::ScheduleAlreadyGenerated { round: 3 })
    ));
}

#[test]
fn approve_rejects_numbering_that_does_not_continue() {
    let mut t = openings_done();
    let mut schedule = preview_final_round(&t).unwrap();
    schedule.matches[0].match_number = 24; // collides with the opening rounds
    assert!(matches!(
        approve_final_round(&mut t, schedule),
        Err(TournamentError::Validation(_))
    ));
    assert_eq!(t.matches.len(), 24);
}

#[test]
fn editing_an_opening_result_marks_the_final_round_stale() {
    let mut t = openings_done();
    let schedule = preview_final_round(&t).unwrap();
    approve_final_round(&mut t, schedule).unwrap();
    assert!(!t.final_round_stale);

    let first = t.matches[0].id;
    reopen_match(&mut t, first).unwrap();
    assert!(!t.final_round_stale); // reopening alone changes nothing

    record_score(&mut t, first, 5, 3).unwrap(); // same score: still not stale
    assert!(!t.final_round_stale);

    record_score(&mut t, first, 2, 6).unwrap();
    assert!(t.final_round_stale);
}

#[test]
fn final_round_scores_do_not_mark_anything_stale() {
    let mut t = openings_done();
    let schedule = preview_final_round(&t).unwrap();
    approve_final_round(&mut t, schedule).unwrap();
    let final_match = t
        .matches
        .iter()
        .find(|m| m.round_number == 3)
        .unwrap()
        .id;
    record_score(&mut t, final_match, 8, 0).unwrap();
    assert!(!t.final_round_stale);
}

#[test]
fn discard_removes_round_3_and_allows_a_fresh_preview() {
    let mut t = openings_done();
    let schedule = preview_final_round(&t).unwrap();
    approve_final_round(&mut t, schedule).unwrap();
    let final_match = t
        .matches
        .iter()
        .find(|m| m.round_number == 3)
        .unwrap()
        .id;
    record_score(&mut t, final_match, 6, 2).unwrap();
    assert!(t.round_stats.iter().any(|s| s.round_number == 3));

    // Make it stale, then throw it away.
    let first = t.matches[0].id;
    reopen_match(&mut t, first).unwrap();
    record_score(&mut t, first, 0, 8).unwrap();
    complete_match(&mut t, first).unwrap();
    assert!(t.final_round_stale);

    discard_final_round(&mut t).unwrap();
    assert_eq!(t.matches.len(), 24);
    assert!(t.round_stats.iter().all(|s| s.round_number != 3));
    assert!(!t.final_round_stale);
    // The corrected totals now drive a different reseeding.
    let fresh = preview_final_round(&t).unwrap();
    assert_ne!(fresh.left_top[0], player_id(&t, "L0"));
}

#[test]
fn discard_without_a_final_round_is_rejected() {
    let mut t = openings_done();
    assert!(matches!(
        discard_final_round(&mut t),
        Err(TournamentError::InvalidState)
    ));
}
