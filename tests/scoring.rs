//! Integration tests for score entry, match lifecycle, specials, and the
//! derived per-round stats.

use padel_tournament_web::{
    approve_opening_schedule, complete_match, preview_opening_schedule, record_score,
    record_special, remove_special, reopen_match, BracketSide, Court, GameMatch, Lineup, MatchId,
    PlayerId, Team, Tournament, TournamentError,
};
use uuid::Uuid;

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

fn stats_row(t: &Tournament, player_id: PlayerId, round: u8) -> (u32, u32, u32) {
    let row = t
        .round_stats
        .iter()
        .find(|s| s.player_id == player_id && s.round_number == round)
        .unwrap();
    (row.games_won, row.games_lost, row.specials_count)
}

#[test]
fn scores_must_add_up_to_eight() {
    let mut t = started_tournament();
    let id = t.matches[0].id;
    for (team1, team2) in [(5, 4), (9, 0), (0, 0), (8, 1)] {
        assert!(matches!(
            record_score(&mut t, id, team1, team2),
            Err(TournamentError::ScoreSumInvalid { .. })
        ));
    }
    record_score(&mut t, id, 8, 0).unwrap();
    record_score(&mut t, id, 4, 4).unwrap();
}

#[test]
fn scoring_an_unknown_match_fails() {
    let mut t = started_tournament();
    let bogus: MatchId = Uuid::new_v4();
    assert!(matches!(
        record_score(&mut t, bogus, 4, 4),
        Err(TournamentError::MatchNotFound(_))
    ));
}

#[test]
fn completed_scores_are_locked_until_reopened() {
    let mut t = started_tournament();
    let id = t.matches[0].id;
    record_score(&mut t, id, 5, 3).unwrap();
    complete_match(&mut t, id).unwrap();
    assert!(matches!(
        record_score(&mut t, id, 6, 2),
        Err(TournamentError::InvalidMatchStatus { .. })
    ));
    reopen_match(&mut t, id).unwrap();
    record_score(&mut t, id, 6, 2).unwrap();
    assert_eq!(t.matches[0].score.unwrap().team1, 6);
    assert!(t.matches[0].completed_at.is_none());
}

#[test]
fn completing_requires_a_score_on_the_board() {
    let mut t = started_tournament();
    let id = t.matches[0].id;
    // Still scheduled: no score ever recorded.
    assert!(matches!(
        complete_match(&mut t, id),
        Err(TournamentError::InvalidMatchStatus { .. })
    ));
    record_score(&mut t, id, 5, 3).unwrap();
    complete_match(&mut t, id).unwrap();
    assert!(t.matches[0].completed_at.is_some());
    // Completing twice is also rejected.
    assert!(matches!(
        complete_match(&mut t, id),
        Err(TournamentError::InvalidMatchStatus { .. })
    ));
}

#[test]
fn complete_match_reports_when_the_whole_tournament_is_done() {
    let mut t = started_tournament();
    let ids: Vec<MatchId> = t.matches.iter().map(|m| m.id).collect();
    let last = *ids.last().unwrap();
    for id in &ids {
        record_score(&mut t, *id, 4, 4).unwrap();
        let all_done = complete_match(&mut t, *id).unwrap();
        assert_eq!(all_done, *id == last);
    }
}

#[test]
fn stats_are_rebuilt_not_accumulated() {
    let mut t = started_tournament();
    let id = t.matches[0].id;
    let winner = t.matches[0].lineup.team_players(Team::One)[0];
    record_score(&mut t, id, 5, 3).unwrap();
    assert_eq!(stats_row(&t, winner, 1), (5, 3, 0));
    // Editing the score replaces the tallies instead of stacking them.
    record_score(&mut t, id, 6, 2).unwrap();
    assert_eq!(stats_row(&t, winner, 1), (6, 2, 0));
    complete_match(&mut t, id).unwrap();
    assert_eq!(stats_row(&t, winner, 1), (6, 2, 0));
}

#[test]
fn only_started_matches_feed_the_stats() {
    let mut t = started_tournament();
    assert!(t.round_stats.is_empty());
    let id = t.matches[0].id;
    record_score(&mut t, id, 5, 3).unwrap();
    // One match on the board: exactly its four players have rows.
    assert_eq!(t.round_stats.len(), 4);
    assert!(t.round_stats.iter().all(|s| s.round_number == 1));
}

#[test]
fn reopen_and_rescore_keeps_stats_consistent() {
    let mut t = started_tournament();
    let id = t.matches[0].id;
    let winner = t.matches[0].lineup.team_players(Team::One)[0];
    record_score(&mut t, id, 5, 3).unwrap();
    complete_match(&mut t, id).unwrap();
    reopen_match(&mut t, id).unwrap();
    assert_eq!(stats_row(&t, winner, 1), (5, 3, 0)); // score still counts
    record_score(&mut t, id, 1, 7).unwrap();
    complete_match(&mut t, id).unwrap();
    assert_eq!(stats_row(&t, winner, 1), (1, 7, 0));
    assert_eq!(t.round_stats.len(), 4);
}

#[test]
fn specials_stack_per_label_and_remove_one_at_a_time() {
    let mut t = started_tournament();
    let id = t.matches[0].id;
    let player = t.matches[0].lineup.players()[0];
    record_score(&mut t, id, 5, 3).unwrap();
    record_special(&mut t, id, player, "golden point").unwrap();
    record_special(&mut t, id, player, "golden point").unwrap();
    record_special(&mut t, id, player, "smash of the night").unwrap();
    let m = t.game_match(id).unwrap();
    assert_eq!(m.specials.len(), 2);
    assert_eq!(stats_row(&t, player, 1).2, 3);

    remove_special(&mut t, id, player, "golden point").unwrap();
    assert_eq!(stats_row(&t, player, 1).2, 2);
    remove_special(&mut t, id, player, "golden point").unwrap();
    let m = t.game_match(id).unwrap();
    assert_eq!(m.specials.len(), 1); // entry gone at zero
    assert!(matches!(
        remove_special(&mut t, id, player, "golden point"),
        Err(TournamentError::Validation(_))
    ));
}

#[test]
fn specials_require_a_match_participant() {
    let mut t = started_tournament();
    let id = t.matches[0].id; // a left-row match
    record_score(&mut t, id, 5, 3).unwrap();
    let right_player = t
        .players
        .iter()
        .find(|p| p.side == BracketSide::Right)
        .unwrap()
        .id;
    assert!(matches!(
        record_special(&mut t, id, right_player, "golden point"),
        Err(TournamentError::Validation(_))
    ));
    assert!(matches!(
        record_special(&mut t, id, Uuid::new_v4(), "golden point"),
        Err(TournamentError::PlayerNotFound(_))
    ));
    let participant = t.matches[0].lineup.players()[0];
    assert!(matches!(
        record_special(&mut t, id, participant, "   "),
        Err(TournamentError::Validation(_))
    ));
}

#[test]
fn specials_are_rejected_before_play_starts() {
    let mut t = started_tournament();
    let id = t.matches[0].id;
    let player = t.matches[0].lineup.players()[0];
    assert!(matches!(
        record_special(&mut t, id, player, "golden point"),
        Err(TournamentError::InvalidMatchStatus { .. })
    ));
}

#[test]
fn singles_friendlies_score_through_the_same_path() {
    let mut t = Tournament::new("Friendly");
    t.add_player("Ana", BracketSide::Left, 10).unwrap();
    t.add_player("Bea", BracketSide::Left, 10).unwrap();
    t.add_court(Court::new("Club court", BracketSide::Left, 1)).unwrap();
    let ana = t.players[0].id;
    let bea = t.players[1].id;
    let mut m = GameMatch::new(1, 1, t.courts[0].id, Lineup::Singles {
        player1: ana,
        player2: bea,
    });
    m.match_number = 1;
    t.matches.push(m);

    let id = t.matches[0].id;
    record_score(&mut t, id, 8, 0).unwrap();
    record_special(&mut t, id, ana, "golden point").unwrap();
    complete_match(&mut t, id).unwrap();
    assert_eq!(stats_row(&t, ana, 1), (8, 0, 1));
    assert_eq!(stats_row(&t, bea, 1), (0, 8, 0));
}
