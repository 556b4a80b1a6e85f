//! Integration tests for the what-if simulation harness.

use padel_tournament_web::{
    approve_opening_schedule, preview_opening_schedule, BracketSide, Court, MatchStatus, Score,
    SimCommand, Simulation, StandingsScope, Tournament, TournamentStatus,
};

fn started_tournament() -> Tournament {
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
    let schedule = preview_opening_schedule(&t).unwrap();
    approve_opening_schedule(&mut t, schedule).unwrap();
    t
}

#[test]
fn apply_leaves_the_original_snapshot_untouched() {
    let sim = Simulation::new(started_tournament());
    let id = sim.tournament.matches[0].id;
    let next = sim
        .apply(&SimCommand::RecordScore {
            match_id: id,
            team1: 5,
            team2: 3,
        })
        .unwrap();
    assert_eq!(next.steps, 1);
    assert_eq!(
        next.tournament.matches[0].score,
        Some(Score { team1: 5, team2: 3 })
    );
    // The snapshot we applied to is unchanged.
    assert_eq!(sim.steps, 0);
    assert!(sim.tournament.matches[0].score.is_none());
    assert!(sim.tournament.round_stats.is_empty());
}

#[test]
fn a_failing_command_leaves_no_trace() {
    let sim = Simulation::new(started_tournament());
    let id = sim.tournament.matches[0].id;
    assert!(sim
        .apply(&SimCommand::RecordScore {
            match_id: id,
            team1: 5,
            team2: 5,
        })
        .is_err());
    // The same snapshot still works for the next branch.
    let next = sim
        .apply(&SimCommand::RecordScore {
            match_id: id,
            team1: 5,
            team2: 3,
        })
        .unwrap();
    assert_eq!(next.steps, 1);
}

#[test]
fn seeded_fills_are_deterministic() {
    let sim = Simulation::new(started_tournament());
    let fill = SimCommand::FillRoundWithRandomScores { round: 1, seed: 7 };
    let a = sim.apply(&fill).unwrap();
    let b = sim.apply(&fill).unwrap();
    let scores_a: Vec<Option<Score>> = a.tournament.matches.iter().map(|m| m.score).collect();
    let scores_b: Vec<Option<Score>> = b.tournament.matches.iter().map(|m| m.score).collect();
    assert_eq!(scores_a, scores_b);
    let specials_a: Vec<usize> = a.tournament.matches.iter().map(|m| m.specials.len()).collect();
    let specials_b: Vec<usize> = b.tournament.matches.iter().map(|m| m.specials.len()).collect();
    assert_eq!(specials_a, specials_b);
    for m in &a.tournament.matches {
        if m.round_number == 1 {
            assert_eq!(m.status, MatchStatus::Completed);
        } else {
            assert_eq!(m.status, MatchStatus::Scheduled); // round 2 untouched
        }
    }
}

#[test]
fn filling_a_round_with_no_matches_fails() {
    let sim = Simulation::new(started_tournament());
    assert!(sim
        .apply(&SimCommand::FillRoundWithRandomScores { round: 3, seed: 1 })
        .is_err());
}

#[test]
fn generate_final_round_requires_completed_openings() {
    let sim = Simulation::new(started_tournament());
    assert!(sim.apply(&SimCommand::GenerateFinalRound).is_err());
}

#[test]
fn a_full_night_runs_to_completion() {
    let sim = Simulation::new(started_tournament());
    let done = sim
        .apply_all(&[
            SimCommand::FillRoundWithRandomScores { round: 1, seed: 11 },
            SimCommand::FillRoundWithRandomScores { round: 2, seed: 12 },
            SimCommand::GenerateFinalRound,
            SimCommand::FillRoundWithRandomScores { round: 3, seed: 13 },
        ])
        .unwrap();
    assert_eq!(done.steps, 4);
    assert_eq!(done.tournament.matches.len(), 36);
    assert_eq!(done.tournament.status, TournamentStatus::Completed);
    for m in &done.tournament.matches {
        let score = m.score.unwrap();
        assert_eq!(score.team1 + score.team2, 8);
    }
    for side in [BracketSide::Left, BracketSide::Right] {
        let standings = done.standings(side, StandingsScope::Tournament);
        assert_eq!(standings.len(), 8);
        let positions: Vec<u32> = standings.iter().map(|s| s.position).collect();
        assert_eq!(positions, (1..=8).collect::<Vec<u32>>());
    }
}

#[test]
fn reopening_in_simulation_reopens_the_tournament() {
    let sim = Simulation::new(started_tournament());
    let done = sim
        .apply_all(&[
            SimCommand::FillRoundWithRandomScores { round: 1, seed: 11 },
            SimCommand::FillRoundWithRandomScores { round: 2, seed: 12 },
            SimCommand::GenerateFinalRound,
            SimCommand::FillRoundWithRandomScores { round: 3, seed: 13 },
        ])
        .unwrap();
    let id = done.tournament.matches[0].id;
    let reopened = done.apply(&SimCommand::ReopenMatch { match_id: id }).unwrap();
    assert_eq!(reopened.steps, 5);
    assert_eq!(reopened.tournament.status, TournamentStatus::InProgress);
    assert_eq!(done.tournament.status, TournamentStatus::Completed); // branch point intact
}

#[test]
fn commands_deserialize_from_tagged_json() {
    let cmd: SimCommand = serde_json::from_str(
        r#"{"command":"fill_round_with_random_scores","round":1,"seed":42}"#,
    )
    .unwrap();
    assert!(matches!(
        cmd,
        SimCommand::FillRoundWithRandomScores { round: 1, seed: 42 }
    ));
}
