//! What-if harness: replay engine operations against a copy of a tournament.

use crate::logic::final_round::{approve_final_round, preview_final_round};
use crate::logic::scoring::{complete_match, record_score, record_special, reopen_match};
use crate::logic::standings::tournament_standings;
use crate::models::{
    BracketSide, MatchId, MatchStatus, PlayerId, Standing, StandingsScope, Tournament,
    TournamentError, TournamentStatus, GAMES_PER_MATCH,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One simulated action. Mirrors the live operations, plus a seeded bulk
/// fill for skipping ahead.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SimCommand {
    RecordScore {
        match_id: MatchId,
        team1: u8,
        team2: u8,
    },
    CompleteMatch {
        match_id: MatchId,
    },
    ReopenMatch {
        match_id: MatchId,
    },
    RecordSpecial {
        match_id: MatchId,
        player_id: PlayerId,
        label: String,
    },
    GenerateFinalRound,
    FillRoundWithRandomScores {
        round: u8,
        seed: u64,
    },
}

/// A snapshot of a simulated tournament. `apply` never mutates the snapshot
/// it is called on; every command yields a fresh one, so callers can hold on
/// to any intermediate state and branch from it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Simulation {
    pub tournament: Tournament,
    /// Commands applied so far.
    pub steps: u32,
}

impl Simulation {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            steps: 0,
        }
    }

    /// Apply one command to a copy of the state and return the result.
    pub fn apply(&self, command: &SimCommand) -> Result<Simulation, TournamentError> {
        let mut t = self.tournament.clone();
        match command {
            SimCommand::RecordScore {
                match_id,
                team1,
                team2,
            } => {
                record_score(&mut t, *match_id, *team1, *team2)?;
            }
            SimCommand::CompleteMatch { match_id } => {
                if complete_match(&mut t, *match_id)? {
                    t.status = TournamentStatus::Completed;
                }
            }
            SimCommand::ReopenMatch { match_id } => {
                reopen_match(&mut t, *match_id)?;
                if t.status == TournamentStatus::Completed {
                    t.status = TournamentStatus::InProgress;
                }
            }
            SimCommand::RecordSpecial {
                match_id,
                player_id,
                label,
            } => {
                record_special(&mut t, *match_id, *player_id, label)?;
            }
            SimCommand::GenerateFinalRound => {
                let schedule = preview_final_round(&t)?;
                approve_final_round(&mut t, schedule)?;
            }
            SimCommand::FillRoundWithRandomScores { round, seed } => {
                fill_round(&mut t, *round, *seed)?;
            }
        }
        Ok(Simulation {
            tournament: t,
            steps: self.steps + 1,
        })
    }

    /// Apply a whole command list in order, failing on the first bad command.
    pub fn apply_all(&self, commands: &[SimCommand]) -> Result<Simulation, TournamentError> {
        let mut sim = self.clone();
        for command in commands {
            sim = sim.apply(command)?;
        }
        Ok(sim)
    }

    /// Standings of the simulated tournament.
    pub fn standings(&self, side: BracketSide, scope: StandingsScope) -> Vec<Standing> {
        tournament_standings(&self.tournament, side, scope)
    }
}

/// Score and complete every unfinished match of a round with seeded random
/// results, sprinkling in the occasional golden-point special. The same seed
/// reproduces the same fills.
fn fill_round(t: &mut Tournament, round: u8, seed: u64) -> Result<(), TournamentError> {
    if !t.has_round(round) {
        return Err(TournamentError::Validation(format!(
            "Round {} has no matches to fill",
            round
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let pending: Vec<(MatchId, Vec<PlayerId>)> = t
        .matches
        .iter()
        .filter(|m| m.round_number == round && m.status != MatchStatus::Completed)
        .map(|m| (m.id, m.lineup.players()))
        .collect();
    for (match_id, participants) in pending {
        let team1 = rng.gen_range(0..=GAMES_PER_MATCH);
        record_score(t, match_id, team1, GAMES_PER_MATCH - team1)?;
        if rng.gen_bool(0.25) {
            let lucky = participants[rng.gen_range(0..participants.len())];
            record_special(t, match_id, lucky, "golden point")?;
        }
        if complete_match(t, match_id)? {
            t.status = TournamentStatus::Completed;
        }
    }
    Ok(())
}
