//! Padel club tournament organizer: library with models and business logic.

pub mod logic;
pub mod models;
pub mod roster;

pub use logic::{
    approve_final_round, approve_opening_schedule, complete_match, compute_standings,
    discard_final_round, preview_final_round, preview_opening_schedule, record_score,
    record_special, remove_special, reopen_match, tournament_standings, FinalRoundSchedule,
    OpeningSchedule, SimCommand, Simulation,
};
pub use models::{
    BracketSide, Court, CourtId, GameMatch, Lineup, MatchId, MatchStatus, Player, PlayerId,
    PlayerRoundStats, Score, Special, Standing, StandingsScope, Team, Tournament, TournamentError,
    TournamentId, TournamentStatus,
};
