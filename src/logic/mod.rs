//! Tournament business logic: seeding, scheduling, scoring, standings.

mod approval;
mod final_round;
mod numbering;
mod opening_rounds;
mod round_robin;
mod scoring;
mod seeding;
mod simulation;
mod standings;

pub use final_round::{
    approve_final_round, discard_final_round, generate_final_round_schedule, preview_final_round,
    reseeded_order, FinalRoundSchedule, FINAL_MATCH_COUNT,
};
pub use numbering::assign_match_numbers;
pub use opening_rounds::{
    approve_opening_schedule, generate_opening_schedule, preview_opening_schedule, OpeningSchedule,
    COURTS_PER_SIDE, OPENING_MATCH_COUNT, PLAYERS_PER_SIDE,
};
pub use round_robin::{quad_round_robin, QUAD_PAIRINGS};
pub use scoring::{complete_match, record_score, record_special, remove_special, reopen_match};
pub use seeding::seeding_order;
pub use simulation::{SimCommand, Simulation};
pub use standings::{compute_standings, tournament_standings};
