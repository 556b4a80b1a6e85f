//! Data structures for tournaments, players, courts, matches, and stats.

mod court;
mod game;
mod player;
mod stats;
mod tournament;

pub use court::{active_courts_for_side, Court, CourtId};
pub use game::{
    GameMatch, Lineup, MatchId, MatchStatus, Score, Special, Team, GAMES_PER_MATCH,
};
pub use player::{BracketSide, Player, PlayerId};
pub use stats::{PlayerRoundStats, Standing, StandingsScope};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
