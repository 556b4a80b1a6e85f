//! Tournament aggregate, configuration operations, and error type.

use crate::models::court::{Court, CourtId};
use crate::models::game::{GameMatch, MatchId, MatchStatus, GAMES_PER_MATCH};
use crate::models::player::{BracketSide, Player, PlayerId};
use crate::models::stats::PlayerRoundStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations. All of them are
/// validation or precondition failures: the input can be corrected and the
/// same operation retried, and nothing is mutated before validation passes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A bracket side does not have exactly the required number of players.
    InsufficientPlayers {
        side: BracketSide,
        required: usize,
        actual: usize,
    },
    /// A bracket side has fewer active courts than the schedule needs.
    InsufficientCourts {
        side: BracketSide,
        required: usize,
        actual: usize,
    },
    /// Team scores do not add up to the fixed game total, or exceed it.
    ScoreSumInvalid { team1: u8, team2: u8 },
    /// No court data has been configured at all.
    CourtsNotLoaded,
    /// Malformed input shape: unknown ids, duplicate players in a match, etc.
    Validation(String),
    /// Player not found on the tournament roster.
    PlayerNotFound(PlayerId),
    /// Match not found in the tournament schedule.
    MatchNotFound(MatchId),
    /// Court not found in the tournament pool.
    CourtNotFound(CourtId),
    /// A round that must be fully completed still has open matches.
    IncompleteResults { round: u8 },
    /// A schedule for this round has already been approved.
    ScheduleAlreadyGenerated { round: u8 },
    /// The match is not in a status that allows this transition.
    InvalidMatchStatus { actual: MatchStatus },
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientPlayers {
                side,
                required,
                actual,
            } => write!(
                f,
                "The {} group needs exactly {} active players (found {})",
                side, required, actual
            ),
            TournamentError::InsufficientCourts {
                side,
                required,
                actual,
            } => write!(
                f,
                "The {} row needs at least {} active courts (found {})",
                side, required, actual
            ),
            TournamentError::ScoreSumInvalid { team1, team2 } => write!(
                f,
                "Team scores {} and {} are invalid: they must add up to {}",
                team1, team2, GAMES_PER_MATCH
            ),
            TournamentError::CourtsNotLoaded => write!(f, "Court data has not been loaded yet"),
            TournamentError::Validation(msg) => write!(f, "{}", msg),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::CourtNotFound(_) => write!(f, "Court not found"),
            TournamentError::IncompleteResults { round } => {
                write!(f, "Round {} still has unfinished matches", round)
            }
            TournamentError::ScheduleAlreadyGenerated { round } => {
                write!(f, "The round {} schedule has already been generated", round)
            }
            TournamentError::InvalidMatchStatus { actual } => {
                write!(f, "Match status '{}' does not allow this action", actual)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Coarse tournament lifecycle. The engine only ever moves a tournament
/// *into* `InProgress` when a schedule is installed; completion and
/// reversal transitions are applied by the caller (see `complete_match`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Roster and courts being configured; no schedule yet.
    #[default]
    Draft,
    /// Signups published; still no schedule.
    Open,
    /// Opening schedule approved; matches being played.
    InProgress,
    /// Every match completed.
    Completed,
}

/// Full tournament state: roster, courts, schedule, and derived stats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    /// Roster for this tournament (8 per side once complete).
    pub players: Vec<Player>,
    /// Court pool; empty until the club's courts are configured.
    pub courts: Vec<Court>,
    /// All scheduled matches across rounds, in display order.
    pub matches: Vec<GameMatch>,
    /// Derived per-(player, round) tallies from the last recompute.
    pub round_stats: Vec<PlayerRoundStats>,
    /// Set when a round-1/2 result changes after the final round was already
    /// generated from the old totals. Cleared by discarding or regenerating
    /// the final round.
    pub final_round_stale: bool,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Draft state with no roster or courts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Draft,
            players: Vec::new(),
            courts: Vec::new(),
            matches: Vec::new(),
            round_stats: Vec::new(),
            final_round_stale: false,
            created_at: Utc::now(),
        }
    }

    /// Look up a roster player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a court by id.
    pub fn court(&self, id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    /// Look up a match by id.
    pub fn game_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Mutable reference to a match by id.
    pub fn match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Matches of one round, in schedule order.
    pub fn round_matches(&self, round: u8) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.round_number == round)
    }

    /// Whether any match of the given round has been scheduled.
    pub fn has_round(&self, round: u8) -> bool {
        self.matches.iter().any(|m| m.round_number == round)
    }

    /// Highest assigned match number, 0 when no matches exist.
    pub fn max_match_number(&self) -> u32 {
        self.matches.iter().map(|m| m.match_number).max().unwrap_or(0)
    }

    /// Roster and court edits are only allowed while no schedule exists.
    fn ensure_setup(&self) -> Result<(), TournamentError> {
        if self.matches.is_empty() {
            Ok(())
        } else {
            Err(TournamentError::InvalidState)
        }
    }

    /// Add one roster player. Names must be unique (case-insensitive).
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        side: BracketSide,
        seeding_score: u32,
    ) -> Result<(), TournamentError> {
        self.add_players(vec![Player::new(name, side, seeding_score)])
    }

    /// Add a batch of players atomically: either every entry passes
    /// validation or the roster is left untouched.
    pub fn add_players(&mut self, mut players: Vec<Player>) -> Result<(), TournamentError> {
        self.ensure_setup()?;
        for p in &mut players {
            p.name = p.name.trim().to_string();
        }
        for (i, p) in players.iter().enumerate() {
            if p.name.is_empty() {
                return Err(TournamentError::Validation(
                    "Player name must not be empty".to_string(),
                ));
            }
            let duplicate = self
                .players
                .iter()
                .chain(players[..i].iter())
                .any(|q| q.name.eq_ignore_ascii_case(&p.name));
            if duplicate {
                return Err(TournamentError::Validation(format!(
                    "A player named '{}' already exists",
                    p.name
                )));
            }
        }
        self.players.append(&mut players);
        Ok(())
    }

    /// Remove a roster player by id (before any schedule exists).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        self.ensure_setup()?;
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Add a court to the pool. Court names must be unique (case-insensitive).
    pub fn add_court(&mut self, court: Court) -> Result<(), TournamentError> {
        self.ensure_setup()?;
        let name = court.name.trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::Validation(
                "Court name must not be empty".to_string(),
            ));
        }
        if self.courts.iter().any(|c| c.name.eq_ignore_ascii_case(&name)) {
            return Err(TournamentError::Validation(format!(
                "A court named '{}' already exists",
                name
            )));
        }
        self.courts.push(Court { name, ..court });
        Ok(())
    }

    /// Activate or deactivate a court (before any schedule exists).
    /// Inactive courts stay listed but are skipped by schedule generation.
    pub fn set_court_active(
        &mut self,
        court_id: CourtId,
        is_active: bool,
    ) -> Result<(), TournamentError> {
        self.ensure_setup()?;
        let court = self
            .courts
            .iter_mut()
            .find(|c| c.id == court_id)
            .ok_or(TournamentError::CourtNotFound(court_id))?;
        court.is_active = is_active;
        Ok(())
    }

    /// Remove a court from the pool (before any schedule exists).
    pub fn remove_court(&mut self, court_id: CourtId) -> Result<(), TournamentError> {
        self.ensure_setup()?;
        let idx = self
            .courts
            .iter()
            .position(|c| c.id == court_id)
            .ok_or(TournamentError::CourtNotFound(court_id))?;
        self.courts.remove(idx);
        Ok(())
    }

    /// Publish signups (Draft -> Open). Informational for clients; the
    /// engine treats Draft and Open the same way.
    pub fn open(&mut self) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Draft {
            return Err(TournamentError::InvalidState);
        }
        self.status = TournamentStatus::Open;
        Ok(())
    }
}
