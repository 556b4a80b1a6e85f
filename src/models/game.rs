//! Match fixtures: lineups (2v2 / 1v1), lifecycle status, scores, and specials.

use crate::models::court::CourtId;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Games played per match; accepted team scores always add up to this.
pub const GAMES_PER_MATCH: u8 = 8;

/// One of the two teams in a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    One,
    Two,
}

/// Who is on court. Tournament rounds are always doubles; singles is the
/// shape club friendlies use when recorded through the same scoring path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Lineup {
    Singles {
        player1: PlayerId,
        player2: PlayerId,
    },
    Doubles {
        team1: [PlayerId; 2],
        team2: [PlayerId; 2],
    },
}

impl Lineup {
    /// All players in this lineup (2 for singles, 4 for doubles).
    pub fn players(&self) -> Vec<PlayerId> {
        match self {
            Lineup::Singles { player1, player2 } => vec![*player1, *player2],
            Lineup::Doubles { team1, team2 } => vec![team1[0], team1[1], team2[0], team2[1]],
        }
    }

    /// Players on the given team.
    pub fn team_players(&self, team: Team) -> Vec<PlayerId> {
        match (self, team) {
            (Lineup::Singles { player1, .. }, Team::One) => vec![*player1],
            (Lineup::Singles { player2, .. }, Team::Two) => vec![*player2],
            (Lineup::Doubles { team1, .. }, Team::One) => team1.to_vec(),
            (Lineup::Doubles { team2, .. }, Team::Two) => team2.to_vec(),
        }
    }

    /// Which team a player is on, if any.
    pub fn team_of(&self, player_id: PlayerId) -> Option<Team> {
        if self.team_players(Team::One).contains(&player_id) {
            Some(Team::One)
        } else if self.team_players(Team::Two).contains(&player_id) {
            Some(Team::Two)
        } else {
            None
        }
    }

    /// Whether the player takes part in this match.
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.team_of(player_id).is_some()
    }
}

/// Match lifecycle. Completed matches can be reopened for corrections.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        })
    }
}

/// Team scores in games; `team1 + team2 == GAMES_PER_MATCH`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub team1: u8,
    pub team2: u8,
}

impl Score {
    /// Games won by the given team.
    pub fn team(self, team: Team) -> u8 {
        match team {
            Team::One => self.team1,
            Team::Two => self.team2,
        }
    }
}

/// A named tiebreaker achievement by one player in one match. Specials never
/// affect win/loss; they only break ranking ties.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Special {
    pub player_id: PlayerId,
    pub label: String,
    /// At least 1 while the record exists; incremented per occurrence.
    pub count: u32,
}

/// A scheduled fixture on one court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1 or 2 for the opening rounds, 3 for the final round.
    pub round_number: u8,
    /// Sequence inside this court's schedule for the round (1..=3).
    pub round_within_group: u8,
    /// Global sequential number across the tournament. 0 until the schedule's
    /// final ordering assigns it.
    pub match_number: u32,
    pub court_id: CourtId,
    pub lineup: Lineup,
    pub status: MatchStatus,
    /// None until a score is recorded.
    pub score: Option<Score>,
    pub specials: Vec<Special>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    pub fn new(round_number: u8, round_within_group: u8, court_id: CourtId, lineup: Lineup) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_number,
            round_within_group,
            match_number: 0,
            court_id,
            lineup,
            status: MatchStatus::Scheduled,
            score: None,
            specials: Vec::new(),
            completed_at: None,
        }
    }

    /// Whether this match contributes to stats: play has started and a
    /// (possibly provisional) score is on the board.
    pub fn counts_for_stats(&self) -> bool {
        self.status != MatchStatus::Scheduled && self.score.is_some()
    }

    /// Games won by this player here (0 when not playing or unscored).
    pub fn games_won_by(&self, player_id: PlayerId) -> u32 {
        match (self.lineup.team_of(player_id), self.score) {
            (Some(team), Some(score)) => u32::from(score.team(team)),
            _ => 0,
        }
    }

    /// Total special count this player has in this match.
    pub fn special_count_of(&self, player_id: PlayerId) -> u32 {
        self.specials
            .iter()
            .filter(|s| s.player_id == player_id)
            .map(|s| s.count)
            .sum()
    }
}
