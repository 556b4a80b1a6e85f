//! Roster import from CSV.

use crate::models::{BracketSide, Player, TournamentError};
use serde::Deserialize;

/// One roster CSV row. `side` takes the same lowercase labels as the API
/// ("left"/"right"). The two career columns are optional and may be blank.
#[derive(Debug, Deserialize)]
struct RosterRecord {
    name: String,
    side: BracketSide,
    seeding_score: u32,
    #[serde(default)]
    total_specials: Option<u32>,
    #[serde(default)]
    total_tournaments: Option<u32>,
}

/// Parse a roster CSV (headers: `name,side,seeding_score` plus optional
/// `total_specials,total_tournaments`) into players. Errors name the CSV
/// line of the offending row, counting the header as line 1.
pub fn parse_roster_csv(data: &str) -> Result<Vec<Player>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let mut players: Vec<Player> = Vec::new();
    for (idx, result) in reader.deserialize::<RosterRecord>().enumerate() {
        let line = idx + 2;
        let record: RosterRecord = result
            .map_err(|e| TournamentError::Validation(format!("Roster line {}: {}", line, e)))?;
        if record.name.is_empty() {
            return Err(TournamentError::Validation(format!(
                "Roster line {}: player name must not be empty",
                line
            )));
        }
        if players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(&record.name))
        {
            return Err(TournamentError::Validation(format!(
                "Roster line {}: duplicate player '{}'",
                line, record.name
            )));
        }
        let mut player = Player::new(record.name, record.side, record.seeding_score);
        player.total_specials = record.total_specials.unwrap_or(0);
        player.total_tournaments = record.total_tournaments.unwrap_or(0);
        players.push(player);
    }
    Ok(players)
}
