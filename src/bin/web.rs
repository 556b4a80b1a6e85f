//! Single binary web server: JSON API for running club tournament nights.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament_web::{
    approve_final_round, approve_opening_schedule, complete_match, compute_standings,
    discard_final_round, preview_final_round, preview_opening_schedule, record_score,
    record_special, remove_special, reopen_match, roster::parse_roster_csv, tournament_standings,
    BracketSide, Court, FinalRoundSchedule, OpeningSchedule, Player, SimCommand, Simulation,
    Standing, StandingsScope, Tournament, TournamentId, TournamentStatus,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default = "default_tournament_name")]
    name: String,
}

fn default_tournament_name() -> String {
    "Club tournament".to_string()
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    side: BracketSide,
    seeding_score: u32,
    #[serde(default)]
    total_specials: u32,
    #[serde(default)]
    total_tournaments: u32,
}

#[derive(Deserialize)]
struct AddCourtBody {
    name: String,
    row_side: BracketSide,
    #[serde(default)]
    menu_order: u32,
}

#[derive(Deserialize)]
struct SetCourtActiveBody {
    is_active: bool,
}

#[derive(Deserialize)]
struct ScoreBody {
    match_id: Uuid,
    team1: u8,
    team2: u8,
}

#[derive(Deserialize)]
struct SpecialBody {
    match_id: Uuid,
    player_id: Uuid,
    label: String,
}

#[derive(Deserialize)]
struct SimulateBody {
    #[serde(default)]
    commands: Vec<SimCommand>,
}

#[derive(serde::Serialize)]
struct SimulateResponse {
    tournament: Tournament,
    steps: u32,
    left_standings: Vec<Standing>,
    right_standings: Vec<Standing>,
}

#[derive(Deserialize)]
struct StandingsQuery {
    side: BracketSide,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    round: Option<u8>,
}

#[derive(Deserialize)]
struct GlobalStandingsQuery {
    side: BracketSide,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: Uuid,
}

/// Path segments: tournament id and court id (e.g. /api/tournaments/{id}/courts/{court_id})
#[derive(Deserialize)]
struct TournamentCourtPath {
    id: TournamentId,
    court_id: Uuid,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: Uuid,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let name = body
        .map(|b| b.into_inner().name)
        .unwrap_or_else(default_tournament_name);
    let tournament = Tournament::new(name.trim());
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Add a player to the roster (before any schedule exists).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let mut player = Player::new(body.name.trim(), body.side, body.seeding_score);
    player.total_specials = body.total_specials;
    player.total_tournaments = body.total_tournaments;
    match t.add_players(vec![player]) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a player by id (before any schedule exists).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Import a roster CSV (name,side,seeding_score[,total_specials,total_tournaments]).
/// All rows are added or none are.
#[post("/api/tournaments/{id}/players/csv")]
async fn api_import_roster(
    state: AppState,
    path: Path<TournamentPath>,
    body: web::Bytes,
) -> HttpResponse {
    let csv_text = match std::str::from_utf8(&body) {
        Ok(s) => s,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Roster must be UTF-8 text" }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let players = match parse_roster_csv(csv_text) {
        Ok(players) => players,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    match t.add_players(players) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Add a court to the pool (before any schedule exists).
#[post("/api/tournaments/{id}/courts")]
async fn api_add_court(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddCourtBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.add_court(Court::new(body.name.trim(), body.row_side, body.menu_order)) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Activate or deactivate a court (before any schedule exists).
#[put("/api/tournaments/{id}/courts/{court_id}/active")]
async fn api_set_court_active(
    state: AppState,
    path: Path<TournamentCourtPath>,
    body: Json<SetCourtActiveBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.set_court_active(path.court_id, body.is_active) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a court by id (before any schedule exists).
#[delete("/api/tournaments/{id}/courts/{court_id}")]
async fn api_remove_court(state: AppState, path: Path<TournamentCourtPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.remove_court(path.court_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Publish signups (Draft -> Open).
#[post("/api/tournaments/{id}/open")]
async fn api_open_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.open() {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Preview the opening schedule (rounds 1+2, both sides). Nothing is stored;
/// the client edits the proposal and sends it back for approval.
#[post("/api/tournaments/{id}/opening/preview")]
async fn api_opening_preview(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match preview_opening_schedule(&entry.tournament) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Approve an opening schedule (possibly edited since preview) and start play.
#[post("/api/tournaments/{id}/opening/approve")]
async fn api_opening_approve(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<OpeningSchedule>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match approve_opening_schedule(t, body.into_inner()) {
        Ok(()) => {
            log::info!("Opening schedule approved for tournament {}", path.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Preview the final round (requires all opening matches completed).
#[post("/api/tournaments/{id}/final/preview")]
async fn api_final_preview(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match preview_final_round(&entry.tournament) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Approve a final round schedule (possibly edited since preview).
#[post("/api/tournaments/{id}/final/approve")]
async fn api_final_approve(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<FinalRoundSchedule>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match approve_final_round(t, body.into_inner()) {
        Ok(()) => {
            log::info!("Final round approved for tournament {}", path.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Discard the final round schedule, e.g. after correcting an opening result
/// that made it stale. A fresh preview will re-seed from current totals.
#[post("/api/tournaments/{id}/final/discard")]
async fn api_final_discard(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match discard_final_round(t) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record or update a score for one match.
#[put("/api/tournaments/{id}/matches/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match record_score(t, body.match_id, body.team1, body.team2) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Mark a match as completed; closes the tournament when it was the last one.
#[post("/api/tournaments/{id}/matches/{match_id}/complete")]
async fn api_complete_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match complete_match(t, path.match_id) {
        Ok(all_completed) => {
            if all_completed {
                t.status = TournamentStatus::Completed;
            }
            HttpResponse::Ok().json(t)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Reopen a completed match for corrections; reopens the tournament too if
/// it had already been closed out.
#[post("/api/tournaments/{id}/matches/{match_id}/reopen")]
async fn api_reopen_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match reopen_match(t, path.match_id) {
        Ok(()) => {
            if t.status == TournamentStatus::Completed {
                t.status = TournamentStatus::InProgress;
            }
            HttpResponse::Ok().json(t)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record one special (tiebreaker achievement) for a player in a match.
#[post("/api/tournaments/{id}/specials")]
async fn api_record_special(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SpecialBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match record_special(t, body.match_id, body.player_id, &body.label) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Take back one special with the given label.
#[delete("/api/tournaments/{id}/specials")]
async fn api_remove_special(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SpecialBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match remove_special(t, body.match_id, body.player_id, &body.label) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Standings for one side: ?side=left[&scope=tournament|round&round=N].
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<StandingsQuery>,
) -> HttpResponse {
    let scope = match query.scope.as_deref() {
        None | Some("tournament") => StandingsScope::Tournament,
        Some("round") => match query.round {
            Some(round) => StandingsScope::Round(round),
            None => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": "scope=round requires a round parameter" }))
            }
        },
        Some(other) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": format!("Unknown scope '{}'", other) }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(tournament_standings(&entry.tournament, query.side, scope))
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Standings across every tournament on the server. Rosters are per
/// tournament, so rows join by player id without clashing.
#[get("/api/standings/global")]
async fn api_global_standings(state: AppState, query: Query<GlobalStandingsQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut rows = Vec::new();
    let mut roster = Vec::new();
    for entry in g.values() {
        rows.extend(entry.tournament.round_stats.iter().cloned());
        roster.extend(entry.tournament.players.iter().cloned());
    }
    HttpResponse::Ok().json(compute_standings(
        &rows,
        &roster,
        query.side,
        StandingsScope::Global,
    ))
}

/// Run a what-if command list against a copy of the tournament. The stored
/// tournament is never modified.
#[post("/api/tournaments/{id}/simulate")]
async fn api_simulate(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SimulateBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let sim = Simulation::new(entry.tournament.clone());
    match sim.apply_all(&body.commands) {
        Ok(result) => {
            let left_standings = result.standings(BracketSide::Left, StandingsScope::Tournament);
            let right_standings = result.standings(BracketSide::Right, StandingsScope::Tournament);
            HttpResponse::Ok().json(SimulateResponse {
                tournament: result.tournament,
                steps: result.steps,
                left_standings,
                right_standings,
            })
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_import_roster)
            .service(api_add_court)
            .service(api_set_court_active)
            .service(api_remove_court)
            .service(api_open_tournament)
            .service(api_opening_preview)
            .service(api_opening_approve)
            .service(api_final_preview)
            .service(api_final_approve)
            .service(api_final_discard)
            .service(api_record_score)
            .service(api_complete_match)
            .service(api_reopen_match)
            .service(api_record_special)
            .service(api_remove_special)
            .service(api_standings)
            .service(api_global_standings)
            .service(api_simulate)
    })
    .bind(bind)?
    .run()
    .await
}
