//! Single binary web server: JSON REST API over one organizer session.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! DATA_FILE keeps players and history in a JSON file; without it everything lives in memory.

use actix_web::{
    delete, get, post, put,
    http::StatusCode,
    web::{Data, Json, Path, Query, ServiceConfig},
    App, HttpResponse, HttpServer, ResponseError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use team_balancer_web::{
    cancel_match, commit_report, generate_teams, import_roster_csv, leaderboard_csv,
    load_session, prepare_report, record_result, select_winner, sync_with_store, team_strength,
    AppConfig, GameMatch, JsonFileStore, KillsDeaths, MemoryStore, Player, PlayerStore, Session,
    SquadError, StoreError, SyncOutcome, Team,
};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Shared state: the one session and the store behind it.
/// The session lock is held across store calls so persistence is serialized.
struct AppState {
    session: Mutex<Session>,
    store: Box<dyn PlayerStore>,
    history_limit: usize,
}

type State = Data<AppState>;

/// Error body: `{ "error": message }`.
#[derive(Debug)]
struct ApiError(SquadError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            SquadError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            SquadError::PersistenceFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let SquadError::PersistenceFailure(e) = &self.0 {
            log::error!("Store error: {}", e);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.0.to_string() }))
    }
}

impl From<SquadError> for ApiError {
    fn from(e: SquadError) -> Self {
        ApiError(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError(SquadError::PersistenceFailure(e))
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// A player as shown to clients; K/D both exact and rounded.
#[derive(Serialize)]
struct PlayerView {
    name: String,
    active_nickname: String,
    nicknames: Vec<String>,
    total_kills: u32,
    total_deaths: u32,
    games_played: u32,
    average_kd: f64,
    kd_display: String,
}

impl PlayerView {
    fn from_player(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            active_nickname: p.active_nickname().to_string(),
            nicknames: p.nicknames().to_vec(),
            total_kills: p.stats.total_kills,
            total_deaths: p.stats.total_deaths,
            games_played: p.stats.games_played,
            average_kd: p.average_kd(),
            kd_display: p.stats.kd_display(),
        }
    }
}

#[derive(Serialize)]
struct MatchView {
    team_a: Vec<PlayerView>,
    team_b: Vec<PlayerView>,
    /// Sum of team K/D, two decimals.
    team_a_strength: String,
    team_b_strength: String,
    winner: Option<Team>,
    results: HashMap<String, KillsDeaths>,
    history_id: Option<Uuid>,
}

impl MatchView {
    fn new(session: &Session, m: &GameMatch) -> Self {
        let members = |team: Team| -> Vec<&Player> {
            m.lineup
                .team(team)
                .iter()
                .filter_map(|name| session.player(name))
                .collect()
        };
        let (a, b) = (members(Team::A), members(Team::B));
        Self {
            team_a_strength: format!("{:.2}", team_strength(a.iter().copied())),
            team_b_strength: format!("{:.2}", team_strength(b.iter().copied())),
            team_a: a.into_iter().map(PlayerView::from_player).collect(),
            team_b: b.into_iter().map(PlayerView::from_player).collect(),
            winner: m.winner,
            results: m.results.clone(),
            history_id: m.history_id,
        }
    }
}

#[derive(Serialize)]
struct SessionView {
    roster: Vec<PlayerView>,
    ranked: Vec<PlayerView>,
    current_match: Option<MatchView>,
}

impl SessionView {
    fn new(session: &Session) -> Self {
        Self {
            roster: session.roster_players().map(PlayerView::from_player).collect(),
            ranked: session
                .ranked_players()
                .into_iter()
                .map(PlayerView::from_player)
                .collect(),
            current_match: session
                .current_match
                .as_ref()
                .map(|m| MatchView::new(session, m)),
        }
    }
}

#[derive(Serialize)]
struct BulkResponse {
    added: usize,
    session: SessionView,
}

#[derive(Serialize)]
struct SyncResponse {
    outcome: SyncOutcome,
    session: SessionView,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct SelectPlayersBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct NicknameBody {
    nickname: String,
}

#[derive(Deserialize)]
struct WinnerBody {
    team: Team,
}

/// Raw counts so negative input is reported as an invalid stat, not a parse error.
#[derive(Deserialize)]
struct PlayerResultBody {
    name: String,
    kills: i64,
    deaths: i64,
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

/// Path segment: player name (e.g. /api/players/{name})
#[derive(Deserialize)]
struct PlayerPath {
    name: String,
}

/// Path segments: player name and nickname
#[derive(Deserialize)]
struct NicknamePath {
    name: String,
    nickname: String,
}

fn session_json(session: &Session) -> HttpResponse {
    HttpResponse::Ok().json(SessionView::new(session))
}

#[get("/api/health")]
async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-balancer-web",
    })
}

#[get("/api/session")]
async fn api_get_session(state: State) -> HttpResponse {
    let session = state.session.lock().await;
    session_json(&session)
}

/// Add a player to the roster and save the new record.
#[post("/api/players")]
async fn api_add_player(state: State, body: Json<AddPlayerBody>) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    next.add_player(&body.name)?;
    let name = body.name.trim().to_string();
    state.store.save_players(&next.records_for([&name])).await?;
    *session = next;
    Ok(session_json(&session))
}

/// Bulk selection by name.
#[post("/api/players/select")]
async fn api_select_players(state: State, body: Json<SelectPlayersBody>) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    let added = next.select_players(&body.names);
    if added > 0 {
        state.store.save_players(&next.roster_records()).await?;
    }
    *session = next;
    Ok(HttpResponse::Ok().json(BulkResponse {
        added,
        session: SessionView::new(&session),
    }))
}

/// Bulk selection from a CSV body with a `name` column (optional `nicknames`, `|`-separated).
#[post("/api/players/import")]
async fn api_import_players(state: State, body: String) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    let added = import_roster_csv(&mut next, &body)?;
    state.store.save_players(&next.roster_records()).await?;
    log::info!("Imported {} player(s) from CSV", added);
    *session = next;
    Ok(HttpResponse::Ok().json(BulkResponse {
        added,
        session: SessionView::new(&session),
    }))
}

/// Clear the roster and every stored player.
#[delete("/api/players")]
async fn api_clear_players(state: State) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    next.clear_all();
    state.store.clear_all_players().await?;
    *session = next;
    Ok(session_json(&session))
}

#[delete("/api/players/{name}")]
async fn api_remove_player(state: State, path: Path<PlayerPath>) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    let name = path.name.trim();
    next.remove_player(name)?;
    state.store.delete_player(name).await?;
    *session = next;
    Ok(session_json(&session))
}

#[post("/api/players/{name}/nicknames")]
async fn api_add_nickname(state: State, path: Path<PlayerPath>, body: Json<NicknameBody>) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    next.add_nickname(&path.name, &body.nickname)?;
    let name = path.name.trim().to_string();
    state.store.save_players(&next.records_for([&name])).await?;
    *session = next;
    Ok(session_json(&session))
}

#[put("/api/players/{name}/nicknames/active")]
async fn api_set_active_nickname(
    state: State,
    path: Path<PlayerPath>,
    body: Json<NicknameBody>,
) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    next.set_active_nickname(&path.name, &body.nickname)?;
    let name = path.name.trim().to_string();
    state.store.save_players(&next.records_for([&name])).await?;
    *session = next;
    Ok(session_json(&session))
}

#[delete("/api/players/{name}/nicknames/{nickname}")]
async fn api_remove_nickname(state: State, path: Path<NicknamePath>) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    next.remove_nickname(&path.name, &path.nickname)?;
    let name = path.name.trim().to_string();
    state.store.save_players(&next.records_for([&name])).await?;
    *session = next;
    Ok(session_json(&session))
}

/// Balance the roster into two teams. A failed history save is logged, not fatal.
#[post("/api/teams/generate")]
async fn api_generate_teams(state: State) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    let lineup = generate_teams(&mut next)?.lineup.clone();
    match state
        .store
        .save_team_generation(&lineup.team_a, &lineup.team_b)
        .await
    {
        Ok(id) => {
            if let Some(m) = next.current_match.as_mut() {
                m.history_id = Some(id);
            }
        }
        Err(e) => log::warn!("Could not save team generation: {}", e),
    }
    *session = next;
    Ok(session_json(&session))
}

#[put("/api/match/winner")]
async fn api_select_winner(state: State, body: Json<WinnerBody>) -> ApiResult {
    let mut session = state.session.lock().await;
    select_winner(&mut session, body.team)?;
    Ok(session_json(&session))
}

#[put("/api/match/results")]
async fn api_record_result(state: State, body: Json<PlayerResultBody>) -> ApiResult {
    let mut session = state.session.lock().await;
    record_result(&mut session, &body.name, body.kills, body.deaths)?;
    Ok(session_json(&session))
}

/// Finalize the current match: persist the report, then apply it locally.
#[post("/api/match/submit")]
async fn api_submit_match(state: State) -> ApiResult {
    let mut session = state.session.lock().await;
    let report = prepare_report(&session)?;
    let mut next = session.clone();
    commit_report(&mut next, &report)?;
    state.store.save_match_result(&report).await?;
    log::info!(
        "Match submitted: {} vs {} players, winner {:?}",
        report.team_a.len(),
        report.team_b.len(),
        report.winner
    );
    *session = next;
    Ok(session_json(&session))
}

#[delete("/api/match")]
async fn api_cancel_match(state: State) -> ApiResult {
    let mut session = state.session.lock().await;
    cancel_match(&mut session)?;
    Ok(session_json(&session))
}

#[get("/api/leaderboard")]
async fn api_leaderboard(state: State) -> ApiResult {
    let _session = state.session.lock().await;
    let records = state.store.load_leaderboard().await?;
    Ok(HttpResponse::Ok().json(records))
}

#[get("/api/leaderboard.csv")]
async fn api_leaderboard_csv(state: State) -> ApiResult {
    let _session = state.session.lock().await;
    let records = state.store.load_leaderboard().await?;
    match leaderboard_csv(&records) {
        Ok(body) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(body)),
        Err(e) => {
            log::error!("Could not render leaderboard CSV: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}

#[get("/api/history")]
async fn api_history(state: State, query: Query<HistoryQuery>) -> ApiResult {
    let _session = state.session.lock().await;
    let limit = query.limit.unwrap_or(state.history_limit);
    let history = state.store.load_match_history(limit).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// Pull stored players into the roster, or push the roster if the store is empty.
#[post("/api/sync")]
async fn api_sync(state: State) -> ApiResult {
    let mut session = state.session.lock().await;
    let mut next = session.clone();
    let outcome = sync_with_store(&mut next, state.store.as_ref()).await?;
    log::info!("Sync finished: {:?}", outcome);
    *session = next;
    Ok(HttpResponse::Ok().json(SyncResponse {
        outcome,
        session: SessionView::new(&session),
    }))
}

fn app_state(session: Session, store: Box<dyn PlayerStore>, history_limit: usize) -> State {
    Data::new(AppState {
        session: Mutex::new(session),
        store,
        history_limit,
    })
}

/// Register every API route.
fn routes(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_session)
        .service(api_add_player)
        .service(api_select_players)
        .service(api_import_players)
        .service(api_clear_players)
        .service(api_remove_player)
        .service(api_add_nickname)
        .service(api_set_active_nickname)
        .service(api_remove_nickname)
        .service(api_generate_teams)
        .service(api_select_winner)
        .service(api_record_result)
        .service(api_submit_match)
        .service(api_cancel_match)
        .service(api_leaderboard)
        .service(api_leaderboard_csv)
        .service(api_history)
        .service(api_sync);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let store: Box<dyn PlayerStore> = match &config.data_file {
        Some(path) => {
            log::info!("Using JSON store at {}", path.display());
            Box::new(JsonFileStore::new(path.clone()))
        }
        None => {
            log::warn!("DATA_FILE not set. Using in-memory store only.");
            Box::new(MemoryStore::new())
        }
    };

    let session = match load_session(store.as_ref(), config.demo_roster).await {
        Ok(session) => session,
        Err(e) => {
            log::error!("Error loading players: {}", e);
            Session::new()
        }
    };

    let state = app_state(session, store, config.history_limit);

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}
