//! survival-server: session API and score backend in one process.
//!
//! Composes the sim server, the score store and the settlement relay at the
//! binary's composition root and exposes both surfaces on one port:
//!
//! - `POST /api/play` and `GET|POST|DELETE /api/play/{id}...` for sessions
//! - `POST /api/submit-score` and `GET /api/leaderboard` for scores

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use scorekeeper::{
    DisabledRelay, MockRelay, ScoreKeeper, ScoreStore, SessionScoreReporter, SettlementRelay,
    ValidationLimits,
};
use serde::{Deserialize, Serialize};
use sim_server::{GameServer, ServerConfig, SessionError, SessionStatus, SubmitError};
use sim_survival::{SurvivalAction, SurvivalConfig, SurvivalGame};
use std::sync::Arc;
use survival_types::{PlayerProfile, SurvivalObservation};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "survival-server")]
#[command(about = "Survival castle-defense session server + score backend")]
struct Args {
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Simulation tick rate.
    #[arg(long, default_value = "60")]
    tick_hz: u32,

    #[arg(long, default_value = "64")]
    max_sessions: usize,

    /// Use the mock settlement relay instead of running without settlement.
    #[arg(long)]
    mock_settlement: bool,
}

struct AppState {
    server: GameServer<SurvivalGame>,
    reporter: Arc<SessionScoreReporter>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let relay: Arc<dyn SettlementRelay> = if args.mock_settlement {
        Arc::new(MockRelay)
    } else {
        Arc::new(DisabledRelay)
    };
    let store = Arc::new(ScoreStore::new(ValidationLimits::default()));
    let keeper = Arc::new(ScoreKeeper::new(store, relay));
    let reporter = Arc::new(SessionScoreReporter::new(Arc::clone(&keeper)));

    let server_config = ServerConfig {
        tick_hz: args.tick_hz,
        max_sessions: args.max_sessions,
        ..ServerConfig::default()
    };
    let score_reporter: Arc<dyn sim_server::ScoreReporter<survival_types::SessionReport>> =
        reporter.clone();
    let server = GameServer::<SurvivalGame>::with_reporter(server_config, score_reporter);

    let state = Arc::new(AppState { server, reporter });

    let app = Router::new()
        .route("/api/play", post(start_session))
        .route("/api/play/{id}", get(observe_session).delete(end_session))
        .route("/api/play/{id}/status", get(session_status))
        .route("/api/play/{id}/actions", post(submit_action))
        .with_state(Arc::clone(&state))
        .merge(scorekeeper::router(keeper));

    let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;
    tracing::info!("survival-server: http://0.0.0.0:{}", args.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.server.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[derive(Debug, Deserialize)]
struct StartSessionRequest {
    seed: Option<u64>,
    player: Option<PlayerProfile>,
}

#[derive(Debug, Serialize)]
struct StartSessionResponse {
    session_id: u64,
    seed: u64,
    tick_hz: u32,
}

#[derive(Debug, Serialize)]
struct ActionAck {
    action_id: u64,
    tick: u64,
}

#[derive(Debug, Serialize)]
struct SessionStatusResponse {
    session_id: u64,
    status: &'static str,
    current_tick: u64,
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, StatusCode> {
    let seed = request.seed.unwrap_or_else(scorekeeper::now_ms);

    let session_id = state
        .server
        .start_session(SurvivalConfig::default(), seed)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    if let Some(profile) = request.player {
        state.reporter.register_profile(session_id, profile);
    }

    Ok(Json(StartSessionResponse {
        session_id,
        seed,
        tick_hz: state.server.config.tick_hz,
    }))
}

async fn observe_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<SurvivalObservation>, StatusCode> {
    state
        .server
        .observe(id)
        .await
        .map(Json)
        .map_err(session_error_status)
}

async fn session_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let info = state
        .server
        .session_info(id)
        .await
        .map_err(session_error_status)?;

    Ok(Json(SessionStatusResponse {
        session_id: info.session_id,
        status: match info.status {
            SessionStatus::Running => "running",
            SessionStatus::Finished => "finished",
            SessionStatus::Terminated => "terminated",
        },
        current_tick: info.current_tick,
    }))
}

async fn submit_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(action): Json<SurvivalAction>,
) -> Result<Json<ActionAck>, StatusCode> {
    let (action_id, tick) = state
        .server
        .submit_action(id, action)
        .await
        .map_err(|err| match err {
            SubmitError::NotFound => StatusCode::NOT_FOUND,
            SubmitError::Over => StatusCode::CONFLICT,
        })?;

    Ok(Json(ActionAck { action_id, tick }))
}

async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    state
        .server
        .terminate_session(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(session_error_status)
}

fn session_error_status(err: SessionError) -> StatusCode {
    match err {
        SessionError::NotFound => StatusCode::NOT_FOUND,
    }
}
