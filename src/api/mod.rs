//! HTTP API
//!
//! Serves team listings and market predictions from the loaded aggregator,
//! plus the bundled UI from the static directory.


use crate::config::{Config, ModelConfig, VerdictConfig};
use crate::data::Aggregator;
use crate::error::Result;
use crate::model::ExpectedGoals;
use crate::predict::{self, Pick};
use crate::types::{Market, Selection};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Read-only state shared by all handlers
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub model: ModelConfig,
    pub verdict: VerdictConfig,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>, config: &Config) -> Self {
        Self {
            aggregator,
            model: config.model.clone(),
            verdict: config.verdict.clone(),
            static_dir: config.server.resolved_static_dir(),
        }
    }
}

fn default_sport() -> String {
    "futbol".to_string()
}

fn default_league() -> String {
    "LaLiga".to_string()
}

fn default_market() -> String {
    Market::MatchResult.code().to_string()
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct MarketsQuery {
    #[serde(default = "default_league")]
    pub league: String,
}

#[derive(Debug, Serialize)]
pub struct MarketsResponse {
    pub league: String,
    pub teams: Vec<String>,
    pub markets: Vec<Market>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default = "default_sport")]
    pub sport: String,
    #[serde(default = "default_league")]
    pub league: String,
    pub home: String,
    pub away: String,
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default)]
    pub selection: Option<String>,
    #[serde(default)]
    pub odds: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prob: f64,
    pub ev: Option<f64>,
    pub pick: Pick,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Team list and offered markets. The league is echoed, not filtered on.
async fn list_markets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketsQuery>,
) -> Json<MarketsResponse> {
    Json(MarketsResponse {
        league: query.league,
        teams: state.aggregator.list_teams().to_vec(),
        markets: Market::ALL.to_vec(),
    })
}

async fn predict_market(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Json<PredictResponse> {
    let expected = ExpectedGoals::for_fixture(state.aggregator.as_ref(), &req.home, &req.away);
    let market = req.market.parse::<Market>().ok();
    let selection = req
        .selection
        .as_deref()
        .map(Selection::parse_or_home)
        .unwrap_or_default();

    let prediction = predict::price_market(
        expected,
        market,
        selection,
        req.odds,
        &state.model,
        &state.verdict,
    );

    tracing::debug!(
        sport = %req.sport,
        league = %req.league,
        home = %req.home,
        away = %req.away,
        market = %req.market,
        selection = %selection,
        mu_home = expected.home,
        mu_away = expected.away,
        prob = prediction.prob,
        pick = prediction.pick.label(),
        "Priced market"
    );

    Json(PredictResponse {
        prob: prediction.rounded_prob(),
        ev: prediction.rounded_ev(),
        pick: prediction.pick,
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/api/markets", get(list_markets))
        .route("/api/predict", post(predict_market))
        .route_service("/", index)
        .nest_service("/static", assets)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn start_server(state: Arc<AppState>, addr: &str) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
