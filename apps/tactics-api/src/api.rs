//! API handlers for the tactics server
//!
//! Provides REST endpoints for:
//! - Card listing with an optional category filter
//! - Random samples across categories
//! - AI-suggested structure cards for a talk plan

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tactics_core::{Card, Category, Sampler, TalkPlan};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

const HOME_PAGE: &str = "<h1>Storyteller Tactics API</h1>\
<p>Use /api/tactics to get all cards.</p>\
<p>Use /api/tactics?category=[category] to filter.</p>\
<p>Use /api/tactics/sample?full=[true|false] for a random draw.</p>\
<p>POST a talk plan to /api/tactics/structure/suggest for structure suggestions.</p>\
<p>Available categories: Concept, Explore, Character, Function, Structure, Style, Organize</p>";

/// Handler: GET /
pub async fn handle_home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub cards: usize,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "tactics-api",
        version: env!("CARGO_PKG_VERSION"),
        cards: state.store.len(),
    })
}

/// Handler: GET /api/categories
pub async fn handle_list_categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(Category::as_str).collect())
}

#[derive(Deserialize)]
pub struct TacticsQuery {
    pub category: Option<String>,
}

/// Handler: GET /api/tactics
pub async fn handle_list_tactics(
    State(state): State<AppState>,
    Query(query): Query<TacticsQuery>,
) -> Json<Vec<Card>> {
    match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => {
            let cards = state.store.filter_ignore_case(category);
            debug!("Category filter '{}' matched {} cards", category, cards.len());
            Json(cards)
        }
        None => Json(state.store.all().to_vec()),
    }
}

#[derive(Deserialize)]
pub struct SampleQuery {
    pub full: Option<String>,
}

/// Handler: GET /api/tactics/sample
pub async fn handle_sample(
    State(state): State<AppState>,
    Query(query): Query<SampleQuery>,
) -> Result<Json<Vec<Card>>, ServerError> {
    let full = match query.full.as_deref() {
        Some(raw) => parse_flag(raw)?,
        None => true,
    };

    let cards = Sampler::new(&state.store).sample_spread(full)?;
    Ok(Json(cards))
}

/// Handler: GET /api/sample
///
/// Older clients expect the full seven-card draw here.
pub async fn handle_legacy_sample(
    State(state): State<AppState>,
) -> Result<Json<Vec<Card>>, ServerError> {
    let cards = Sampler::new(&state.store).sample_spread(true)?;
    Ok(Json(cards))
}

/// Handler: POST /api/tactics/structure/suggest
pub async fn handle_suggest_structures(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<Card>>, ServerError> {
    if !is_json_content_type(&headers) {
        return Err(ServerError::InvalidRequestBody);
    }

    let talk_plan = parse_talk_plan(&body)?;
    info!("Structure suggestion request with {} plan fields", talk_plan.len());

    let cards = state.engine.suggest_structures(&talk_plan).await?;
    Ok(Json(cards))
}

/// Parse a boolean query flag
fn parse_flag(raw: &str) -> Result<bool, ServerError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ServerError::InvalidRequest(format!(
            "Invalid value '{}' for 'full'. Must be 'true' or 'false'",
            other
        ))),
    }
}

/// True for `application/json` and `application/*+json`, parameters ignored
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn parse_talk_plan(body: &[u8]) -> Result<TalkPlan, ServerError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected talk plan body: {}", e);
        ServerError::InvalidRequestBody
    })?;

    match value {
        Value::Object(plan) => Ok(plan),
        _ => Err(ServerError::InvalidRequest(
            "Talk plan must be a JSON object".to_string(),
        )),
    }
}
