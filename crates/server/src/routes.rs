//! JSON API routes.
//!
//! - `POST /api/rank`: deterministic ranking, no LLM involved
//! - `POST /api/converse`: full agent pipeline over a session transcript
//! - `POST /api/memory/clear`: clear one session or all of them

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shopscout_agent::AgentRuntime;
use shopscout_core::catalog::Catalog;
use shopscout_core::errors::{ApplicationError, ClientInputError, InterfaceError};
use shopscout_core::ranking::{MatchedOption, PreferenceMode, RankingEngine, Selection};
use tracing::{error, info};
use uuid::Uuid;

use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub agent: Arc<AgentRuntime>,
    pub sessions: SessionStore,
    pub engine: RankingEngine,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/rank", post(rank))
        .route("/api/converse", post(converse))
        .route("/api/memory/clear", post(clear_memory))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub items: Vec<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConverseRequest {
    pub request: Option<String>,
    pub preference: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConverseResponse {
    pub response: String,
    pub session_id: String,
    pub status: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearRequest {
    pub session_id: Option<String>,
}

/// Interface error plus the correlation id already stamped into it, ready
/// to become an HTTP response.
pub struct ApiError(InterfaceError);

impl ApiError {
    fn new(error: ApplicationError, correlation_id: &str) -> Self {
        error!(
            event_name = "api.request.failed",
            correlation_id,
            error = %error,
            "request failed"
        );
        Self(error.into_interface(correlation_id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, correlation_id) = match &self.0 {
            InterfaceError::BadRequest { correlation_id, .. } => {
                (StatusCode::BAD_REQUEST, correlation_id.clone())
            }
            InterfaceError::ServiceUnavailable { correlation_id, .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, correlation_id.clone())
            }
            InterfaceError::Internal { correlation_id, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, correlation_id.clone())
            }
        };

        let body = json!({
            "error": self.0.user_message(),
            "correlation_id": correlation_id,
        });
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Deterministic ranking over the whole catalog with exact item matching.
/// Identical payloads always produce identical responses.
pub async fn rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<Selection>, ApiError> {
    let correlation_id = Uuid::new_v4().to_string();

    if request.items.is_empty() {
        return Err(ApiError::new(ClientInputError::EmptyItemList.into(), &correlation_id));
    }

    let mode = parse_mode(request.mode.as_deref(), &correlation_id)?;

    let options: Vec<MatchedOption> = state
        .catalog
        .stores()
        .iter()
        .filter_map(|store| {
            store.match_items_exact(&request.items).map(|matched_items| MatchedOption {
                store_name: store.name.clone(),
                matched_items,
            })
        })
        .collect();

    let selection = state
        .engine
        .recommend(options, mode)
        .map_err(|err| ApiError::new(err.into(), &correlation_id))?;

    info!(
        event_name = "api.rank.completed",
        correlation_id,
        mode = mode.as_str(),
        viable = selection.is_viable(),
        "rank request completed"
    );
    Ok(Json(selection))
}

/// Full conversational pipeline. The session transcript is only extended
/// after a successful turn, so failed requests leave no trace in memory.
pub async fn converse(
    State(state): State<AppState>,
    Json(request): Json<ConverseRequest>,
) -> Result<Json<ConverseResponse>, ApiError> {
    let correlation_id = Uuid::new_v4().to_string();

    let text = request.request.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError(InterfaceError::BadRequest {
            message: "No request text provided.".to_string(),
            correlation_id,
        }));
    }

    let mode = parse_mode(request.preference.as_deref(), &correlation_id)?;
    let session_id = request.session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

    let transcript = state.sessions.history(&session_id).await;
    let reply = state
        .agent
        .converse(&transcript, text, mode)
        .await
        .map_err(|err| ApiError::new(err, &correlation_id))?;

    state.sessions.append_exchange(&session_id, text, &reply.message).await;

    info!(
        event_name = "api.converse.completed",
        correlation_id,
        session_id,
        mode = mode.as_str(),
        viable = reply.selection.is_viable(),
        "conversational turn completed"
    );
    Ok(Json(ConverseResponse { response: reply.message, session_id, status: "success" }))
}

pub async fn clear_memory(
    State(state): State<AppState>,
    request: Option<Json<ClearRequest>>,
) -> Json<serde_json::Value> {
    let request = request.map(|Json(body)| body).unwrap_or_default();
    let cleared = state.sessions.clear(request.session_id.as_deref()).await;

    info!(event_name = "api.memory.cleared", cleared, "conversation memory cleared");
    Json(json!({ "status": "Memory cleared successfully.", "cleared_sessions": cleared }))
}

fn parse_mode(raw: Option<&str>, correlation_id: &str) -> Result<PreferenceMode, ApiError> {
    match raw {
        None => Ok(PreferenceMode::Balanced),
        Some(value) => PreferenceMode::from_str(value)
            .map_err(|err| ApiError::new(err.into(), correlation_id)),
    }
}
