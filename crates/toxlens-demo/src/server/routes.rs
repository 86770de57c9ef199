use crate::models::{
    ModelInfoResponse, PredictRequest, PredictResponse, PredictionRecord, ResolveRequest,
};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use toxlens_core::Error;
use toxlens_explain::DEFAULT_TOP_K;
use toxlens_resolver::{largest_fragment, looks_like_smiles, ResolveError, ResolvedSmiles};
use uuid::Uuid;

/// Error half of every handler: a status code plus a body carrying a
/// stable machine-readable `kind` so the UI can pick a specific message
type ApiError = (StatusCode, Json<serde_json::Value>);

fn engine_error(err: Error) -> ApiError {
    let status = match &err {
        // A model trained on a non-binary class set cannot serve any
        // prediction; this is an operator problem, not a client one.
        Error::DegenerateModel(_) => StatusCode::INTERNAL_SERVER_ERROR,
        // Coefficient-free models can't be explained; the client should
        // hide the explanation panel.
        Error::UnsupportedModel(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "prediction request failed");
    }
    (
        status,
        Json(serde_json::json!({ "error": err.to_string(), "kind": err.kind() })),
    )
}

fn resolver_error(err: ResolveError) -> ApiError {
    let (status, kind) = match &err {
        ResolveError::NotFound { .. } => (StatusCode::NOT_FOUND, "name_not_found"),
        ResolveError::Status { .. } => (StatusCode::BAD_GATEWAY, "resolver_unavailable"),
        ResolveError::Transport(_) => (StatusCode::BAD_GATEWAY, "resolver_unavailable"),
        ResolveError::Decode { .. } => (StatusCode::BAD_GATEWAY, "resolver_unavailable"),
    };
    (
        status,
        Json(serde_json::json!({ "error": err.to_string(), "kind": kind })),
    )
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message, "kind": "bad_request" })),
    )
}

// ============================================================================
// Health and model endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let engine = &state.engine;
    Json(ModelInfoResponse {
        label_note: engine.label_note().to_string(),
        model_type: engine.model_type().to_string(),
        classes: engine.model().classes().to_vec(),
        vocabulary_size: engine.vocabulary_size(),
        default_threshold: engine.default_threshold(),
    })
}

// ============================================================================
// Prediction endpoints
// ============================================================================

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(bad_request("enter a compound name or a SMILES string"));
    }

    let threshold = req.threshold.unwrap_or(state.engine.default_threshold());
    if !(0.0..=1.0).contains(&threshold) {
        return Err(bad_request("threshold must be between 0 and 1"));
    }
    let top_k = req.top_k.unwrap_or(DEFAULT_TOP_K);

    let resolved = if looks_like_smiles(&query) {
        ResolvedSmiles::new(query.clone(), "user SMILES")
    } else {
        state.resolver.resolve(&query).await.map_err(resolver_error)?
    };

    // Salts and mixtures: predict on the parent structure only.
    let smiles = largest_fragment(&resolved.smiles).to_string();
    if smiles.is_empty() {
        return Err(bad_request("the resolved SMILES is empty"));
    }

    let estimate = state
        .engine
        .predict_toxic_probability(&smiles)
        .map_err(engine_error)?;

    // A coefficient-free model can still predict; it just can't explain.
    let explanation = match state.engine.local_contributions(&smiles, top_k) {
        Ok(explanation) => Some(explanation),
        Err(Error::UnsupportedModel(_)) => None,
        Err(err) => return Err(engine_error(err)),
    };

    let matched_features = state.engine.matched_features(&smiles);
    let toxic = estimate.probability >= threshold;

    state.add_record(PredictionRecord {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        query: query.clone(),
        smiles: smiles.clone(),
        smiles_source: resolved.source.clone(),
        probability: estimate.probability,
        toxic,
    });

    tracing::info!(
        query = %query,
        probability = estimate.probability,
        toxic,
        matched_features,
        "prediction served"
    );

    Ok(Json(PredictResponse {
        query,
        smiles,
        smiles_source: resolved.source,
        probability: estimate.probability,
        probability_source: estimate.source,
        approximate: estimate.is_approximate(),
        threshold,
        toxic,
        matched_features,
        explanation,
    }))
}

pub async fn resolve_name(
    State(state): State<AppState>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolvedSmiles>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(bad_request("enter a compound name"));
    }
    let resolved = state.resolver.resolve(name).await.map_err(resolver_error)?;
    Ok(Json(resolved))
}

// ============================================================================
// Explanation endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GlobalExplainQuery {
    pub k: Option<usize>,
}

pub async fn explain_global(
    State(state): State<AppState>,
    Query(query): Query<GlobalExplainQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let k = query.k.unwrap_or(15);
    let ranking = state.engine.global_ranking(k).map_err(engine_error)?;
    Ok(Json(serde_json::json!({
        "label_note": state.engine.label_note(),
        "toward_toxic": ranking.toward_toxic,
        "toward_safe": ranking.toward_safe,
    })))
}

// ============================================================================
// History endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<usize>,
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<PredictionRecord>> {
    let limit = query.limit.unwrap_or(50);
    Json(state.recent_records(limit))
}
