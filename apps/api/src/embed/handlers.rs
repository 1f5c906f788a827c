//! Axum route handlers for the embed surface.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::embed::{build_embed_url, resolve_embed, EmbedConfig, EmbedQuery, EmbedView};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EmbedUrlResponse {
    pub url: String,
}

/// GET /embed/:resume_id
///
/// Resolves inline `data` first, then the stored résumé for `resume_id`.
/// Neither present → 404, which the embed page shows as "Resume not found".
pub async fn handle_embed(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
    Query(query): Query<EmbedQuery>,
) -> Result<Json<EmbedView>, AppError> {
    resolve_embed(state.store.as_ref(), &resume_id, &query)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound("This embed payload is missing or invalid".to_string())
        })
}

/// POST /api/v1/embed/url
pub async fn handle_embed_url(
    State(state): State<AppState>,
    Json(config): Json<EmbedConfig>,
) -> Result<Json<EmbedUrlResponse>, AppError> {
    let url = build_embed_url(&state.config.public_base_url, &config)?;
    Ok(Json(EmbedUrlResponse {
        url: url.to_string(),
    }))
}
