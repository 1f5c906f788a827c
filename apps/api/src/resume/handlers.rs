//! Axum route handlers for the Résumé API.
//!
//! Request bodies are taken as raw JSON and normalized, never rejected for
//! their shape: the validator is where shape problems are reported.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::embed::{build_embed_url, embed_snippet, iframe_snippet, EmbedConfig};
use crate::errors::AppError;
use crate::resume::codec::{decode, encode};
use crate::resume::export::{export_file_name, to_pretty_json};
use crate::resume::model::{create_empty_resume, Resume};
use crate::resume::normalize::normalize;
use crate::resume::preview::{build_preview, Preview};
use crate::resume::validation::{validate_document, ValidationResult};
use crate::state::AppState;
use crate::storage::resumes::{
    create_resume_id, load_active_embed_id, load_draft, load_embed_resume, save_draft,
    save_embed_resume,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeResponse {
    pub resume_id: String,
    pub embed_url: String,
    /// `/embed/portable?data=<token>`: works without the store.
    pub portable_url: String,
    pub iframe_snippet: String,
    pub snippet: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveResumeResponse {
    pub resume_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Stateless document operations
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/new
pub async fn handle_new_resume() -> Json<Resume> {
    Json(create_empty_resume())
}

/// POST /api/v1/resumes/normalize
pub async fn handle_normalize(Json(input): Json<Value>) -> Json<Resume> {
    Json(normalize(&input))
}

/// POST /api/v1/resumes/validate
///
/// Structural findings refer to the document as sent; semantic findings and
/// the score are computed on its normalization.
pub async fn handle_validate(Json(input): Json<Value>) -> Json<ValidationResult> {
    Json(validate_document(&input))
}

/// POST /api/v1/resumes/preview
pub async fn handle_preview(Json(input): Json<Value>) -> Json<Preview> {
    Json(build_preview(&normalize(&input)))
}

/// POST /api/v1/resumes/encode
pub async fn handle_encode(Json(input): Json<Value>) -> Json<TokenResponse> {
    Json(TokenResponse {
        token: encode(&normalize(&input)),
    })
}

/// POST /api/v1/resumes/decode
pub async fn handle_decode(Json(request): Json<DecodeRequest>) -> Result<Json<Resume>, AppError> {
    decode(&request.token).map(Json).ok_or_else(|| {
        AppError::UnprocessableEntity("token is not a valid resume encoding".to_string())
    })
}

/// POST /api/v1/resumes/export/json
pub async fn handle_export_json(Json(input): Json<Value>) -> impl IntoResponse {
    let resume = normalize(&input);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        header_safe(&export_file_name(&resume, "json"))
    );

    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        to_pretty_json(&resume),
    )
}

/// Header values must be visible ASCII; anything else in a name becomes `_`.
fn header_safe(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Stored résumés and drafts
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Stores the document under a fresh id and returns its embed links, the
/// iframe snippet for the portable link and the SDK snippet.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(input): Json<Value>,
) -> Result<(StatusCode, Json<CreateResumeResponse>), AppError> {
    let resume_id = create_resume_id();
    let resume =
        save_embed_resume(state.store.as_ref(), &resume_id, &normalize(&input)).await?;

    let base = &state.config.public_base_url;
    let embed_url = build_embed_url(
        base,
        &EmbedConfig {
            resume_id: Some(resume_id.clone()),
            ..EmbedConfig::default()
        },
    )?;
    let portable_url = build_embed_url(
        base,
        &EmbedConfig {
            resume_data: Some(serde_json::to_value(&resume).map_err(anyhow::Error::from)?),
            ..EmbedConfig::default()
        },
    )?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResumeResponse {
            resume_id,
            embed_url: embed_url.to_string(),
            iframe_snippet: iframe_snippet(&portable_url),
            portable_url: portable_url.to_string(),
            snippet: embed_snippet(base, &resume),
        }),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    load_embed_resume(state.store.as_ref(), &resume_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Resume>, AppError> {
    let resume = save_embed_resume(state.store.as_ref(), &resume_id, &normalize(&input)).await?;
    Ok(Json(resume))
}

/// GET /api/v1/resumes/active
pub async fn handle_active_resume(
    State(state): State<AppState>,
) -> Result<Json<ActiveResumeResponse>, AppError> {
    load_active_embed_id(state.store.as_ref())
        .await?
        .map(|resume_id| Json(ActiveResumeResponse { resume_id }))
        .ok_or_else(|| AppError::NotFound("No active embed".to_string()))
}

/// GET /api/v1/drafts/:session
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<Resume>, AppError> {
    load_draft(state.store.as_ref(), &session)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No draft for session {session}")))
}

/// PUT /api/v1/drafts/:session
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(input): Json<Value>,
) -> Result<StatusCode, AppError> {
    save_draft(state.store.as_ref(), &session, &normalize(&input)).await?;
    Ok(StatusCode::NO_CONTENT)
}
