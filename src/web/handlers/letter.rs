//! Letter handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::auth::AppState;
use crate::letter::{LetterDraft, LetterService, LetterUpdate};
use crate::web::dto::{
    ApiResponse, CreateLetterRequest, DeleteLetterResponse, LetterResponse, UpdateLetterRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// POST /api/letters - Create a letter.
pub async fn create_letter(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateLetterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LetterResponse>>), ApiError> {
    let draft = LetterDraft {
        title: req.title,
        content: req.content,
        background_color: req.background_color,
        text_color: req.text_color,
        icon: req.icon,
    };

    let letter = LetterService::new(state.db.pool())
        .create(claims.sub, draft)
        .await?;

    tracing::info!(letter_id = %letter.id, owner_id = claims.sub, "letter created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(letter.into())),
    ))
}

/// GET /api/letters - List the caller's letters, newest first.
pub async fn list_letters(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<LetterResponse>>>, ApiError> {
    let letters = LetterService::new(state.db.pool())
        .list(claims.sub)
        .await?;

    let responses: Vec<LetterResponse> = letters.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/letters/{id} - Read a letter.
///
/// Public: the unguessable id is the share token, so no
/// authentication is required to read.
pub async fn get_letter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LetterResponse>>, ApiError> {
    let letter = LetterService::new(state.db.pool()).read(&id).await?;
    Ok(Json(ApiResponse::new(letter.into())))
}

/// PUT /api/letters/{id} - Update a letter (owner only).
pub async fn update_letter(
    State(state): State<Arc<AppState>>,
    auth: OptionalAuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateLetterRequest>,
) -> Result<Json<ApiResponse<LetterResponse>>, ApiError> {
    let update = LetterUpdate {
        title: req.title,
        content: req.content,
        background_color: req.background_color,
        text_color: req.text_color,
        icon: req.icon,
    };

    let letter = LetterService::new(state.db.pool())
        .update(&id, auth.requester(), update)
        .await?;

    Ok(Json(ApiResponse::new(letter.into())))
}

/// DELETE /api/letters/{id} - Delete a letter (owner only).
pub async fn delete_letter(
    State(state): State<Arc<AppState>>,
    auth: OptionalAuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteLetterResponse>>, ApiError> {
    LetterService::new(state.db.pool())
        .delete(&id, auth.requester())
        .await?;

    tracing::info!(letter_id = %id, "letter deleted");

    Ok(Json(ApiResponse::new(DeleteLetterResponse { success: true })))
}
