//! The signed-in promoter's profile. There is exactly one; PUT creates it
//! when the collection is empty.

use axum::{extract::State, Extension, Json};
use promodesk_core::drafts::UserProfileDraft;
use promodesk_core::{EntityEditor, UserProfile};

use crate::middleware::RequestId;

use super::extract::ApiJson;
use super::{map_db_error, ApiError, ApiResponse, AppState};

async fn current_profile(state: &AppState, rid: &str) -> Result<Option<UserProfile>, ApiError> {
    let profiles = state
        .repos
        .profiles
        .list()
        .await
        .map_err(|e| map_db_error(rid.to_owned(), &e))?;
    Ok(profiles.into_iter().next())
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = current_profile(&state, &req_id.0)
        .await?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "profile not found"))?;

    Ok(Json(ApiResponse::new(profile, req_id.0)))
}

pub(super) async fn update_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(draft): ApiJson<UserProfileDraft>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let rid = req_id.0;
    let existing = current_profile(&state, &rid).await?;

    let mut editor = EntityEditor::<UserProfileDraft>::new();
    editor.open(existing.as_ref());
    editor.fill(draft);
    let record = editor
        .build()
        .map_err(|errors| ApiError::validation(rid.clone(), errors))?;

    let saved = if existing.is_some() {
        state.repos.profiles.update(record).await
    } else {
        state.repos.profiles.create(record).await
    }
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    tracing::info!(username = %saved.username, "profile saved");
    Ok(Json(ApiResponse::new(saved, rid)))
}
