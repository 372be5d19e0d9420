//! Platform settings, stored as one merge-written document.
//!
//! Reads fall back to defaults when nothing has been saved. When the store
//! has no backend both routes answer 503 `unavailable`.

use axum::{extract::State, Extension, Json};
use promodesk_core::drafts::validate_settings;
use promodesk_core::PlatformSettings;

use crate::middleware::RequestId;

use super::extract::ApiJson;
use super::{map_db_error, ApiError, ApiResponse, AppState};

pub(super) async fn get_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<PlatformSettings>>, ApiError> {
    let settings = promodesk_db::load_settings(state.documents.as_ref())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(settings, req_id.0)))
}

pub(super) async fn update_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(settings): ApiJson<PlatformSettings>,
) -> Result<Json<ApiResponse<PlatformSettings>>, ApiError> {
    validate_settings(&settings).map_err(|errors| ApiError::validation(req_id.0.clone(), errors))?;

    let saved = promodesk_db::save_settings(state.documents.as_ref(), &settings)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(saved, req_id.0)))
}
