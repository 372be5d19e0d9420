//! Generation endpoints. Bodies and responses use the flows' camelCase
//! schemas; the envelope stays snake_case like every other route.

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use promodesk_genai::{
    MarketingContent, MarketingContentInput, ProductSuggestionInput, ProductSuggestions,
    TextGenerator,
};

use crate::middleware::RequestId;

use super::extract::ApiJson;
use super::{map_genai_error, ApiError, ApiResponse, AppState};

fn generator(state: &AppState, rid: &str) -> Result<Arc<dyn TextGenerator>, ApiError> {
    state.generator.clone().ok_or_else(|| {
        ApiError::new(
            rid,
            "unavailable",
            "text generation is not configured; set GENAI_API_KEY",
        )
    })
}

/// POST /api/v1/ai/marketing-content
pub(super) async fn generate_marketing_content(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(input): ApiJson<MarketingContentInput>,
) -> Result<Json<ApiResponse<MarketingContent>>, ApiError> {
    let generator = generator(&state, &req_id.0)?;
    let content = promodesk_genai::generate_marketing_content(generator.as_ref(), &input)
        .await
        .map_err(|e| map_genai_error(req_id.0.clone(), e))?;

    Ok(Json(ApiResponse::new(content, req_id.0)))
}

/// POST /api/v1/ai/product-suggestions
pub(super) async fn suggest_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(input): ApiJson<ProductSuggestionInput>,
) -> Result<Json<ApiResponse<ProductSuggestions>>, ApiError> {
    let generator = generator(&state, &req_id.0)?;
    let suggestions = promodesk_genai::suggest_products(generator.as_ref(), &input)
        .await
        .map_err(|e| map_genai_error(req_id.0.clone(), e))?;

    Ok(Json(ApiResponse::new(suggestions, req_id.0)))
}
