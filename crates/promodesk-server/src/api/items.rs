//! GET /api/v1/items/categories: category options for the dependent filter.

use axum::{extract::State, Extension, Json};
use promodesk_core::listing::category_options;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::extract::ApiQuery;
use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct CategoriesQuery {
    pub brand_id: Option<String>,
}

/// Distinct category ids under the selected brand, in catalogue order.
/// Without `brand_id` every brand's categories are listed.
pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiQuery(query): ApiQuery<CategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let items = state
        .repos
        .promotional_items
        .list()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = category_options(&items, query.brand_id.as_deref());
    Ok(Json(ApiResponse::new(data, req_id.0)))
}
