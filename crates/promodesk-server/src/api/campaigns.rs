//! GET /api/v1/campaigns/rows: campaign table rows with the derived phase
//! and "associated with" label resolved against brands and items.

use axum::{extract::State, Extension, Json};
use chrono::{NaiveDate, Utc};
use promodesk_core::display::{campaign_rows, CampaignRow};
use promodesk_core::listing::{filter_items, paginate, CampaignFilter, Page};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::extract::ApiQuery;
use super::{map_db_error, ApiError, ApiResponse, AppState, PageQuery};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RowsQuery {
    /// Reference date for the phase column; defaults to today (UTC).
    pub date: Option<NaiveDate>,
}

pub(super) async fn list_campaign_rows(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiQuery(filter): ApiQuery<CampaignFilter>,
    ApiQuery(paging): ApiQuery<PageQuery>,
    ApiQuery(query): ApiQuery<RowsQuery>,
) -> Result<Json<ApiResponse<Page<CampaignRow>>>, ApiError> {
    let rid = &req_id.0;
    let campaigns = state
        .repos
        .campaigns
        .list()
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    let brands = state
        .repos
        .brands
        .list()
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    let items = state
        .repos
        .promotional_items
        .list()
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let today = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let matching = filter_items(&campaigns, &filter);
    let page = paginate(
        &matching,
        paging.page.unwrap_or(1),
        paging.page_size.unwrap_or(state.page_size),
    );

    let rows = campaign_rows(&page.items, &brands, &items, today);
    let data = Page {
        items: rows,
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    };

    Ok(Json(ApiResponse::new(data, req_id.0)))
}
