//! Derived metrics, recomputed from the current collections on every call.
//!
//! - `GET /api/v1/metrics/earnings` : totals by status and source
//! - `GET /api/v1/metrics/links`    : clicks, conversions, conversion rate
//! - `GET /api/v1/metrics/campaigns`: counts and active campaigns on `?date=`
//! - `GET /api/v1/metrics/overview` : dashboard KPI cards

use axum::{extract::State, Extension, Json};
use chrono::{NaiveDate, Utc};
use promodesk_core::metrics::{
    campaign_totals, dashboard_overview, earnings_summary, link_performance, CampaignTotals,
    DashboardOverview, EarningsSummary, EntityCounts, LinkPerformance,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::extract::ApiQuery;
use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct DateQuery {
    pub date: Option<NaiveDate>,
}

pub(super) async fn earnings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<EarningsSummary>>, ApiError> {
    let earnings = state
        .repos
        .earnings
        .list()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(earnings_summary(&earnings), req_id.0)))
}

pub(super) async fn links(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<LinkPerformance>>, ApiError> {
    let links = state
        .repos
        .affiliate_links
        .list()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(link_performance(&links), req_id.0)))
}

pub(super) async fn campaigns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<ApiResponse<CampaignTotals>>, ApiError> {
    let campaigns = state
        .repos
        .campaigns
        .list()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let today = query.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(Json(ApiResponse::new(
        campaign_totals(&campaigns, today),
        req_id.0,
    )))
}

pub(super) async fn overview(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DashboardOverview>>, ApiError> {
    let rid = &req_id.0;
    let counts = EntityCounts {
        brands: state
            .repos
            .brands
            .list()
            .await
            .map_err(|e| map_db_error(rid.clone(), &e))?
            .len(),
        items: state
            .repos
            .promotional_items
            .list()
            .await
            .map_err(|e| map_db_error(rid.clone(), &e))?
            .len(),
        campaigns: state
            .repos
            .campaigns
            .list()
            .await
            .map_err(|e| map_db_error(rid.clone(), &e))?
            .len(),
        content: state
            .repos
            .content
            .list()
            .await
            .map_err(|e| map_db_error(rid.clone(), &e))?
            .len(),
    };

    Ok(Json(ApiResponse::new(dashboard_overview(counts), req_id.0)))
}
