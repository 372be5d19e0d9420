//! CRUD handlers shared by every entity collection.
//!
//! - `GET    /api/v1/<collection>`      : filtered, paginated list
//! - `POST   /api/v1/<collection>`      : create from an editor draft
//! - `GET    /api/v1/<collection>/{id}` : single record
//! - `PUT    /api/v1/<collection>/{id}` : replace from an editor draft
//! - `DELETE /api/v1/<collection>/{id}` : remove
//!
//! Request bodies are the same drafts the editor validates, so the API and
//! the editor share one set of rules. An update only replaces what its body
//! sets: tracking counters, generated link codes and creation dates left out
//! of the body keep their stored values.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use promodesk_core::drafts::{
    AffiliateLinkDraft, BrandDraft, CampaignDraft, ContentDraft, EarningDraft,
    PromotionalItemDraft,
};
use promodesk_core::listing::{
    filter_items, paginate, BrandFilter, CampaignFilter, ContentFilter, EarningFilter,
    ItemFilter, LinkFilter, ListFilter, Page,
};
use promodesk_core::{
    AffiliateLink, Brand, Campaign, ContentPiece, Draft, Earning, Entity, EntityEditor,
    PromotionalItem,
};
use promodesk_db::Repository;
use serde::{de::DeserializeOwned, Serialize};

use crate::middleware::RequestId;

use super::extract::{ApiJson, ApiQuery};
use super::{map_db_error, ApiError, ApiResponse, AppState, PageQuery};

/// An entity collection exposed over the API.
pub(in crate::api) trait Collection: Entity {
    type Filter: ListFilter<Self> + DeserializeOwned + Send + 'static;
    type Draft: Draft<Record = Self> + DeserializeOwned + Send + 'static;

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>>;
}

macro_rules! collection {
    ($record:ty, $filter:ty, $draft:ty, $field:ident) => {
        impl Collection for $record {
            type Filter = $filter;
            type Draft = $draft;

            fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
                &state.repos.$field
            }
        }
    };
}

collection!(Brand, BrandFilter, BrandDraft, brands);
collection!(PromotionalItem, ItemFilter, PromotionalItemDraft, promotional_items);
collection!(Campaign, CampaignFilter, CampaignDraft, campaigns);
collection!(ContentPiece, ContentFilter, ContentDraft, content);
collection!(AffiliateLink, LinkFilter, AffiliateLinkDraft, affiliate_links);
collection!(Earning, EarningFilter, EarningDraft, earnings);

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(in crate::api) struct DeletedRecord {
    pub id: String,
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(in crate::api) async fn list<T: Collection>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiQuery(filter): ApiQuery<T::Filter>,
    ApiQuery(paging): ApiQuery<PageQuery>,
) -> Result<Json<ApiResponse<Page<T>>>, ApiError> {
    let records = T::repository(&state)
        .list()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let matching = filter_items(&records, &filter);
    let page = paginate(
        &matching,
        paging.page.unwrap_or(1),
        paging.page_size.unwrap_or(state.page_size),
    );

    Ok(Json(ApiResponse::new(page, req_id.0)))
}

pub(in crate::api) async fn get<T: Collection>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<T>>, ApiError> {
    let record = T::repository(&state)
        .get(&id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(record, req_id.0)))
}

pub(in crate::api) async fn create<T: Collection>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(draft): ApiJson<T::Draft>,
) -> Result<(StatusCode, Json<ApiResponse<T>>), ApiError> {
    let mut editor = EntityEditor::<T::Draft>::new();
    editor.fill(draft);
    let record = editor
        .build()
        .map_err(|errors| ApiError::validation(req_id.0.clone(), errors))?;

    let created = T::repository(&state)
        .create(record)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(kind = T::KIND, id = %created.id(), "record created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(created, req_id.0))))
}

pub(in crate::api) async fn update<T: Collection>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<T::Draft>,
) -> Result<Json<ApiResponse<T>>, ApiError> {
    let repo = T::repository(&state);
    let existing = repo
        .get(&id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let mut editor = EntityEditor::<T::Draft>::new();
    editor.open(Some(&existing));
    editor.fill(draft);
    let record = editor
        .build()
        .map_err(|errors| ApiError::validation(req_id.0.clone(), errors))?;

    let updated = repo
        .update(record)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(kind = T::KIND, id = %updated.id(), "record updated");
    Ok(Json(ApiResponse::new(updated, req_id.0)))
}

pub(in crate::api) async fn delete<T: Collection>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedRecord>>, ApiError> {
    T::repository(&state)
        .delete(&id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(kind = T::KIND, id = %id, "record deleted");
    Ok(Json(ApiResponse::new(
        DeletedRecord { id, deleted: true },
        req_id.0,
    )))
}
