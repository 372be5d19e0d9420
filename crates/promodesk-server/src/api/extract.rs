//! `Query` and `Json` wrappers whose rejections use the `{error, meta}`
//! envelope (`bad_request`) instead of axum's plain-text bodies.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, Extensions},
    Json,
};
use serde::de::DeserializeOwned;

use crate::middleware::RequestId;

use super::ApiError;

pub(super) struct ApiQuery<T>(pub T);

pub(super) struct ApiJson<T>(pub T);

fn request_id_of(extensions: &Extensions) -> String {
    extensions
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default()
}

fn bad_request(request_id: String, rejection: &impl std::fmt::Display) -> ApiError {
    tracing::debug!(request_id = %request_id, error = %rejection, "rejected request input");
    ApiError::new(request_id, "bad_request", rejection.to_string())
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_request(request_id_of(&parts.extensions), &rejection)),
        }
    }
}

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = request_id_of(req.extensions());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_request(request_id, &rejection)),
        }
    }
}
