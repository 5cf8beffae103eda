//! REST API module.
//!
//! Contains the employee routes and the extractors that turn malformed input
//! into validation errors.

mod employees;

pub use employees::*;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON body extractor that rejects malformed or mistyped bodies with a
/// `400 VALIDATION_ERROR` instead of axum's default 415/422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                Err(AppError::Validation(rejection.body_text()))
            }
        }
    }
}

/// Numeric employee id taken from the `{id}` path segment.
pub struct EmployeeId(pub i64);

impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| EmployeeId(id))
            .map_err(|rejection| {
                tracing::warn!("Rejected employee id: {}", rejection.body_text());
                AppError::Validation(format!("Invalid employee id: {}", rejection.body_text()))
            })
    }
}

/// The `name` parameter of the search endpoint.
///
/// Parsed leniently: a missing `name` is the empty string and when `name`
/// repeats the first occurrence wins, so the query string never fails a search.
pub struct SearchName(pub String);

impl<S> FromRequestParts<S> for SearchName
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::warn!("Rejected search query: {}", rejection.body_text());
                AppError::Validation(rejection.body_text())
            })?;

        let name = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "name").then_some(value))
            .unwrap_or_default();
        Ok(SearchName(name))
    }
}
