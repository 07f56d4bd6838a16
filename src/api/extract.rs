//! Request extractors: the caller identity supplied by the `X-Sharer-User-Id`
//! header, plus JSON body and query wrappers whose rejections are `DomainError`s.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};

use crate::domain::DomainError;

pub const SHARER_USER_HEADER: &str = "X-Sharer-User-Id";

/// Id of the calling user. The header is trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(pub i64);

impl SharerUserId {
    pub fn from_parts(parts: &Parts) -> Result<Self, DomainError> {
        let raw = parts
            .headers
            .get(SHARER_USER_HEADER)
            .ok_or_else(|| {
                DomainError::Validation(format!("{} header is required", SHARER_USER_HEADER))
            })?;

        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(SharerUserId)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "{} header must be an integer user id",
                    SHARER_USER_HEADER
                ))
            })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts)
    }
}

/// `axum::Json` that rejects with a `Validation` error body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(DomainError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` that rejects with a `Validation` error body
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(DomainError))]
pub struct QueryParams<T>(pub T);
