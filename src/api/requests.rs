//! Item request API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use super::extract::{JsonBody, QueryParams, SharerUserId};
use super::query::PageQuery;
use crate::domain::{CreateItemRequestInput, DomainError, ItemRequestView};
use crate::infrastructure::AppState;

#[utoipa::path(
    post,
    path = "/requests",
    params(("X-Sharer-User-Id" = i64, Header, description = "Requester id")),
    responses(
        (status = 200, description = "Item request created"),
        (status = 400, description = "Blank description"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    JsonBody(input): JsonBody<CreateItemRequestInput>,
) -> Result<Json<ItemRequestView>, DomainError> {
    tracing::info!("POST /requests by user {}", user_id);
    Ok(Json(state.requests.create(user_id, input).await?))
}

#[utoipa::path(
    get,
    path = "/requests",
    params(("X-Sharer-User-Id" = i64, Header, description = "Requester id")),
    responses(
        (status = 200, description = "The caller's requests with their items, newest first"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn list_own_requests(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
) -> Result<Json<Vec<ItemRequestView>>, DomainError> {
    tracing::info!("GET /requests by user {}", user_id);
    Ok(Json(state.requests.list_own(user_id).await?))
}

#[utoipa::path(
    get,
    path = "/requests/all",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Other users' requests, newest first"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn list_other_requests(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<Vec<ItemRequestView>>, DomainError> {
    tracing::info!("GET /requests/all by user {} with {:?}", user_id, query);
    Ok(Json(
        state.requests.list_others(user_id, query.page()?).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/requests/{requestId}",
    params(
        ("requestId" = i64, Path, description = "Item request id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller id")
    ),
    responses(
        (status = 200, description = "Item request with its items"),
        (status = 404, description = "Unknown user or request")
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(request_id): Path<i64>,
) -> Result<Json<ItemRequestView>, DomainError> {
    tracing::info!("GET /requests/{} by user {}", request_id, user_id);
    Ok(Json(state.requests.get(user_id, request_id).await?))
}
