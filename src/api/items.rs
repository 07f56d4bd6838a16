//! Item and comment API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use super::extract::{JsonBody, QueryParams, SharerUserId};
use super::query::{PageQuery, SearchQuery};
use crate::domain::{
    CommentInput, CommentView, CreateItemInput, DomainError, ItemDetails, ItemView,
    UpdateItemInput,
};
use crate::infrastructure::AppState;

#[utoipa::path(
    post,
    path = "/items",
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner id")),
    responses(
        (status = 200, description = "Item created"),
        (status = 400, description = "Missing or blank fields"),
        (status = 404, description = "Unknown owner or item request")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    JsonBody(input): JsonBody<CreateItemInput>,
) -> Result<Json<ItemView>, DomainError> {
    tracing::info!("POST /items by user {} name={:?}", user_id, input.name);
    Ok(Json(state.items.create(user_id, input).await?))
}

#[utoipa::path(
    patch,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id")
    ),
    responses(
        (status = 200, description = "Item updated"),
        (status = 404, description = "Unknown item or user, or caller is not the owner")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
    JsonBody(input): JsonBody<UpdateItemInput>,
) -> Result<Json<ItemView>, DomainError> {
    tracing::info!("PATCH /items/{} by user {}", item_id, user_id);
    Ok(Json(state.items.update(user_id, item_id, input).await?))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller id")
    ),
    responses(
        (status = 200, description = "Item with comments; last/next bookings for the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
) -> Result<Json<ItemDetails>, DomainError> {
    tracing::info!("GET /items/{} by user {}", item_id, user_id);
    Ok(Json(state.items.get(item_id, user_id).await?))
}

#[utoipa::path(
    get,
    path = "/items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner id"),
        PageQuery
    ),
    responses((status = 200, description = "The owner's items ordered by id"))
)]
pub async fn list_items(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<Vec<ItemDetails>>, DomainError> {
    tracing::info!("GET /items by user {} with {:?}", user_id, query);
    Ok(Json(
        state.items.list_for_owner(user_id, query.page()?).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/items/search",
    params(SearchQuery),
    responses((status = 200, description = "Available items matching the text"))
)]
pub async fn search_items(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<Vec<ItemView>>, DomainError> {
    tracing::info!("GET /items/search with {:?}", query);
    let page = query.page()?;
    let text = query.text.unwrap_or_default();
    Ok(Json(state.items.search(&text, page).await?))
}

#[utoipa::path(
    post,
    path = "/items/{itemId}/comment",
    params(
        ("itemId" = i64, Path, description = "Item id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Author id")
    ),
    responses(
        (status = 200, description = "Comment added"),
        (status = 400, description = "Blank text or no finished booking of the item"),
        (status = 404, description = "Unknown item or user")
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
    JsonBody(input): JsonBody<CommentInput>,
) -> Result<Json<CommentView>, DomainError> {
    tracing::info!("POST /items/{}/comment by user {}", item_id, user_id);
    Ok(Json(state.items.add_comment(item_id, user_id, input).await?))
}
