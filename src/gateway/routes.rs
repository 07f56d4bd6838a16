//! Gateway handlers: the backend's surface, validated locally

use axum::{
    Router,
    extract::{OriginalUri, State},
    http::Method,
    response::Response,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;

use super::{Gateway, GatewayError};
use crate::api::extract::{JsonBody, QueryParams, SharerUserId};
use crate::api::query::{ApprovalQuery, BookingListQuery, PageQuery, SearchQuery};
use crate::domain::validation::{
    validate_comment, validate_item_request, validate_item_update, validate_new_item,
    validate_new_user, validate_user_update,
};
use crate::domain::{
    BookingRequest, CommentInput, CreateItemInput, CreateItemRequestInput, CreateUserInput,
    DomainError, UpdateItemInput, UpdateUserInput,
};

type Forwarded = Result<Response, GatewayError>;

fn body<T: Serialize>(value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value)
        .map_err(|e| GatewayError::Rejected(DomainError::Internal(e.to_string())))
}

// Bookings

async fn create_booking(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    JsonBody(request): JsonBody<BookingRequest>,
) -> Forwarded {
    request.validate(gw.clock.now())?;
    gw.client
        .forward(Method::POST, &uri, Some(user_id), Some(body(&request)?))
        .await
}

async fn approve_booking(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    QueryParams(_approval): QueryParams<ApprovalQuery>,
) -> Forwarded {
    gw.client
        .forward(Method::PATCH, &uri, Some(user_id), None)
        .await
}

async fn get_with_user(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
) -> Forwarded {
    gw.client.forward(Method::GET, &uri, Some(user_id), None).await
}

async fn list_bookings(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> Forwarded {
    query.state()?;
    query.page()?;
    gw.client.forward(Method::GET, &uri, Some(user_id), None).await
}

// Users

async fn create_user(
    State(gw): State<Gateway>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<CreateUserInput>,
) -> Forwarded {
    validate_new_user(&input)?;
    gw.client
        .forward(Method::POST, &uri, None, Some(body(&input)?))
        .await
}

async fn update_user(
    State(gw): State<Gateway>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<UpdateUserInput>,
) -> Forwarded {
    validate_user_update(&input)?;
    gw.client
        .forward(Method::PATCH, &uri, None, Some(body(&input)?))
        .await
}

async fn get_plain(State(gw): State<Gateway>, OriginalUri(uri): OriginalUri) -> Forwarded {
    gw.client.forward(Method::GET, &uri, None, None).await
}

async fn delete_user(State(gw): State<Gateway>, OriginalUri(uri): OriginalUri) -> Forwarded {
    gw.client.forward(Method::DELETE, &uri, None, None).await
}

// Items

async fn create_item(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<CreateItemInput>,
) -> Forwarded {
    validate_new_item(&input)?;
    gw.client
        .forward(Method::POST, &uri, Some(user_id), Some(body(&input)?))
        .await
}

async fn update_item(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<UpdateItemInput>,
) -> Forwarded {
    validate_item_update(&input)?;
    gw.client
        .forward(Method::PATCH, &uri, Some(user_id), Some(body(&input)?))
        .await
}

async fn list_paged_with_user(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<PageQuery>,
) -> Forwarded {
    query.page()?;
    gw.client.forward(Method::GET, &uri, Some(user_id), None).await
}

async fn search_items(
    State(gw): State<Gateway>,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Forwarded {
    query.page()?;
    gw.client.forward(Method::GET, &uri, None, None).await
}

async fn add_comment(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<CommentInput>,
) -> Forwarded {
    validate_comment(&input)?;
    gw.client
        .forward(Method::POST, &uri, Some(user_id), Some(body(&input)?))
        .await
}

// Item requests

async fn create_request(
    State(gw): State<Gateway>,
    SharerUserId(user_id): SharerUserId,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<CreateItemRequestInput>,
) -> Forwarded {
    validate_item_request(&input)?;
    gw.client
        .forward(Method::POST, &uri, Some(user_id), Some(body(&input)?))
        .await
}

pub fn routes(gateway: Gateway) -> Router {
    Router::new()
        .route("/health", get(get_plain))
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/owner", get(list_bookings))
        .route(
            "/bookings/:booking_id",
            get(get_with_user).patch(approve_booking),
        )
        .route("/users", post(create_user).get(get_plain))
        .route(
            "/users/:id",
            get(get_plain).patch(update_user).delete(delete_user),
        )
        .route("/items", post(create_item).get(list_paged_with_user))
        .route("/items/search", get(search_items))
        .route("/items/:id", get(get_with_user).patch(update_item))
        .route("/items/:id/comment", post(add_comment))
        .route("/requests", post(create_request).get(get_with_user))
        .route("/requests/all", get(list_paged_with_user))
        .route("/requests/:request_id", get(get_with_user))
        .with_state(gateway)
}
