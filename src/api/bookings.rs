//! Booking API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use super::extract::{JsonBody, QueryParams, SharerUserId};
use super::query::{ApprovalQuery, BookingListQuery};
use crate::domain::{BookingRequest, BookingView, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    post,
    path = "/bookings",
    params(("X-Sharer-User-Id" = i64, Header, description = "Booker id")),
    responses(
        (status = 200, description = "Booking created in WAITING status"),
        (status = 400, description = "Invalid interval or unavailable item"),
        (status = 404, description = "Unknown item or user")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    JsonBody(request): JsonBody<BookingRequest>,
) -> Result<Json<BookingView>, DomainError> {
    tracing::info!(
        "POST /bookings by user {} for item {:?} ({:?} - {:?})",
        user_id,
        request.item_id,
        request.start,
        request.end
    );
    let booking = state.bookings.create(user_id, &request).await?;
    Ok(Json(booking))
}

#[utoipa::path(
    patch,
    path = "/bookings/{bookingId}",
    params(
        ("bookingId" = i64, Path, description = "Booking id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner of the booked item"),
        ApprovalQuery
    ),
    responses(
        (status = 200, description = "Booking approved or rejected"),
        (status = 400, description = "Booking already approved"),
        (status = 404, description = "Booking not found for this owner")
    )
)]
pub async fn approve_booking(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i64>,
    QueryParams(query): QueryParams<ApprovalQuery>,
) -> Result<Json<BookingView>, DomainError> {
    tracing::info!(
        "PATCH /bookings/{} approved={} by user {}",
        booking_id,
        query.approved,
        user_id
    );
    let booking = state
        .bookings
        .approve(booking_id, query.approved, user_id)
        .await?;
    Ok(Json(booking))
}

#[utoipa::path(
    get,
    path = "/bookings/{bookingId}",
    params(
        ("bookingId" = i64, Path, description = "Booking id"),
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or item owner")
    ),
    responses(
        (status = 200, description = "Booking"),
        (status = 404, description = "Booking not visible to this user")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingView>, DomainError> {
    tracing::info!("GET /bookings/{} by user {}", booking_id, user_id);
    let booking = state.bookings.get(booking_id, user_id).await?;
    Ok(Json(booking))
}

#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker id"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings made by the user, latest end first"),
        (status = 400, description = "Unknown state or invalid paging"),
        (status = 404, description = "Unknown user or no bookings on this page")
    )
)]
pub async fn list_booker_bookings(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> Result<Json<Vec<BookingView>>, DomainError> {
    tracing::info!("GET /bookings by user {} with {:?}", user_id, query);
    let bookings = state
        .bookings
        .list_for_booker(user_id, query.state()?, query.page()?)
        .await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/bookings/owner",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner id"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings of the user's items, latest end first"),
        (status = 400, description = "Unknown state or invalid paging"),
        (status = 404, description = "No bookings on this page")
    )
)]
pub async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> Result<Json<Vec<BookingView>>, DomainError> {
    tracing::info!("GET /bookings/owner by user {} with {:?}", user_id, query);
    let bookings = state
        .bookings
        .list_for_owner(user_id, query.state()?, query.page()?)
        .await?;
    Ok(Json(bookings))
}
