pub mod bookings;
pub mod error;
pub mod extract;
pub mod health;
pub mod items;
pub mod query;
pub mod requests;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Bookings
        .route(
            "/bookings",
            post(bookings::create_booking).get(bookings::list_booker_bookings),
        )
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route(
            "/bookings/:booking_id",
            get(bookings::get_booking).patch(bookings::approve_booking),
        )
        // Users
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Items
        .route("/items", post(items::create_item).get(items::list_items))
        .route("/items/search", get(items::search_items))
        .route("/items/:id", get(items::get_item).patch(items::update_item))
        .route("/items/:id/comment", post(items::add_comment))
        // Item requests
        .route(
            "/requests",
            post(requests::create_request).get(requests::list_own_requests),
        )
        .route("/requests/all", get(requests::list_other_requests))
        .route("/requests/:request_id", get(requests::get_request))
        .with_state(state)
}
