//! User API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use super::extract::JsonBody;
use crate::domain::{CreateUserInput, DomainError, UpdateUserInput, User};
use crate::infrastructure::AppState;

#[utoipa::path(
    post,
    path = "/users",
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Blank name or malformed email"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUserInput>,
) -> Result<Json<User>, DomainError> {
    tracing::info!("POST /users email={:?}", input.email);
    Ok(Json(state.users.create(input).await?))
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<UpdateUserInput>,
) -> Result<Json<User>, DomainError> {
    tracing::info!("PATCH /users/{}", id);
    Ok(Json(state.users.update(id, input).await?))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, DomainError> {
    tracing::info!("GET /users/{}", id);
    Ok(Json(state.users.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All users ordered by id"))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, DomainError> {
    tracing::info!("GET /users");
    Ok(Json(state.users.list().await?))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "User deleted, or was already absent"))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, DomainError> {
    tracing::info!("DELETE /users/{}", id);
    state.users.delete(id).await?;
    Ok(Json(json!({ "deleted": id })))
}
