//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The HTTP mapping lives in `api::error`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown item, or an owner trying to book their own item
    #[error("{0}")]
    ItemNotFound(String),

    #[error("Item {0} is not available for booking")]
    ItemNotAvailable(i64),

    #[error("User {0} not found")]
    UserNotFound(i64),

    /// Booking not visible to the caller, or an empty raw list fetch
    #[error("{0}")]
    BookingNotFound(String),

    #[error("Booking {0} is already APPROVED")]
    BookingStatusConflict(i64),

    #[error("Unknown state: {0}")]
    UnknownBookingState(String),

    #[error("Invalid booking interval: {0}")]
    InvalidInterval(String),

    #[error("Item request {0} not found")]
    ItemRequestNotFound(i64),

    #[error("User {user_id} is not the owner of item {item_id}")]
    NotItemOwner { user_id: i64, item_id: i64 },

    #[error("User {user_id} has no finished booking of item {item_id}")]
    CommentNotAllowed { user_id: i64, item_id: i64 },

    #[error("Email {0} is already in use")]
    EmailConflict(String),

    /// Request shape violations
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Short machine-readable label used in error response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::ItemNotFound(_) => "ItemNotFound",
            DomainError::ItemNotAvailable(_) => "ItemNotAvailable",
            DomainError::UserNotFound(_) => "UserNotFound",
            DomainError::BookingNotFound(_) => "BookingNotFound",
            DomainError::BookingStatusConflict(_) => "BookingStatusConflict",
            DomainError::UnknownBookingState(_) => "UnknownBookingState",
            DomainError::InvalidInterval(_) => "InvalidInterval",
            DomainError::ItemRequestNotFound(_) => "ItemRequestNotFound",
            DomainError::NotItemOwner { .. } => "NotItemOwner",
            DomainError::CommentNotAllowed { .. } => "CommentNotAllowed",
            DomainError::EmailConflict(_) => "EmailConflict",
            DomainError::Validation(_) => "Validation",
            DomainError::Database(_) => "Database",
            DomainError::Internal(_) => "Internal",
        }
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
