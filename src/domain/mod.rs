//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Booking rules, the clock capability, trait definitions and domain error types.

pub mod booking;
pub mod clock;
pub mod errors;
pub mod pagination;
pub mod repositories;
pub mod validation;

pub use booking::{
    BookedItem, Booking, BookingRequest, BookingState, BookingStatus, BookingView, NewBooking,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::DomainError;
pub use pagination::PageRequest;
pub use repositories::*;
