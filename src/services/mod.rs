//! Services Layer
//!
//! Business rules on top of the repository traits. Handlers in `api` only
//! parse requests and call into these services.

pub mod booking_service;
pub mod item_request_service;
pub mod item_service;
pub mod user_service;

pub use booking_service::{BookingRole, BookingService};
pub use item_request_service::ItemRequestService;
pub use item_service::ItemService;
pub use user_service::UserService;
