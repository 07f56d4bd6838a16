//! Repository implementations using SeaORM

pub mod booking_repository;
pub mod comment_repository;
pub mod item_repository;
pub mod item_request_repository;
pub mod user_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use comment_repository::SeaOrmCommentRepository;
pub use item_repository::SeaOrmItemRepository;
pub use item_request_repository::SeaOrmItemRequestRepository;
pub use user_repository::SeaOrmUserRepository;
