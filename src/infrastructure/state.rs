//! Application state containing repositories, services and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    BookingRepository, Clock, CommentRepository, ItemRepository, ItemRequestRepository,
    SystemClock, UserRepository,
};
use crate::infrastructure::{
    SeaOrmBookingRepository, SeaOrmCommentRepository, SeaOrmItemRepository,
    SeaOrmItemRequestRepository, SeaOrmUserRepository,
};
use crate::services::{BookingService, ItemRequestService, ItemService, UserService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub user_repo: Arc<dyn UserRepository>,
    pub item_repo: Arc<dyn ItemRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub bookings: BookingService,
    pub items: ItemService,
    pub users: UserService,
    pub requests: ItemRequestService,
}

impl AppState {
    /// Create a new AppState reading the system clock
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    /// Create a new AppState with an explicit clock
    pub fn with_clock(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        let user_repo: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let item_repo: Arc<dyn ItemRepository> = Arc::new(SeaOrmItemRepository::new(db.clone()));
        let booking_repo: Arc<dyn BookingRepository> =
            Arc::new(SeaOrmBookingRepository::new(db.clone()));
        let comment_repo: Arc<dyn CommentRepository> =
            Arc::new(SeaOrmCommentRepository::new(db.clone()));
        let request_repo: Arc<dyn ItemRequestRepository> =
            Arc::new(SeaOrmItemRequestRepository::new(db.clone()));

        let bookings = BookingService::new(
            booking_repo.clone(),
            item_repo.clone(),
            user_repo.clone(),
            clock.clone(),
        );
        let items = ItemService::new(
            item_repo.clone(),
            user_repo.clone(),
            booking_repo.clone(),
            comment_repo,
            request_repo.clone(),
            clock.clone(),
        );
        let users = UserService::new(user_repo.clone());
        let requests = ItemRequestService::new(
            request_repo,
            item_repo.clone(),
            user_repo.clone(),
            clock,
        );

        Self {
            db,
            user_repo,
            item_repo,
            booking_repo,
            bookings,
            items,
            users,
            requests,
        }
    }
}

impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
