//! Booking Service - creation, approval and role-based listing of bookings

use std::sync::Arc;

use crate::domain::{
    Booking, BookingRepository, BookingRequest, BookingState, BookingStatus, BookingView, Clock,
    DomainError, ItemRepository, NewBooking, PageRequest, UserRepository,
};

/// Whose bookings a list covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRole {
    /// Bookings the user made
    Booker,
    /// Bookings of items the user owns
    Owner,
}

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    items: Arc<dyn ItemRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        items: Arc<dyn ItemRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            items,
            users,
            clock,
        }
    }

    /// Create a WAITING booking of someone else's available item
    pub async fn create(
        &self,
        requester_id: i64,
        request: &BookingRequest,
    ) -> Result<BookingView, DomainError> {
        let valid = request.validate(self.clock.now())?;

        let item = self
            .items
            .find_by_id(valid.item_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(format!("Item {} not found", valid.item_id)))?;

        if !item.available {
            return Err(DomainError::ItemNotAvailable(item.id));
        }

        // Owners get the same answer as for a missing item
        if item.owner_id == requester_id {
            return Err(DomainError::ItemNotFound(format!(
                "Item {} cannot be booked by its owner",
                item.id
            )));
        }

        self.users
            .find_by_id(requester_id)
            .await?
            .ok_or(DomainError::UserNotFound(requester_id))?;

        let booking = self
            .bookings
            .create(NewBooking {
                start: valid.start,
                end: valid.end,
                item_id: item.id,
                booker_id: requester_id,
                status: BookingStatus::Waiting,
            })
            .await?;

        tracing::info!(
            "Booking {} created for item {} by user {}",
            booking.id,
            item.id,
            requester_id
        );
        Ok(BookingView::from(booking))
    }

    /// Approve or reject a booking as the owner of the booked item
    pub async fn approve(
        &self,
        booking_id: i64,
        approved: bool,
        owner_id: i64,
    ) -> Result<BookingView, DomainError> {
        let booking = self
            .bookings
            .find_by_id_for_owner(booking_id, owner_id)
            .await?
            .ok_or_else(|| {
                DomainError::BookingNotFound(format!(
                    "Booking {} not found for owner {}",
                    booking_id, owner_id
                ))
            })?;

        let status = booking.status.decide(booking_id, approved)?;
        let updated = self.bookings.update_status(booking_id, status).await?;

        tracing::info!("Booking {} is now {}", booking_id, status);
        Ok(BookingView::from(updated))
    }

    /// Booking as seen by its booker or the owner of the booked item
    pub async fn get(&self, booking_id: i64, user_id: i64) -> Result<BookingView, DomainError> {
        self.bookings
            .find_by_id_for_owner_or_booker(booking_id, user_id)
            .await?
            .map(BookingView::from)
            .ok_or_else(|| {
                DomainError::BookingNotFound(format!(
                    "Booking {} not found for user {}",
                    booking_id, user_id
                ))
            })
    }

    pub async fn list(
        &self,
        user_id: i64,
        role: BookingRole,
        state: BookingState,
        page: PageRequest,
    ) -> Result<Vec<BookingView>, DomainError> {
        let raw = match role {
            BookingRole::Booker => {
                self.users
                    .find_by_id(user_id)
                    .await?
                    .ok_or(DomainError::UserNotFound(user_id))?;
                self.bookings.find_by_booker(user_id, page).await?
            }
            BookingRole::Owner => self.bookings.find_by_owner(user_id, page).await?,
        };

        if raw.is_empty() {
            return Err(DomainError::BookingNotFound(format!(
                "No bookings found for user {} on page {}",
                user_id,
                page.page()
            )));
        }

        let views = filter_and_sort(raw, state, self.clock.now());
        tracing::debug!(
            "User {} listed {} {:?} bookings in state {}",
            user_id,
            views.len(),
            role,
            state
        );
        Ok(views)
    }

    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        page: PageRequest,
    ) -> Result<Vec<BookingView>, DomainError> {
        self.list(booker_id, BookingRole::Booker, state, page).await
    }

    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        page: PageRequest,
    ) -> Result<Vec<BookingView>, DomainError> {
        self.list(owner_id, BookingRole::Owner, state, page).await
    }
}

/// Keep bookings matching `state` at `now`, latest end first
fn filter_and_sort(
    bookings: Vec<Booking>,
    state: BookingState,
    now: chrono::NaiveDateTime,
) -> Vec<BookingView> {
    let mut kept: Vec<Booking> = bookings
        .into_iter()
        .filter(|b| state.matches(b, now))
        .collect();
    kept.sort_by(|a, b| b.end.cmp(&a.end));
    kept.into_iter().map(BookingView::from).collect()
}
