//! SeaORM implementation of BookingRepository
//!
//! Owner scoping is expressed as a join on `items.owner_id`, so a caller who
//! does not own the booked item simply gets no row back.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    BookedItem, Booking, BookingRepository, BookingStatus, DomainError, NewBooking, PageRequest,
};
use crate::models::booking::{self, ActiveModel, Entity as BookingEntity};
use crate::models::item::{self, Entity as ItemEntity};

/// SeaORM-based implementation of BookingRepository
pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_with_item(&self, booking_id: i64) -> Result<Option<Booking>, DomainError> {
        BookingEntity::find_by_id(booking_id)
            .find_also_related(ItemEntity)
            .one(&self.db)
            .await?
            .map(|(b, i)| to_booking(b, i))
            .transpose()
    }
}

fn to_booking(model: booking::Model, item: Option<item::Model>) -> Result<Booking, DomainError> {
    let item = item.ok_or_else(|| {
        DomainError::Internal(format!(
            "booking {} references missing item {}",
            model.id, model.item_id
        ))
    })?;

    Ok(Booking {
        id: model.id,
        start: model.start_date,
        end: model.end_date,
        status: model.status.parse()?,
        item: BookedItem {
            id: item.id,
            name: item.name,
            owner_id: item.owner_id,
        },
        booker_id: model.booker_id,
    })
}

fn to_bookings(rows: Vec<(booking::Model, Option<item::Model>)>) -> Result<Vec<Booking>, DomainError> {
    rows.into_iter().map(|(b, i)| to_booking(b, i)).collect()
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, booking: NewBooking) -> Result<Booking, DomainError> {
        let new_booking = ActiveModel {
            start_date: Set(booking.start),
            end_date: Set(booking.end),
            item_id: Set(booking.item_id),
            booker_id: Set(booking.booker_id),
            status: Set(booking.status.as_str().to_owned()),
            ..Default::default()
        };

        let saved = new_booking.insert(&self.db).await?;
        tracing::debug!(
            "Inserted booking {} for item {} by user {}",
            saved.id,
            saved.item_id,
            saved.booker_id
        );

        self.find_with_item(saved.id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("booking {} vanished after insert", saved.id)))
    }

    async fn find_by_id_for_owner(
        &self,
        booking_id: i64,
        owner_id: i64,
    ) -> Result<Option<Booking>, DomainError> {
        BookingEntity::find_by_id(booking_id)
            .find_also_related(ItemEntity)
            .filter(item::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .map(|(b, i)| to_booking(b, i))
            .transpose()
    }

    async fn find_by_id_for_owner_or_booker(
        &self,
        booking_id: i64,
        user_id: i64,
    ) -> Result<Option<Booking>, DomainError> {
        BookingEntity::find_by_id(booking_id)
            .find_also_related(ItemEntity)
            .filter(
                Condition::any()
                    .add(item::Column::OwnerId.eq(user_id))
                    .add(booking::Column::BookerId.eq(user_id)),
            )
            .one(&self.db)
            .await?
            .map(|(b, i)| to_booking(b, i))
            .transpose()
    }

    async fn update_status(
        &self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<Booking, DomainError> {
        let existing = BookingEntity::find_by_id(booking_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::BookingNotFound(format!("Booking {} not found", booking_id)))?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_owned());
        active.update(&self.db).await?;

        self.find_with_item(booking_id)
            .await?
            .ok_or_else(|| DomainError::BookingNotFound(format!("Booking {} not found", booking_id)))
    }

    async fn find_by_booker(
        &self,
        booker_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows = BookingEntity::find()
            .find_also_related(ItemEntity)
            .filter(booking::Column::BookerId.eq(booker_id))
            .order_by_desc(booking::Column::StartDate)
            .order_by_desc(booking::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        to_bookings(rows)
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows = BookingEntity::find()
            .find_also_related(ItemEntity)
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_desc(booking::Column::StartDate)
            .order_by_desc(booking::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        to_bookings(rows)
    }

    async fn find_last_approved(
        &self,
        item_id: i64,
        owner_id: i64,
        now: NaiveDateTime,
    ) -> Result<Option<Booking>, DomainError> {
        BookingEntity::find()
            .find_also_related(ItemEntity)
            .filter(booking::Column::ItemId.eq(item_id))
            .filter(item::Column::OwnerId.eq(owner_id))
            .filter(booking::Column::Status.eq(BookingStatus::Approved.as_str()))
            .filter(booking::Column::StartDate.lt(now))
            .order_by_desc(booking::Column::EndDate)
            .one(&self.db)
            .await?
            .map(|(b, i)| to_booking(b, i))
            .transpose()
    }

    async fn find_next_approved(
        &self,
        item_id: i64,
        owner_id: i64,
        now: NaiveDateTime,
    ) -> Result<Option<Booking>, DomainError> {
        BookingEntity::find()
            .find_also_related(ItemEntity)
            .filter(booking::Column::ItemId.eq(item_id))
            .filter(item::Column::OwnerId.eq(owner_id))
            .filter(booking::Column::Status.eq(BookingStatus::Approved.as_str()))
            .filter(booking::Column::StartDate.gt(now))
            .order_by_asc(booking::Column::StartDate)
            .one(&self.db)
            .await?
            .map(|(b, i)| to_booking(b, i))
            .transpose()
    }

    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> Result<bool, DomainError> {
        let count = BookingEntity::find()
            .filter(booking::Column::BookerId.eq(booker_id))
            .filter(booking::Column::ItemId.eq(item_id))
            .filter(booking::Column::Status.eq(BookingStatus::Approved.as_str()))
            .filter(booking::Column::EndDate.lt(now))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
