//! Item Service - catalog management, owner view with adjacent bookings, search and comments

use std::sync::Arc;

use crate::domain::validation::{validate_comment, validate_item_update, validate_new_item};
use crate::domain::{
    AdjacentBooking, BookingRepository, Clock, CommentInput, CommentRepository, CommentView,
    CreateItemInput, DomainError, Item, ItemDetails, ItemRepository, ItemRequestRepository,
    ItemView, NewItem, PageRequest, UpdateItemInput, UserRepository,
};

#[derive(Clone)]
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingRepository>,
    comments: Arc<dyn CommentRepository>,
    requests: Arc<dyn ItemRequestRepository>,
    clock: Arc<dyn Clock>,
}

impl ItemService {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingRepository>,
        comments: Arc<dyn CommentRepository>,
        requests: Arc<dyn ItemRequestRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            items,
            users,
            bookings,
            comments,
            requests,
            clock,
        }
    }

    async fn require_user(&self, user_id: i64) -> Result<(), DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or(DomainError::UserNotFound(user_id))
    }

    async fn require_item(&self, item_id: i64) -> Result<Item, DomainError> {
        self.items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(format!("Item {} not found", item_id)))
    }

    pub async fn create(
        &self,
        owner_id: i64,
        input: CreateItemInput,
    ) -> Result<ItemView, DomainError> {
        validate_new_item(&input)?;
        self.require_user(owner_id).await?;

        if let Some(request_id) = input.request_id {
            self.requests
                .find_by_id(request_id)
                .await?
                .ok_or(DomainError::ItemRequestNotFound(request_id))?;
        }

        let (Some(name), Some(description), Some(available)) =
            (input.name, input.description, input.available)
        else {
            return Err(DomainError::Validation(
                "name, description and available must be present".to_string(),
            ));
        };

        let item = self
            .items
            .create(NewItem {
                name,
                description,
                available,
                owner_id,
                request_id: input.request_id,
            })
            .await?;

        tracing::info!("User {} added item {} '{}'", owner_id, item.id, item.name);
        Ok(ItemView::from(item))
    }

    pub async fn update(
        &self,
        owner_id: i64,
        item_id: i64,
        input: UpdateItemInput,
    ) -> Result<ItemView, DomainError> {
        validate_item_update(&input)?;
        self.require_user(owner_id).await?;
        let item = self.require_item(item_id).await?;

        if item.owner_id != owner_id {
            return Err(DomainError::NotItemOwner {
                user_id: owner_id,
                item_id,
            });
        }

        let updated = self.items.update(item_id, input).await?;
        Ok(ItemView::from(updated))
    }

    /// Item with comments; adjacent bookings are only shown to the owner
    pub async fn get(&self, item_id: i64, user_id: i64) -> Result<ItemDetails, DomainError> {
        let item = self.require_item(item_id).await?;
        let now = self.clock.now();
        self.details(item, user_id, now).await
    }

    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> Result<Vec<ItemDetails>, DomainError> {
        let items = self.items.find_by_owner(owner_id, page).await?;
        let now = self.clock.now();

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            result.push(self.details(item, owner_id, now).await?);
        }
        Ok(result)
    }

    async fn details(
        &self,
        item: Item,
        user_id: i64,
        now: chrono::NaiveDateTime,
    ) -> Result<ItemDetails, DomainError> {
        let (last_booking, next_booking) = if item.owner_id == user_id {
            let last = self
                .bookings
                .find_last_approved(item.id, user_id, now)
                .await?;
            let next = self
                .bookings
                .find_next_approved(item.id, user_id, now)
                .await?;
            (
                last.as_ref().map(AdjacentBooking::from),
                next.as_ref().map(AdjacentBooking::from),
            )
        } else {
            (None, None)
        };

        let comments = self
            .comments
            .find_by_item(item.id)
            .await?
            .into_iter()
            .map(CommentView::from)
            .collect();

        Ok(ItemDetails {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        })
    }

    /// Blank text finds nothing
    pub async fn search(
        &self,
        text: &str,
        page: PageRequest,
    ) -> Result<Vec<ItemView>, DomainError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items = self.items.search(text, page).await?;
        Ok(items.into_iter().map(ItemView::from).collect())
    }

    /// Only users with a finished APPROVED booking of the item may comment
    pub async fn add_comment(
        &self,
        item_id: i64,
        user_id: i64,
        input: CommentInput,
    ) -> Result<CommentView, DomainError> {
        validate_comment(&input)?;
        self.require_user(user_id).await?;
        self.require_item(item_id).await?;

        let now = self.clock.now();
        if !self
            .bookings
            .has_finished_booking(user_id, item_id, now)
            .await?
        {
            return Err(DomainError::CommentNotAllowed { user_id, item_id });
        }

        let text = input.text.unwrap_or_default();
        let comment = self.comments.create(item_id, user_id, text, now).await?;

        tracing::info!("User {} commented on item {}", user_id, item_id);
        Ok(CommentView::from(comment))
    }
}
