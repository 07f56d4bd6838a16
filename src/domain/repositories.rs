//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::DomainError;
use super::booking::{Booking, BookingStatus, NewBooking};
use super::pagination::PageRequest;

/// User data for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of `PATCH /users/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find all users ordered by id
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn create(&self, name: String, email: String) -> Result<User, DomainError>;

    /// Apply the present fields of `input`
    async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

/// Item as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Item data for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
        }
    }
}

/// Reference to the previous or upcoming approved booking of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacentBooking {
    pub id: i64,
    pub booker_id: i64,
}

impl From<&Booking> for AdjacentBooking {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
        }
    }
}

/// Item with booking context and comments, as shown on the item page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub last_booking: Option<AdjacentBooking>,
    pub next_booking: Option<AdjacentBooking>,
    pub comments: Vec<CommentView>,
}

/// Body of `POST /items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    pub request_id: Option<i64>,
}

/// Validated item fields ready to be stored
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Body of `PATCH /items/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Repository trait for Item entity
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, DomainError>;

    async fn create(&self, item: NewItem) -> Result<Item, DomainError>;

    async fn update(&self, id: i64, input: UpdateItemInput) -> Result<Item, DomainError>;

    /// Items of one owner ordered by id
    async fn find_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Item>, DomainError>;

    /// Available items whose name or description contains `text`, ignoring case
    async fn search(&self, text: &str, page: PageRequest) -> Result<Vec<Item>, DomainError>;

    /// Items created in answer to an item request
    async fn find_by_request(&self, request_id: i64) -> Result<Vec<Item>, DomainError>;
}

/// Repository trait for Booking entity
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: NewBooking) -> Result<Booking, DomainError>;

    /// Booking by id, only if `owner_id` owns the booked item
    async fn find_by_id_for_owner(
        &self,
        booking_id: i64,
        owner_id: i64,
    ) -> Result<Option<Booking>, DomainError>;

    /// Booking by id, only if `user_id` is its booker or owns the booked item
    async fn find_by_id_for_owner_or_booker(
        &self,
        booking_id: i64,
        user_id: i64,
    ) -> Result<Option<Booking>, DomainError>;

    async fn update_status(
        &self,
        booking_id: i64,
        status: BookingStatus,
    ) -> Result<Booking, DomainError>;

    /// Bookings made by `booker_id`, newest start first
    async fn find_by_booker(
        &self,
        booker_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Bookings of items owned by `owner_id`, newest start first
    async fn find_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Latest-ending APPROVED booking that started before `now`
    async fn find_last_approved(
        &self,
        item_id: i64,
        owner_id: i64,
        now: NaiveDateTime,
    ) -> Result<Option<Booking>, DomainError>;

    /// Earliest APPROVED booking starting after `now`
    async fn find_next_approved(
        &self,
        item_id: i64,
        owner_id: i64,
        now: NaiveDateTime,
    ) -> Result<Option<Booking>, DomainError>;

    /// Whether `booker_id` has an APPROVED booking of the item that ended before `now`
    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> Result<bool, DomainError>;
}

/// Comment as stored, with its author's name resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: NaiveDateTime,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name: comment.author_name,
            created: comment.created,
        }
    }
}

/// Body of `POST /items/{itemId}/comment`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentInput {
    pub text: Option<String>,
}

/// Repository trait for Comment entity
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: String,
        created: NaiveDateTime,
    ) -> Result<Comment, DomainError>;

    /// Comments of an item, oldest first
    async fn find_by_item(&self, item_id: i64) -> Result<Vec<Comment>, DomainError>;
}

/// Request for an item that is not in the catalog yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequestView {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub items: Vec<ItemView>,
}

/// Body of `POST /requests`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateItemRequestInput {
    pub description: Option<String>,
}

/// Repository trait for ItemRequest entity
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    async fn create(
        &self,
        requester_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> Result<ItemRequest, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ItemRequest>, DomainError>;

    /// Requests made by one user, newest first
    async fn find_by_requester(&self, requester_id: i64) -> Result<Vec<ItemRequest>, DomainError>;

    /// Requests made by everyone except `requester_id`, newest first
    async fn find_all_except(
        &self,
        requester_id: i64,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, DomainError>;
}
