//! Item Request Service - requests for items not in the catalog yet

use std::sync::Arc;

use crate::domain::validation::validate_item_request;
use crate::domain::{
    Clock, CreateItemRequestInput, DomainError, ItemRepository, ItemRequest,
    ItemRequestRepository, ItemRequestView, ItemView, PageRequest, UserRepository,
};

#[derive(Clone)]
pub struct ItemRequestService {
    requests: Arc<dyn ItemRequestRepository>,
    items: Arc<dyn ItemRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl ItemRequestService {
    pub fn new(
        requests: Arc<dyn ItemRequestRepository>,
        items: Arc<dyn ItemRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            items,
            users,
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

    async fn with_items(&self, request: ItemRequest) -> Result<ItemRequestView, DomainError> {
        let items = self
            .items
            .find_by_request(request.id)
            .await?
            .into_iter()
            .map(ItemView::from)
            .collect();

        Ok(ItemRequestView {
            id: request.id,
            description: request.description,
            created: request.created,
            items,
        })
    }

    async fn with_items_all(
        &self,
        requests: Vec<ItemRequest>,
    ) -> Result<Vec<ItemRequestView>, DomainError> {
        let mut views = Vec::with_capacity(requests.len());
        for request in requests {
            views.push(self.with_items(request).await?);
        }
        Ok(views)
    }

    pub async fn create(
        &self,
        user_id: i64,
        input: CreateItemRequestInput,
    ) -> Result<ItemRequestView, DomainError> {
        validate_item_request(&input)?;
        self.require_user(user_id).await?;

        let description = input.description.unwrap_or_default();
        let request = self
            .requests
            .create(user_id, description, self.clock.now())
            .await?;

        tracing::info!("User {} opened item request {}", user_id, request.id);
        Ok(ItemRequestView {
            id: request.id,
            description: request.description,
            created: request.created,
            items: Vec::new(),
        })
    }

    pub async fn list_own(&self, user_id: i64) -> Result<Vec<ItemRequestView>, DomainError> {
        self.require_user(user_id).await?;
        let requests = self.requests.find_by_requester(user_id).await?;
        self.with_items_all(requests).await
    }

    pub async fn list_others(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<ItemRequestView>, DomainError> {
        self.require_user(user_id).await?;
        let requests = self.requests.find_all_except(user_id, page).await?;
        self.with_items_all(requests).await
    }

    pub async fn get(
        &self,
        user_id: i64,
        request_id: i64,
    ) -> Result<ItemRequestView, DomainError> {
        self.require_user(user_id).await?;
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::ItemRequestNotFound(request_id))?;
        self.with_items(request).await
    }
}
