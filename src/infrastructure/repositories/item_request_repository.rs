//! SeaORM implementation of ItemRequestRepository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{DomainError, ItemRequest, ItemRequestRepository, PageRequest};
use crate::models::item_request::{ActiveModel, Column, Entity as ItemRequestEntity};

/// SeaORM-based implementation of ItemRequestRepository
pub struct SeaOrmItemRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmItemRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRequestRepository for SeaOrmItemRequestRepository {
    async fn create(
        &self,
        requester_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> Result<ItemRequest, DomainError> {
        let new_request = ActiveModel {
            description: Set(description),
            requester_id: Set(requester_id),
            created: Set(created),
            ..Default::default()
        };

        let saved = new_request.insert(&self.db).await?;
        Ok(ItemRequest::from(saved))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ItemRequest>, DomainError> {
        let request = ItemRequestEntity::find_by_id(id).one(&self.db).await?;
        Ok(request.map(ItemRequest::from))
    }

    async fn find_by_requester(&self, requester_id: i64) -> Result<Vec<ItemRequest>, DomainError> {
        let requests = ItemRequestEntity::find()
            .filter(Column::RequesterId.eq(requester_id))
            .order_by_desc(Column::Created)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(requests.into_iter().map(ItemRequest::from).collect())
    }

    async fn find_all_except(
        &self,
        requester_id: i64,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, DomainError> {
        let query = ItemRequestEntity::find()
            .filter(Column::RequesterId.ne(requester_id))
            .order_by_desc(Column::Created)
            .order_by_desc(Column::Id)
            .offset(page.offset())
            .limit(page.limit());

        let requests = query.all(&self.db).await?;
        Ok(requests.into_iter().map(ItemRequest::from).collect())
    }
}
