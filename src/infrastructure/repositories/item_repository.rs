//! SeaORM implementation of ItemRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{DomainError, Item, ItemRepository, NewItem, PageRequest, UpdateItemInput};
use crate::models::item::{ActiveModel, Column, Entity as ItemEntity};

/// SeaORM-based implementation of ItemRepository
pub struct SeaOrmItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, DomainError> {
        let item = ItemEntity::find_by_id(id).one(&self.db).await?;
        Ok(item.map(Item::from))
    }

    async fn create(&self, item: NewItem) -> Result<Item, DomainError> {
        let new_item = ActiveModel {
            name: Set(item.name),
            description: Set(item.description),
            available: Set(item.available),
            owner_id: Set(item.owner_id),
            request_id: Set(item.request_id),
            ..Default::default()
        };

        let result = new_item.insert(&self.db).await?;
        Ok(Item::from(result))
    }

    async fn update(&self, id: i64, input: UpdateItemInput) -> Result<Item, DomainError> {
        let existing = ItemEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(format!("Item {} not found", id)))?;

        if input.name.is_none() && input.description.is_none() && input.available.is_none() {
            return Ok(Item::from(existing));
        }

        let mut active: ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(available) = input.available {
            active.available = Set(available);
        }

        let result = active.update(&self.db).await?;
        Ok(Item::from(result))
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> Result<Vec<Item>, DomainError> {
        let query = ItemEntity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.limit());

        let items = query.all(&self.db).await?;
        Ok(items.into_iter().map(Item::from).collect())
    }

    async fn search(
        &self,
        text: &str,
        page: PageRequest,
    ) -> Result<Vec<Item>, DomainError> {
        // SQLite LIKE is case-insensitive for ASCII
        let query = ItemEntity::find()
            .filter(Column::Available.eq(true))
            .filter(
                Condition::any()
                    .add(Column::Name.contains(text))
                    .add(Column::Description.contains(text)),
            )
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.limit());

        let items = query.all(&self.db).await?;
        tracing::debug!("Search '{}' matched {} items", text, items.len());
        Ok(items.into_iter().map(Item::from).collect())
    }

    async fn find_by_request(&self, request_id: i64) -> Result<Vec<Item>, DomainError> {
        let items = ItemEntity::find()
            .filter(Column::RequestId.eq(request_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(items.into_iter().map(Item::from).collect())
    }
}
