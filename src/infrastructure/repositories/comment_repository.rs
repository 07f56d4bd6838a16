//! SeaORM implementation of CommentRepository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{Comment, CommentRepository, DomainError};
use crate::models::comment::{self, ActiveModel, Entity as CommentEntity};
use crate::models::user::{self, Entity as UserEntity};

/// SeaORM-based implementation of CommentRepository
pub struct SeaOrmCommentRepository {
    db: DatabaseConnection,
}

impl SeaOrmCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_comment(model: comment::Model, author: Option<user::Model>) -> Comment {
    Comment {
        id: model.id,
        text: model.text,
        item_id: model.item_id,
        author_id: model.author_id,
        author_name: author.map(|a| a.name).unwrap_or_else(|| "Unknown".to_string()),
        created: model.created,
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: String,
        created: NaiveDateTime,
    ) -> Result<Comment, DomainError> {
        let new_comment = ActiveModel {
            text: Set(text),
            item_id: Set(item_id),
            author_id: Set(author_id),
            created: Set(created),
            ..Default::default()
        };

        let saved = new_comment.insert(&self.db).await?;
        let author = UserEntity::find_by_id(saved.author_id).one(&self.db).await?;

        Ok(to_comment(saved, author))
    }

    async fn find_by_item(&self, item_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = CommentEntity::find()
            .find_also_related(UserEntity)
            .filter(comment::Column::ItemId.eq(item_id))
            .order_by_asc(comment::Column::Created)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| to_comment(comment, author))
            .collect())
    }
}
