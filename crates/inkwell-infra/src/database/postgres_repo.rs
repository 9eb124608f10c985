//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use inkwell_core::domain::{Category, Comment, Location, Post, PostKey, User};
use inkwell_core::error::RepoError;
use inkwell_core::feed::FeedEntry;
use inkwell_core::pagination::{Page, PageRequest};
use inkwell_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use inkwell_core::visibility::PostPredicate;

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

fn timestamp(value: DateTime<Utc>) -> DateTimeWithTimeZone {
    value.into()
}

/// Translate a post predicate into a condition over `posts LEFT JOIN categories`.
pub(crate) fn predicate_condition(predicate: &PostPredicate) -> Condition {
    match predicate {
        PostPredicate::Published => Condition::all().add(post::Column::IsPublished.eq(true)),
        PostPredicate::ReleasedBy(now) => {
            Condition::all().add(post::Column::PubDate.lte(timestamp(*now)))
        }
        PostPredicate::CategoryPublished => Condition::any()
            .add(post::Column::CategoryId.is_null())
            .add(category::Column::IsPublished.eq(true)),
        PostPredicate::InCategory(id) => Condition::all().add(post::Column::CategoryId.eq(*id)),
        PostPredicate::ByAuthor(id) => Condition::all().add(post::Column::AuthorId.eq(*id)),
        PostPredicate::All(parts) => parts
            .iter()
            .fold(Condition::all(), |cond, p| cond.add(predicate_condition(p))),
        PostPredicate::Any(parts) => parts
            .iter()
            .fold(Condition::any(), |cond, p| cond.add(predicate_condition(p))),
    }
}

fn optional_eq(column: post::Column, value: Option<Uuid>) -> Condition {
    match value {
        Some(id) => Condition::all().add(column.eq(id)),
        None => Condition::all().add(column.is_null()),
    }
}

#[derive(Debug, FromQueryResult)]
struct CommentCount {
    post_id: Uuid,
    comment_count: i64,
}

/// Mask an email address for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.len() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, published_only: bool) -> Result<Vec<Category>, RepoError> {
        let mut query = CategoryEntity::find();
        if published_only {
            query = query.filter(category::Column::IsPublished.eq(true));
        }

        let result = query
            .order_by_asc(category::Column::Title)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn list(&self, published_only: bool) -> Result<Vec<Location>, RepoError> {
        let mut query = LocationEntity::find();
        if published_only {
            query = query.filter(location::Column::IsPublished.eq(true));
        }

        let result = query
            .order_by_asc(location::Column::Name)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

impl PostgresPostRepository {
    async fn comment_counts(&self, post_ids: Vec<Uuid>) -> Result<HashMap<Uuid, u64>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(
                Expr::col((comment::Entity, comment::Column::Id)).count(),
                "comment_count",
            )
            .filter(comment::Column::PostId.is_in(post_ids))
            .group_by(comment::Column::PostId)
            .into_model::<CommentCount>()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.post_id, row.comment_count.max(0) as u64))
            .collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_feed(
        &self,
        predicate: &PostPredicate,
        request: PageRequest,
    ) -> Result<Page<FeedEntry>, RepoError> {
        let select = PostEntity::find()
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(predicate_condition(predicate))
            .order_by_desc(post::Column::PubDate)
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id);

        let total = select.clone().count(&self.db).await.map_err(query_err)?;

        let models = select
            .offset(request.offset(total))
            .limit(request.size)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let counts = self
            .comment_counts(models.iter().map(|m| m.id).collect())
            .await?;

        let entries = models
            .into_iter()
            .map(|model| {
                let comment_count = counts.get(&model.id).copied().unwrap_or(0);
                FeedEntry {
                    post: model.into(),
                    comment_count,
                }
            })
            .collect();

        Ok(Page::new(entries, request.clamp(total), request.size, total))
    }

    async fn find_duplicate(
        &self,
        key: &PostKey,
        exclude: Option<Uuid>,
    ) -> Result<Option<Uuid>, RepoError> {
        let mut condition = Condition::all()
            .add(post::Column::Title.eq(key.title.as_str()))
            .add(post::Column::Text.eq(key.text.as_str()))
            .add(post::Column::PubDate.eq(timestamp(key.pub_date)))
            .add(optional_eq(post::Column::CategoryId, key.category_id))
            .add(optional_eq(post::Column::LocationId, key.location_id));
        if let Some(id) = exclude {
            condition = condition.add(post::Column::Id.ne(id));
        }

        let result = PostEntity::find()
            .filter(condition)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(|model| model.id))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
