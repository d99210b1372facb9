use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Item, User};
use crate::query::{PageQuery, Pagination};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
}

/// Owner-scoped CRUD for items. Every read, update and delete is scoped to
/// the owning user; cross-owner ids fail with NotFound, indistinguishable
/// from absence.
pub struct ItemsService {
    pool: PgPool,
}

impl ItemsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateItemInput, owner: &User) -> Result<Item, ApiError> {
        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO items (id, name, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(owner.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn find_all(
        &self,
        owner: &User,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<Item>, ApiError> {
        Ok(PageQuery::new("items")
            .filter_eq("user_id", owner.id)
            .search(&["name"], search)
            .page(page)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn find_one(&self, id: Uuid, owner: &User) -> Result<Item, ApiError> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Item with id {} not found", id)))
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateItemInput,
        owner: &User,
    ) -> Result<Item, ApiError> {
        let existing = self.find_one(id, owner).await?;
        let name = input.name.unwrap_or(existing.name);

        let item = sqlx::query_as::<_, Item>(
            "UPDATE items SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Delete and return the prior state. Fails while a list_item still
    /// references the item (RESTRICT policy).
    pub async fn remove(&self, id: Uuid, owner: &User) -> Result<Item, ApiError> {
        let item = self.find_one(id, owner).await?;

        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(item)
    }

    pub async fn count_by_user(&self, user_id: Uuid) -> Result<i64, ApiError> {
        Ok(PageQuery::new("items")
            .filter_eq("user_id", user_id)
            .count(&self.pool)
            .await?)
    }
}
