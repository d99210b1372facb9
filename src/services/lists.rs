use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{List, User};
use crate::query::{PageQuery, Pagination};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListInput {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListInput {
    pub name: Option<String>,
}

/// Owner-scoped CRUD for lists. Same scoping rule as items: cross-owner
/// access fails with NotFound.
pub struct ListsService {
    pool: PgPool,
}

impl ListsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateListInput, owner: &User) -> Result<List, ApiError> {
        let list = sqlx::query_as::<_, List>(
            "INSERT INTO lists (id, name, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(owner.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(list)
    }

    pub async fn find_all(
        &self,
        owner: &User,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<List>, ApiError> {
        Ok(PageQuery::new("lists")
            .filter_eq("user_id", owner.id)
            .search(&["name"], search)
            .page(page)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn find_one(&self, id: Uuid, owner: &User) -> Result<List, ApiError> {
        sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("List with id {} not found", id)))
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateListInput,
        owner: &User,
    ) -> Result<List, ApiError> {
        let existing = self.find_one(id, owner).await?;
        let name = input.name.unwrap_or(existing.name);

        let list = sqlx::query_as::<_, List>(
            "UPDATE lists SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(list)
    }

    /// Delete and return the prior state. The store cascades the list's
    /// list_items away.
    pub async fn remove(&self, id: Uuid, owner: &User) -> Result<List, ApiError> {
        let list = self.find_one(id, owner).await?;

        sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(list)
    }

    pub async fn count_by_user(&self, user_id: Uuid) -> Result<i64, ApiError> {
        Ok(PageQuery::new("lists")
            .filter_eq("user_id", user_id)
            .count(&self.pool)
            .await?)
    }
}
