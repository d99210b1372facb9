use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;
use crate::models::{Role, User};
use crate::query::{PageQuery, Pagination};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub roles: Option<Vec<Role>>,
    pub is_blocked: Option<bool>,
}

pub struct UsersService {
    pool: PgPool,
}

impl UsersService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user from signup input. New users always start with the
    /// plain user role; a duplicate email surfaces as Conflict.
    pub async fn create(&self, input: SignupInput) -> Result<User, ApiError> {
        let hash = auth::hash_password(&input.password)?;
        let roles = vec![Role::User.as_str().to_string()];

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password, full_name, roles, is_blocked)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.email.to_lowercase())
        .bind(hash)
        .bind(input.full_name)
        .bind(roles)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users, optionally restricted to those holding all of `roles`.
    /// An empty role set means no restriction.
    pub async fn find_all(
        &self,
        roles: &[Role],
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<User>, ApiError> {
        let mut query = PageQuery::new("users")
            .search(&["full_name", "email"], search)
            .page(page);

        if !roles.is_empty() {
            query = query.filter_contains(
                "roles",
                roles.iter().map(|r| r.as_str().to_string()).collect(),
            );
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("User with id {} not found", id)))
    }

    pub async fn find_one_by_email(&self, email: &str) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("User with email {} not found", email)))
    }

    /// Merge the partial input onto the stored record and persist, recording
    /// the acting principal as last modifier.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateUserInput,
        updated_by: &User,
    ) -> Result<User, ApiError> {
        let existing = self.find_one_by_id(id).await?;

        let email = input
            .email
            .map(|e| e.to_lowercase())
            .unwrap_or(existing.email);
        let password = match input.password {
            Some(plain) => auth::hash_password(&plain)?,
            None => existing.password,
        };
        let full_name = input.full_name.unwrap_or(existing.full_name);
        let roles: Vec<String> = input
            .roles
            .unwrap_or(existing.roles)
            .iter()
            .map(|r| r.as_str().to_string())
            .collect();
        let is_blocked = input.is_blocked.unwrap_or(existing.is_blocked);

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, password = $2, full_name = $3, roles = $4,
                is_blocked = $5, last_update_by = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password)
        .bind(full_name)
        .bind(roles)
        .bind(is_blocked)
        .bind(updated_by.id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn block(&self, id: Uuid, admin: &User) -> Result<User, ApiError> {
        self.find_one_by_id(id).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_blocked = TRUE, last_update_by = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(admin.id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
