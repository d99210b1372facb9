use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{self, AuthPayload, Claims};
use crate::config;
use crate::error::ApiError;
use crate::models::User;
use crate::services::users::{SignupInput, UsersService};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn signup(&self, input: SignupInput) -> Result<AuthPayload, ApiError> {
        let user = UsersService::new(self.pool.clone()).create(input).await?;
        let token = self.token_for(user.id)?;
        Ok(AuthPayload { token, user })
    }

    /// Both an unknown email and a wrong password produce the same
    /// validation-style failure; neither leaks which part was wrong.
    pub async fn login(&self, input: LoginInput) -> Result<AuthPayload, ApiError> {
        let user = UsersService::new(self.pool.clone())
            .find_one_by_email(&input.email)
            .await
            .map_err(|err| match err {
                ApiError::NotFound(_) => ApiError::bad_request("Email/Password invalid."),
                other => other,
            })?;

        if !auth::verify_password(&input.password, &user.password)? {
            return Err(ApiError::bad_request("Email/Password invalid."));
        }

        let token = self.token_for(user.id)?;
        Ok(AuthPayload { token, user })
    }

    /// Issue a fresh token for an already-authenticated principal.
    pub fn revalidate(&self, user: User) -> Result<AuthPayload, ApiError> {
        let token = self.token_for(user.id)?;
        Ok(AuthPayload { token, user })
    }

    fn token_for(&self, user_id: Uuid) -> Result<String, ApiError> {
        let security = &config::config().security;
        let claims = Claims::new(user_id, security.jwt_expiry_hours);
        Ok(auth::generate_token(&claims, &security.jwt_secret)?)
    }
}
