use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;
use crate::models::User;
use crate::services::users::UsersService;
use crate::state::AppState;

/// Authenticated principal for the current request. Resolved once by the
/// middleware and read-only from there on.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Identity resolution for every protected route: verify the bearer token,
/// load the full principal record, reject blocked principals, and expose the
/// result to downstream handlers via request extensions.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let claims = validate_token(&token)?;

    let user = load_principal(&state, &claims).await?;

    if user.is_blocked {
        tracing::warn!("Blocked user {} attempted access", user.id);
        return Err(ApiError::forbidden("User blocked, talk to the admin."));
    }

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty JWT token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

fn validate_token(token: &str) -> Result<Claims, ApiError> {
    let secret = &config::config().security.jwt_secret;
    Ok(auth::decode_token(token, secret)?)
}

async fn load_principal(state: &AppState, claims: &Claims) -> Result<User, ApiError> {
    // A token whose principal no longer exists is an authentication failure,
    // not a lookup miss.
    UsersService::new(state.pool.clone())
        .find_one_by_id(claims.sub)
        .await
        .map_err(|err| match err {
            ApiError::NotFound(_) => ApiError::unauthorized("Invalid token"),
            other => other,
        })
}
