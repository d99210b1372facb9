use axum::extract::{Extension, State};
use axum::Json;

use crate::auth::AuthPayload;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::auth::{AuthService, LoginInput};
use crate::services::users::SignupInput;
use crate::state::AppState;

/// POST /auth/signup - create an account and receive a token
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> ApiResult<AuthPayload> {
    validate::signup_input(&input)?;
    let payload = AuthService::new(state.pool.clone()).signup(input).await?;
    Ok(ApiResponse::created(payload))
}

/// POST /auth/login - authenticate and receive a token
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> ApiResult<AuthPayload> {
    let payload = AuthService::new(state.pool.clone()).login(input).await?;
    Ok(ApiResponse::success(payload))
}

/// GET /auth/revalidate - fresh token for the current session
pub async fn revalidate(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<AuthPayload> {
    let payload = AuthService::new(state.pool.clone()).revalidate(user)?;
    Ok(ApiResponse::success(payload))
}
