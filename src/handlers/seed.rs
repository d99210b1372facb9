use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::seed::SeedService;
use crate::state::AppState;

/// POST /seed - rebuild the database from the bundled fixture data.
/// Refused outright in production.
pub async fn run(State(state): State<AppState>) -> ApiResult<bool> {
    let executed = SeedService::new(state.pool.clone()).execute().await?;
    Ok(ApiResponse::success(executed))
}
