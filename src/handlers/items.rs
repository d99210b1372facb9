use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::models::Item;
use crate::query::ListParams;
use crate::services::items::{CreateItemInput, ItemsService, UpdateItemInput};
use crate::state::AppState;

/// GET /api/items - current user's items, paged and searchable
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Item>> {
    let page = params.pagination()?;
    let items = ItemsService::new(state.pool.clone())
        .find_all(&user, page, params.search_term())
        .await?;
    Ok(ApiResponse::success(items))
}

/// GET /api/items/:id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Item> {
    let item = ItemsService::new(state.pool.clone())
        .find_one(id, &user)
        .await?;
    Ok(ApiResponse::success(item))
}

/// POST /api/items
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(input): Json<CreateItemInput>,
) -> ApiResult<Item> {
    validate::create_item_input(&input)?;
    let item = ItemsService::new(state.pool.clone())
        .create(input, &user)
        .await?;
    Ok(ApiResponse::created(item))
}

/// PATCH /api/items/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateItemInput>,
) -> ApiResult<Item> {
    validate::update_item_input(&input)?;
    let item = ItemsService::new(state.pool.clone())
        .update(id, input, &user)
        .await?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/items/:id - returns the removed item's prior state
pub async fn remove(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Item> {
    let item = ItemsService::new(state.pool.clone())
        .remove(id, &user)
        .await?;
    Ok(ApiResponse::success(item))
}
