use axum::extract::{Extension, Path, State};
use axum::Json;
use uuid::Uuid;

use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::models::ListItem;
use crate::services::list_items::{CreateListItemInput, ListItemsService, UpdateListItemInput};
use crate::state::AppState;

/// POST /api/list-items - associate an item with a list
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    Json(input): Json<CreateListItemInput>,
) -> ApiResult<ListItem> {
    validate::create_list_item_input(&input)?;
    let list_item = ListItemsService::new(state.pool.clone()).create(input).await?;
    Ok(ApiResponse::created(list_item))
}

/// GET /api/list-items/:id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<ListItem> {
    let list_item = ListItemsService::new(state.pool.clone()).find_one(id).await?;
    Ok(ApiResponse::success(list_item))
}

/// PATCH /api/list-items/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateListItemInput>,
) -> ApiResult<ListItem> {
    validate::update_list_item_input(&input)?;
    let list_item = ListItemsService::new(state.pool.clone())
        .update(id, input)
        .await?;
    Ok(ApiResponse::success(list_item))
}

/// DELETE /api/list-items/:id - returns the removed association's prior state
pub async fn remove(
    State(state): State<AppState>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<ListItem> {
    let list_item = ListItemsService::new(state.pool.clone()).remove(id).await?;
    Ok(ApiResponse::success(list_item))
}
