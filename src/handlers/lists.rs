use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::models::{List, ListItem};
use crate::query::ListParams;
use crate::services::list_items::ListItemsService;
use crate::services::lists::{CreateListInput, ListsService, UpdateListInput};
use crate::state::AppState;

/// GET /api/lists - current user's lists, paged and searchable
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<List>> {
    let page = params.pagination()?;
    let lists = ListsService::new(state.pool.clone())
        .find_all(&user, page, params.search_term())
        .await?;
    Ok(ApiResponse::success(lists))
}

/// GET /api/lists/:id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<List> {
    let list = ListsService::new(state.pool.clone())
        .find_one(id, &user)
        .await?;
    Ok(ApiResponse::success(list))
}

/// POST /api/lists
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(input): Json<CreateListInput>,
) -> ApiResult<List> {
    validate::create_list_input(&input)?;
    let list = ListsService::new(state.pool.clone())
        .create(input, &user)
        .await?;
    Ok(ApiResponse::created(list))
}

/// PATCH /api/lists/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateListInput>,
) -> ApiResult<List> {
    validate::update_list_input(&input)?;
    let list = ListsService::new(state.pool.clone())
        .update(id, input, &user)
        .await?;
    Ok(ApiResponse::success(list))
}

/// DELETE /api/lists/:id - returns the removed list's prior state;
/// its associations cascade away in the store
pub async fn remove(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<List> {
    let list = ListsService::new(state.pool.clone())
        .remove(id, &user)
        .await?;
    Ok(ApiResponse::success(list))
}

/// GET /api/lists/:id/items - the list's associations, searchable by the
/// joined item's name. Resolved lazily, only when this endpoint is called.
pub async fn list_items(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<ListItem>> {
    let page = params.pagination()?;
    // Ownership check first; a foreign list id reads as NotFound.
    let list = ListsService::new(state.pool.clone())
        .find_one(id, &user)
        .await?;
    let items = ListItemsService::new(state.pool.clone())
        .find_all_by_list(&list, page, params.search_term())
        .await?;
    Ok(ApiResponse::success(items))
}

/// GET /api/lists/:id/item-count
pub async fn item_count(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<i64> {
    let list = ListsService::new(state.pool.clone())
        .find_one(id, &user)
        .await?;
    let count = ListItemsService::new(state.pool.clone())
        .count_by_list(list.id)
        .await?;
    Ok(ApiResponse::success(count))
}
