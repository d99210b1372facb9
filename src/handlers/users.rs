use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::guard::require_roles;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::models::{parse_role_list, Item, List, Role, User};
use crate::query::ListParams;
use crate::services::items::ItemsService;
use crate::services::lists::ListsService;
use crate::services::users::{UpdateUserInput, UsersService};
use crate::state::AppState;

/// Role gates mirror the original policy: listing and reading users is open
/// to admins and super users, every user mutation and association read is
/// admin only.
const READ_ROLES: &[Role] = &[Role::Admin, Role::SuperUser];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    /// Comma-separated role filter, e.g. "admin,superUser". Empty or absent
    /// means no role restriction.
    pub roles: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<UsersQuery>,
) -> ApiResult<Vec<User>> {
    require_roles(&user, READ_ROLES)?;

    let roles = match &params.roles {
        Some(raw) => parse_role_list(raw)?,
        None => vec![],
    };
    let page = crate::query::Pagination::new(params.limit, params.offset)?;

    let users = UsersService::new(state.pool.clone())
        .find_all(&roles, page, params.search.as_deref())
        .await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/users/:id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<User> {
    require_roles(&user, READ_ROLES)?;
    let found = UsersService::new(state.pool.clone())
        .find_one_by_id(id)
        .await?;
    Ok(ApiResponse::success(found))
}

/// PATCH /api/users/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> ApiResult<User> {
    require_roles(&user, ADMIN_ONLY)?;
    validate::update_user_input(&input)?;
    let updated = UsersService::new(state.pool.clone())
        .update(id, input, &user)
        .await?;
    Ok(ApiResponse::success(updated))
}

/// POST /api/users/:id/block
pub async fn block(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<User> {
    require_roles(&user, ADMIN_ONLY)?;
    let blocked = UsersService::new(state.pool.clone())
        .block(id, &user)
        .await?;
    Ok(ApiResponse::success(blocked))
}

/// GET /api/users/:id/items - another user's items, admin only
pub async fn items(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Item>> {
    require_roles(&user, ADMIN_ONLY)?;
    let page = params.pagination()?;
    let owner = UsersService::new(state.pool.clone())
        .find_one_by_id(id)
        .await?;
    let items = ItemsService::new(state.pool.clone())
        .find_all(&owner, page, params.search_term())
        .await?;
    Ok(ApiResponse::success(items))
}

/// GET /api/users/:id/lists - another user's lists, admin only
pub async fn lists(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<List>> {
    require_roles(&user, ADMIN_ONLY)?;
    let page = params.pagination()?;
    let owner = UsersService::new(state.pool.clone())
        .find_one_by_id(id)
        .await?;
    let lists = ListsService::new(state.pool.clone())
        .find_all(&owner, page, params.search_term())
        .await?;
    Ok(ApiResponse::success(lists))
}

/// GET /api/users/:id/item-count
pub async fn item_count(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<i64> {
    require_roles(&user, ADMIN_ONLY)?;
    let owner = UsersService::new(state.pool.clone())
        .find_one_by_id(id)
        .await?;
    let count = ItemsService::new(state.pool.clone())
        .count_by_user(owner.id)
        .await?;
    Ok(ApiResponse::success(count))
}

/// GET /api/users/:id/list-count
pub async fn list_count(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<i64> {
    require_roles(&user, ADMIN_ONLY)?;
    let owner = UsersService::new(state.pool.clone())
        .find_one_by_id(id)
        .await?;
    let count = ListsService::new(state.pool.clone())
        .count_by_user(owner.id)
        .await?;
    Ok(ApiResponse::success(count))
}
