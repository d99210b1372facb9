use sqlx::PgPool;

/// Shared application state. The pool is the only resource shared across
/// requests; cloning is cheap (internally reference-counted).
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
