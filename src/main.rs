use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod query;
mod services;
mod state;

use middleware::jwt_auth_middleware;
use state::AppState;

#[derive(Parser)]
#[command(name = "listkeeper-api")]
#[command(about = "List keeping backend - users, items, lists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Reset the database and load sample data")]
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = config::config();
    tracing::info!("Starting listkeeper-api in {:?} mode", config.environment);

    let pool = db::connect().await?;
    db::init_schema(&pool).await?;
    let state = AppState { pool };

    match cli.command {
        Some(Commands::Seed) => {
            services::seed::SeedService::new(state.pool.clone())
                .execute()
                .await?;
            println!("Database seeded");
            Ok(())
        }
        Some(Commands::Serve { port }) => serve(state, port).await,
        None => serve(state, None).await,
    }
}

async fn serve(state: AppState, port_override: Option<u16>) -> anyhow::Result<()> {
    let app = app(state);

    // PORT from the environment is already resolved into the config.
    let port = port_override.unwrap_or_else(|| config::config().server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/seed", post(handlers::seed::run))
        .merge(protected_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Everything behind the bearer-token middleware. Route-level gating beyond
/// "authenticated" (admin endpoints, owner scoping) happens in the handlers.
fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::{items, list_items, lists, users};

    Router::new()
        .route("/auth/revalidate", get(handlers::auth::revalidate))
        .route("/api/items", get(items::list).post(items::create))
        .route(
            "/api/items/:id",
            get(items::get_one)
                .patch(items::update)
                .delete(items::remove),
        )
        .route("/api/lists", get(lists::list).post(lists::create))
        .route(
            "/api/lists/:id",
            get(lists::get_one)
                .patch(lists::update)
                .delete(lists::remove),
        )
        .route("/api/lists/:id/items", get(lists::list_items))
        .route("/api/lists/:id/item-count", get(lists::item_count))
        .route("/api/list-items", post(list_items::create))
        .route(
            "/api/list-items/:id",
            get(list_items::get_one)
                .patch(list_items::update)
                .delete(list_items::remove),
        )
        .route("/api/users", get(users::list))
        .route("/api/users/:id", get(users::get_one).patch(users::update))
        .route("/api/users/:id/block", post(users::block))
        .route("/api/users/:id/items", get(users::items))
        .route("/api/users/:id/lists", get(users::lists))
        .route("/api/users/:id/item-count", get(users::item_count))
        .route("/api/users/:id/list-count", get(users::list_count))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "listkeeper-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "auth": ["/auth/signup", "/auth/login", "/auth/revalidate"],
            "api": ["/api/items", "/api/lists", "/api/list-items", "/api/users"],
        }
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match db::health_check(&state.pool).await {
        Ok(()) => "ok",
        Err(_) => "unreachable",
    };
    Json(json!({ "status": "ok", "database": database }))
}
