use axum::{extract::Extension, routing::get, Router};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod services;

use database::manager::DatabaseManager;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, ACCESS_TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    tracing::info!("Starting Estate API in {:?} mode", config.environment);

    // One pool for the process lifetime, injected into the router below.
    // Connections are lazy, so a down store leaves us degraded, not dead.
    let pool =
        DatabaseManager::init().unwrap_or_else(|e| panic!("failed to create database pool: {}", e));

    if let Err(e) = database::schema::bootstrap(&pool).await {
        tracing::warn!("schema bootstrap failed, store unreachable? {}", e);
    }

    let app = app(pool);

    // Allow tests or deployments to override port via env
    let port = std::env::var("ESTATE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5001);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Estate API server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    DatabaseManager::close().await;
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("install ctrl-c handler");
}

fn app(pool: PgPool) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Token-gated
        .merge(authenticated_routes())
        // Token- and role-gated
        .merge(admin_routes())
        // Global middleware; the Extension layer is outermost so the pool is
        // visible to the auth layers below
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(pool))
}

fn public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::{accounts, auth, contact, menu, properties, reviews};

    Router::new()
        .route("/auth/token", post(auth::issue_token))
        .route("/accounts", post(accounts::sign_in))
        .route("/menu", get(menu::list))
        .route("/properties", get(properties::list))
        .route("/properties/:id", get(properties::get))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/contact", post(contact::submit))
}

/// Routes behind the credential verifier only. Self-only identity checks
/// happen in the handlers, against the verified identity.
fn authenticated_routes() -> Router {
    use axum::routing::{patch, post};
    use handlers::protected::{accounts, carts, offers, payments, properties};

    Router::new()
        .route("/accounts/admin/:id", get(accounts::admin_flag))
        .route("/offers", get(offers::list).post(offers::create))
        .route("/offers/:id", get(offers::get).delete(offers::remove))
        .route("/offers/:id/status", patch(offers::transition))
        .route("/properties/buy/:id", patch(properties::buy))
        .route("/carts", get(carts::list).post(carts::create))
        .route("/carts/:id", get(carts::get_by_item).delete(carts::remove))
        .route("/payments", post(payments::record))
        .route("/payments/intent", post(payments::create_intent))
        .route("/payments/:email", get(payments::list_for))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

/// Admin routes: credential verification first, then per-request role
/// resolution from the account store.
fn admin_routes() -> Router {
    use axum::routing::{delete, patch, post};
    use handlers::protected::{accounts, menu, stats};

    Router::new()
        .route("/accounts", get(accounts::list))
        .route("/accounts/:id", delete(accounts::remove))
        .route("/accounts/admin/:id", patch(accounts::promote))
        .route("/menu", post(menu::create))
        .route("/menu/:id", patch(menu::update).delete(menu::remove))
        .route("/admin-stats", get(stats::admin_stats))
        .route("/order-stats", get(stats::order_stats))
        // Layer order: the last route_layer runs first, so the token is
        // verified before the role lookup
        .route_layer(axum::middleware::from_fn(
            middleware::require_admin_middleware,
        ))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Estate API",
            "version": version,
            "description": "Property marketplace backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/token (public - token acquisition)",
                "accounts": "/accounts[/:id], /accounts/admin/:id (mixed)",
                "catalog": "/menu[/:id] (public read, admin write)",
                "properties": "/properties[/:id], /properties/buy/:id (public read, authenticated buy)",
                "offers": "/offers[/:id][/status] (authenticated)",
                "carts": "/carts[/:id] (authenticated)",
                "payments": "/payments[/:email], /payments/intent (authenticated)",
                "stats": "/admin-stats, /order-stats (admin)",
            }
        }
    }))
}

async fn health(Extension(pool): Extension<PgPool>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
