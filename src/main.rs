use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use hrm_api::db::{self, AppState};
use hrm_api::handlers;
use hrm_api::middleware::browser_gate;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = hrm_api::config::config();
    tracing::info!("Starting HRM API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; authenticated routes will reject every token");
    }

    let pool = db::pool_from_env(&config.database).expect("database pool");
    let state = AppState { pool };

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 HRM API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::pages::root))
        .route("/health", get(handlers::pages::health))
        .merge(page_routes())
        // Auth (mixed public/protected)
        .merge(auth_routes())
        // Protected API
        .merge(employee_routes())
        .merge(contract_routes())
        .merge(leave_routes())
        .merge(payroll_routes())
        .merge(performance_routes())
        .merge(training_routes())
        .merge(dashboard_routes())
        // Global middleware
        .layer(middleware::from_fn(browser_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn page_routes() -> Router<AppState> {
    use hrm_api::handlers::pages;

    Router::new()
        .route("/auth/login", get(pages::login_page))
        .route("/auth/register", get(pages::register_page))
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use hrm_api::handlers::auth;

    Router::new()
        // Cookie session flow
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        // Bearer flow for non-browser clients
        .route("/api/auth/token", post(auth::token))
        .route("/api/auth/whoami", get(auth::whoami))
}

fn employee_routes() -> Router<AppState> {
    use hrm_api::handlers::employees;

    Router::new()
        .route("/api/employees", get(employees::list).post(employees::create))
        .route(
            "/api/employees/:id",
            axum::routing::put(employees::update).delete(employees::remove),
        )
}

fn contract_routes() -> Router<AppState> {
    use hrm_api::handlers::contracts;

    Router::new()
        .route("/api/contracts", get(contracts::list).post(contracts::create))
        .route(
            "/api/contracts/:id",
            axum::routing::put(contracts::update).delete(contracts::remove),
        )
}

fn leave_routes() -> Router<AppState> {
    use hrm_api::handlers::leaves;

    Router::new()
        .route("/api/leaves", get(leaves::list).post(leaves::create))
        .route(
            "/api/leaves/:id",
            axum::routing::put(leaves::update).delete(leaves::remove),
        )
}

fn payroll_routes() -> Router<AppState> {
    use hrm_api::handlers::payroll;

    Router::new()
        .route("/api/payroll", get(payroll::list).post(payroll::create))
        .route(
            "/api/payroll/:id",
            axum::routing::put(payroll::update).delete(payroll::remove),
        )
}

fn performance_routes() -> Router<AppState> {
    use hrm_api::handlers::performance;

    Router::new()
        .route(
            "/api/performance",
            get(performance::list).post(performance::create),
        )
        .route(
            "/api/performance/:id",
            axum::routing::put(performance::update).delete(performance::remove),
        )
}

fn training_routes() -> Router<AppState> {
    use hrm_api::handlers::training;

    Router::new()
        .route("/api/training", get(training::list).post(training::create))
        .route(
            "/api/training/:id",
            axum::routing::put(training::update).delete(training::remove),
        )
}

fn dashboard_routes() -> Router<AppState> {
    use hrm_api::handlers::dashboard;

    Router::new().route("/api/dashboard/overview", get(dashboard::overview))
}
