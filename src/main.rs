use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use barberyass::config::AppConfig;
use barberyass::db;
use barberyass::handlers;
use barberyass::services::notify::WhatsAppLink;
use barberyass::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let notifier = WhatsAppLink::new(config.staff_whatsapp.clone());

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        notifier: Box::new(notifier),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/slots", get(handlers::slots::list_open))
        .route("/api/slots/day", get(handlers::slots::day_view))
        .route("/api/slots/toggle", post(handlers::slots::toggle))
        .route("/api/bookings", post(handlers::bookings::create))
        .route("/api/bookings/mine", get(handlers::bookings::mine))
        .route(
            "/api/admin/bookings",
            get(handlers::bookings::list_all).post(handlers::bookings::create_manual),
        )
        .route(
            "/api/admin/bookings/:id/cancel",
            post(handlers::bookings::cancel),
        )
        .route(
            "/api/admin/bookings/:id/complete",
            post(handlers::bookings::complete),
        )
        .route(
            "/api/services",
            get(handlers::services::list).post(handlers::services::create),
        )
        .route(
            "/api/services/:id",
            put(handlers::services::update).delete(handlers::services::remove),
        )
        .route(
            "/api/admin/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/api/admin/users/:id/role", post(handlers::users::set_role))
        .route(
            "/api/admin/users/:id/deposit",
            post(handlers::users::toggle_deposit),
        )
        .route("/api/admin/users/:id", delete(handlers::users::remove))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
