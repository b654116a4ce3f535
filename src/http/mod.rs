//! HTTP surface
//!
//! JSON API over axum: nutrition lookup, body composition, BMI and the food
//! log.

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{delete, get, post},
    Router,
};
use tokio::signal::{self, ctrl_c};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::db::Database;
use crate::lookup::FoodSource;
use crate::tools::status::StatusTracker;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn FoodSource>,
    pub database: Database,
    pub status: Arc<Mutex<StatusTracker>>,
}

impl AppState {
    pub fn new(source: Arc<dyn FoodSource>, database: Database, status: StatusTracker) -> Self {
        Self {
            source,
            database,
            status: Arc::new(Mutex::new(status)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/nutrition/search", get(routes::nutrition_search_handler))
        .route("/api/body-composition", post(routes::body_composition_handler))
        .route("/api/bmi", post(routes::bmi_handler))
        .route("/api/food-log", post(routes::log_food_handler))
        .route("/api/food-log/{user_id}/{date}", get(routes::day_log_handler))
        .route("/api/food-log/entries/{id}", delete(routes::delete_entry_handler))
        .route("/api/status", get(routes::status_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM
pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let app = build_router(state);

    let address = format!("0.0.0.0:{port}");
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
