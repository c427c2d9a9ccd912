//! # Starfall Contact Intake
//!
//! Backend for the portfolio site's contact form. One job: take an
//! untrusted form submission, validate it, run the bot gates, save a
//! copy, and relay it by email.
//!
//! # Pipeline
//!
//! `POST /contact` runs every request through the same ordered stages:
//!
//! 1. Schema validation (field lengths, email syntax)
//! 2. Honeypot gate (answered with a fake success, no side effects)
//! 3. Timing gate (forms filled in under 3 seconds are not humans)
//! 4. Optional verification gate (external human-scoring service)
//! 5. Best-effort persistence (Redis, failures logged and swallowed)
//! 6. Notification dispatch (transactional email, failures are fatal)
//!
//! The caller only ever sees `{"success": true}` or `{"error": "..."}`
//! with a generic message. Validator output, provider responses, and
//! storage errors stay in the logs.
//!
//! # Configuration
//!
//! Environment variables with logged defaults (`RUST_PORT`, `REDIS_URL`,
//! `CONTACT_NOTIFY_TO`, `CONTACT_NOTIFY_FROM`), plus two optional
//! credentials read from `/run/secrets/` or the environment
//! (`RESEND_API_KEY`, `RECAPTCHA_SECRET`). A missing credential disables
//! the corresponding collaborator rather than failing startup.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=info cargo run -p starfall-server
//! ```

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod checks;
pub mod config;
pub mod database;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod verify;

use routes::{contact_handler, health_handler};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

pub fn router(state: Arc<AppState>) -> Router {
    // The intake contract pins the preflight allow list: browser clients
    // send authorization/x-client-info/apikey alongside the JSON body.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/contact", post(contact_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
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
