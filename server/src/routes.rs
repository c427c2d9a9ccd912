use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    checks::{check_honeypot, check_timing, check_verification},
    database::store_best_effort,
    email::compose_notification,
    error::AppError,
    models::{ContactPayload, validate},
    state::AppState,
};

/// The one success shape. The honeypot gate returns this exact response
/// for bot traffic, so it must not grow fields that reveal which path
/// produced it.
pub fn accepted() -> Response {
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        warn!("Rejected contact request: malformed body");
        return AppError::InvalidInput.into_response();
    };

    let submission = match validate(&payload) {
        Ok(submission) => submission,
        Err(issue) => {
            warn!("Validation error: {issue}");
            return AppError::InvalidInput.into_response();
        }
    };

    if let Err(rejection) = check_honeypot(payload.honeypot.as_deref()) {
        return rejection.into_response();
    }

    if let Err(rejection) = check_timing(payload.submission_time, Utc::now().timestamp_millis()) {
        return rejection.into_response();
    }

    if let Err(rejection) = check_verification(
        state.verifier.as_deref(),
        payload.recaptcha_token.as_deref(),
    )
    .await
    {
        return rejection.into_response();
    }

    info!("Received contact form submission from: {}", submission.email);

    store_best_effort(state.store.as_ref(), &submission).await;

    let Some(mailer) = &state.mailer else {
        error!("Notification dispatch unavailable: email provider not configured");
        return AppError::Dispatch.into_response();
    };

    let notification =
        compose_notification(&submission, &state.config.notify_from, &state.config.notify_to);

    if let Err(e) = mailer.send(&notification).await {
        error!("Email dispatch failed: {e}");
        return AppError::Dispatch.into_response();
    }

    accepted()
}
