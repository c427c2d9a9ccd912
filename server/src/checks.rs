//! Bot gates, run in order after schema validation. Each gate either
//! passes the request through or ends it with a terminal response; the
//! cheap gates run first so the external verification call is only paid
//! for traffic that survived them.

use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    routes::accepted,
    verify::HumanVerifier,
};

/// A form filled out in under 3 seconds was not filled out by a human.
pub const MIN_FILL_MS: i64 = 3000;

/// Verification scores below this are treated as bot traffic.
pub const MIN_HUMAN_SCORE: f64 = 0.5;

/// Terminal outcome of a gate.
#[derive(Debug)]
pub enum Rejection {
    /// Bot traffic answered with the exact response shape of a genuine
    /// acceptance, so automated senders get no signal that they were
    /// caught. No downstream work happens.
    Disguise,
    /// A real rejection the caller is expected to see and act on.
    Reject(AppError),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::Disguise => accepted(),
            Rejection::Reject(error) => error.into_response(),
        }
    }
}

/// The honeypot field is invisible to humans and only ever filled by
/// automated form-fillers.
pub fn check_honeypot(honeypot: Option<&str>) -> Result<(), Rejection> {
    match honeypot {
        Some(value) if !value.is_empty() => {
            info!("Bot detected: honeypot field filled");
            Err(Rejection::Disguise)
        }
        _ => Ok(()),
    }
}

/// `rendered_at_ms` is the client-reported epoch-ms at which the form
/// became visible. Absent means the gate is skipped.
pub fn check_timing(rendered_at_ms: Option<i64>, now_ms: i64) -> Result<(), Rejection> {
    let Some(rendered_at_ms) = rendered_at_ms else {
        return Ok(());
    };

    let elapsed = now_ms - rendered_at_ms;
    if elapsed < MIN_FILL_MS {
        info!("Bot detected: form submitted too quickly ({elapsed}ms)");
        return Err(Rejection::Reject(AppError::TooFast));
    }

    Ok(())
}

/// Runs only when the client supplied a token AND a verifier is
/// configured; otherwise the gate is skipped. Transport errors count as
/// failed verification, so a broken verifier never waves traffic through.
pub async fn check_verification(
    verifier: Option<&dyn HumanVerifier>,
    token: Option<&str>,
) -> Result<(), Rejection> {
    let (Some(verifier), Some(token)) = (verifier, token) else {
        return Ok(());
    };

    match verifier.verify(token).await {
        Ok(outcome) if outcome.success && outcome.score >= MIN_HUMAN_SCORE => Ok(()),
        Ok(outcome) => {
            warn!(
                "Bot detected: verification rejected (success: {}, score: {})",
                outcome.success, outcome.score
            );
            Err(Rejection::Reject(AppError::VerificationFailed))
        }
        Err(e) => {
            error!("Verification request failed: {e}");
            Err(Rejection::Reject(AppError::VerificationFailed))
        }
    }
}
