//! Human-verification collaborator: exchanges a client-supplied token
//! for a confidence score via the reCAPTCHA siteverify endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

const SITEVERIFY_ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Debug, Deserialize)]
pub struct VerifyOutcome {
    pub success: bool,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Error)]
#[error("verification request failed: {0}")]
pub struct VerifyError(pub String);

#[async_trait]
pub trait HumanVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifyOutcome, VerifyError>;
}

pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: String,
}

impl RecaptchaVerifier {
    pub fn new(client: reqwest::Client, secret: String) -> Self {
        Self { client, secret }
    }
}

#[async_trait]
impl HumanVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<VerifyOutcome, VerifyError> {
        let response = self
            .client
            .post(SITEVERIFY_ENDPOINT)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| VerifyError(e.to_string()))?;

        response
            .json::<VerifyOutcome>()
            .await
            .map_err(|e| VerifyError(e.to_string()))
    }
}
