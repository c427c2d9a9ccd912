use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tracing::{info, warn};

use crate::{
    config::Config,
    database::{RedisStore, SubmissionStore},
    email::{Mailer, ResendMailer},
    verify::{HumanVerifier, RecaptchaVerifier},
};

/// Bound on every outbound provider call. The form is interactive;
/// callers past this point are better served by the fallback channel.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn SubmissionStore>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub verifier: Option<Arc<dyn HumanVerifier>>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let http_client = Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .build()
            .expect("HTTP client misconfigured!");

        let store = RedisStore::connect(&config.redis_url).await;

        let mailer: Option<Arc<dyn Mailer>> = match &config.resend_api_key {
            Some(api_key) => Some(Arc::new(ResendMailer::new(
                http_client.clone(),
                api_key.clone(),
            ))),
            None => {
                warn!("Email provider not configured, notification dispatch will fail");
                None
            }
        };

        let verifier: Option<Arc<dyn HumanVerifier>> = match &config.recaptcha_secret {
            Some(secret) => Some(Arc::new(RecaptchaVerifier::new(
                http_client.clone(),
                secret.clone(),
            ))),
            None => {
                info!("Verification secret not set, human verification disabled");
                None
            }
        };

        Arc::new(Self {
            config,
            store: Arc::new(store),
            mailer,
            verifier,
        })
    }
}
