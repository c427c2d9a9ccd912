use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub notify_to: String,
    pub notify_from: String,
    pub resend_api_key: Option<String>,
    pub recaptcha_secret: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "1111"),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379"),
            notify_to: try_load("CONTACT_NOTIFY_TO", "hello@starfall.dev"),
            notify_from: try_load("CONTACT_NOTIFY_FROM", "Contact Form <onboarding@resend.dev>"),
            resend_api_key: read_optional_secret("RESEND_API_KEY"),
            recaptcha_secret: read_optional_secret("RECAPTCHA_SECRET"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Credentials are optional: the email provider and the verification
/// service are each disabled when their secret is absent. Docker secret
/// files take precedence over environment variables.
fn read_optional_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    if let Ok(contents) = read_to_string(&path) {
        let trimmed = contents.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    match env::var(secret_name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => {
            info!("{secret_name} not set");
            None
        }
    }
}
