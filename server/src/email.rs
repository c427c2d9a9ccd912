//! # Notification dispatch
//!
//! Relays an accepted submission to the site owner through the Resend
//! transactional email API. All four user-supplied fields are HTML
//! entity escaped before they touch the message body, and the reply
//! target is the submitter's address so the owner can answer directly.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::ContactSubmission;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub reply_to: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email provider request failed: {0}")]
    Transport(String),

    #[error("email provider returned status {status}")]
    Provider { status: u16 },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), MailError>;
}

pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
}

impl ResendMailer {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(notification)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !is_success_status(status) {
            let body = response.text().await.unwrap_or_default();
            error!("Email provider error: status {status}, body: {body}");
            return Err(MailError::Provider { status });
        }

        Ok(())
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

pub fn compose_notification(
    submission: &ContactSubmission,
    from: &str,
    to: &str,
) -> Notification {
    let html = format!(
        "<h2>New Contact Form Submission</h2>\
         <p><strong>From:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Subject:</strong> {}</p>\
         <hr />\
         <h3>Message:</h3>\
         <p>{}</p>",
        escape_html(&submission.name),
        escape_html(&submission.email),
        escape_html(&submission.subject),
        escape_html(&submission.message).replace('\n', "<br>"),
    );

    Notification {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject: format!("New Contact: {}", escape_html(&submission.subject)),
        html,
        reply_to: submission.email.clone(),
    }
}
