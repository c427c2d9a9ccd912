use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::fallback::fallback_link;

pub const NAME_MIN: usize = 2;
pub const SUBJECT_MIN: usize = 3;
pub const MESSAGE_MIN: usize = 10;

/// What the visitor has typed so far. Raw values; trimming happens at
/// submit time.
#[derive(Debug, Default, Clone)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Wire body for the intake endpoint.
#[derive(Debug, Serialize)]
struct SubmissionRequest {
    name: String,
    email: String,
    subject: String,
    message: String,
    honeypot: String,
    #[serde(rename = "submissionTime")]
    submission_time: i64,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Accepted by the server; the draft has been cleared.
    Sent,
    /// A request is already outstanding; this click did nothing.
    AlreadySubmitting,
    /// Rejected locally before any network call.
    Invalid {
        field: &'static str,
        message: &'static str,
    },
    /// Transport failure or a non-success response. `fallback` is a
    /// direct-message link pre-filled from the draft, built without
    /// touching the network.
    Failed { fallback: String },
}

pub struct ContactForm {
    endpoint: String,
    fallback_number: String,
    client: reqwest::Client,
    draft: Draft,
    honeypot: String,
    rendered_at_ms: i64,
    submitting: bool,
}

impl ContactForm {
    pub fn new(endpoint: impl Into<String>, fallback_number: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fallback_number: fallback_number.into(),
            client: reqwest::Client::new(),
            draft: Draft::default(),
            honeypot: String::new(),
            rendered_at_ms: Utc::now().timestamp_millis(),
            submitting: false,
        }
    }

    pub fn set_name(&mut self, value: &str) {
        self.draft.name = value.to_string();
    }

    pub fn set_email(&mut self, value: &str) {
        self.draft.email = value.to_string();
    }

    pub fn set_subject(&mut self, value: &str) {
        self.draft.subject = value.to_string();
    }

    pub fn set_message(&mut self, value: &str) {
        self.draft.message = value.to_string();
    }

    /// The hidden field. Humans never see it; automated form-fillers
    /// populate it and mark themselves in the process.
    pub fn set_honeypot(&mut self, value: &str) {
        self.honeypot = value.to_string();
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn local_validation(draft: &Draft) -> Option<(&'static str, &'static str)> {
        if draft.name.chars().count() < NAME_MIN {
            return Some(("name", "Name is too short."));
        }
        if draft.subject.chars().count() < SUBJECT_MIN {
            return Some(("subject", "Subject is too short."));
        }
        if draft.message.chars().count() < MESSAGE_MIN {
            return Some(("message", "Message is too short."));
        }
        None
    }

    /// One network attempt per call, and at most one call in flight.
    pub async fn submit(&mut self) -> Outcome {
        if self.submitting {
            return Outcome::AlreadySubmitting;
        }

        let mut draft = self.draft.clone();
        draft.name = draft.name.trim().to_string();
        draft.email = draft.email.trim().to_string();
        draft.subject = draft.subject.trim().to_string();
        draft.message = draft.message.trim().to_string();

        if let Some((field, message)) = Self::local_validation(&draft) {
            return Outcome::Invalid { field, message };
        }

        self.submitting = true;

        let request = SubmissionRequest {
            name: draft.name.clone(),
            email: draft.email.clone(),
            subject: draft.subject.clone(),
            message: draft.message.clone(),
            honeypot: self.honeypot.clone(),
            submission_time: self.rendered_at_ms,
        };

        let result = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await;

        self.submitting = false;

        match result {
            Ok(response) if response.status().is_success() => {
                self.draft = Draft::default();
                self.honeypot.clear();
                // A repeat submission gets measured from a fresh baseline.
                self.rendered_at_ms = Utc::now().timestamp_millis();
                Outcome::Sent
            }
            Ok(response) => {
                warn!("Contact endpoint rejected submission: {}", response.status());
                Outcome::Failed {
                    fallback: fallback_link(&self.fallback_number, &draft),
                }
            }
            Err(e) => {
                warn!("Contact request failed: {e}");
                Outcome::Failed {
                    fallback: fallback_link(&self.fallback_number, &draft),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form(endpoint: &str) -> ContactForm {
        let mut form = ContactForm::new(endpoint, "254700000000");
        form.set_name("Ada Lovelace");
        form.set_email("ada@example.com");
        form.set_subject("Project Inquiry");
        form.set_message("I would like a new site built.");
        form
    }

    #[tokio::test]
    async fn test_local_rejection_is_field_specific() {
        let mut form = filled_form("http://127.0.0.1:1/contact");

        form.set_name("A");
        assert_eq!(
            form.submit().await,
            Outcome::Invalid {
                field: "name",
                message: "Name is too short."
            }
        );

        form.set_name("Ada");
        form.set_subject("Hi");
        assert_eq!(
            form.submit().await,
            Outcome::Invalid {
                field: "subject",
                message: "Subject is too short."
            }
        );

        form.set_subject("Hi there");
        form.set_message("short");
        assert_eq!(
            form.submit().await,
            Outcome::Invalid {
                field: "message",
                message: "Message is too short."
            }
        );
    }

    #[tokio::test]
    async fn test_whitespace_padding_rejected_locally() {
        let mut form = filled_form("http://127.0.0.1:1/contact");

        // Nine spaces around one char still trims to one char.
        form.set_name("    A    ");

        assert!(matches!(
            form.submit().await,
            Outcome::Invalid { field: "name", .. }
        ));
    }

    #[tokio::test]
    async fn test_second_click_while_outstanding_is_noop() {
        let mut form = filled_form("http://127.0.0.1:1/contact");
        form.submitting = true;

        assert_eq!(form.submit().await, Outcome::AlreadySubmitting);
    }

    #[tokio::test]
    async fn test_transport_failure_offers_fallback() {
        // Nothing listens on port 1; the connection is refused.
        let mut form = filled_form("http://127.0.0.1:1/contact");

        let outcome = form.submit().await;

        let Outcome::Failed { fallback } = outcome else {
            panic!("expected Failed, got {outcome:?}");
        };
        assert!(fallback.starts_with("https://wa.me/254700000000?text="));
        assert!(fallback.contains("Project%20Inquiry"));

        // The draft survives a failed attempt.
        assert_eq!(form.draft().name, "Ada Lovelace");
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_local_rejection_makes_no_network_attempt() {
        // An unroutable endpoint would hang or error; local validation
        // must return before it is ever touched.
        let mut form = ContactForm::new("http://[invalid", "254700000000");
        form.set_name("A");

        assert!(matches!(form.submit().await, Outcome::Invalid { .. }));
    }
}
