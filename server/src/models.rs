use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const SUBJECT_MIN: usize = 3;
pub const SUBJECT_MAX: usize = 200;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 5000;

/// Raw request body, straight off the wire. Nothing in here is trusted
/// until it has been through [`validate`].
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,

    #[serde(default)]
    pub honeypot: Option<String>,
    #[serde(default, rename = "submissionTime")]
    pub submission_time: Option<i64>,
    #[serde(default, rename = "recaptchaToken")]
    pub recaptcha_token: Option<String>,
}

/// A submission that passed schema validation: trimmed fields, lowercased
/// email, lengths within range.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Persisted shape. `created_at` is assigned when the record is built for
/// storage, not when the request arrived.
#[derive(Debug, Serialize)]
pub struct StoredSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl StoredSubmission {
    pub fn record(submission: &ContactSubmission) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.clone(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Field-level validation detail. Logged server-side only; the response
/// carries the generic invalid-input message regardless of which rule
/// tripped.
#[derive(Debug, PartialEq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub reason: &'static str,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

pub fn validate(payload: &ContactPayload) -> Result<ContactSubmission, ValidationIssue> {
    let name = payload.name.trim();
    if !(NAME_MIN..=NAME_MAX).contains(&name.chars().count()) {
        return Err(ValidationIssue {
            field: "name",
            reason: "length out of range",
        });
    }

    let email = payload.email.trim().to_lowercase();
    if email.len() > EMAIL_MAX || !is_valid_email(&email) {
        return Err(ValidationIssue {
            field: "email",
            reason: "malformed address",
        });
    }

    let subject = payload.subject.trim();
    if !(SUBJECT_MIN..=SUBJECT_MAX).contains(&subject.chars().count()) {
        return Err(ValidationIssue {
            field: "subject",
            reason: "length out of range",
        });
    }

    let message = payload.message.trim();
    if !(MESSAGE_MIN..=MESSAGE_MAX).contains(&message.chars().count()) {
        return Err(ValidationIssue {
            field: "message",
            reason: "length out of range",
        });
    }

    Ok(ContactSubmission {
        name: name.to_string(),
        email,
        subject: subject.to_string(),
        message: message.to_string(),
    })
}

pub fn is_valid_email(email: &str) -> bool {
    let syntax = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    syntax.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, subject: &str, message: &str) -> ContactPayload {
        ContactPayload {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            honeypot: None,
            submission_time: None,
            recaptcha_token: None,
        }
    }

    #[test]
    fn test_accepts_minimal_valid_submission() {
        let result = validate(&payload("Jo", "jo@x.com", "Hi!", "Interested in a site"));

        assert!(result.is_ok());
    }

    #[test]
    fn test_trims_and_lowercases() {
        let submission = validate(&payload(
            "  Ada Lovelace  ",
            "  Ada@Example.COM ",
            " Project Inquiry ",
            "  I would like a new site built.  ",
        ))
        .unwrap();

        assert_eq!(submission.name, "Ada Lovelace");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.subject, "Project Inquiry");
        assert_eq!(submission.message, "I would like a new site built.");
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(validate(&payload("J", "jo@x.com", "Hi!", "Interested in a site")).is_err());
        assert!(validate(&payload("Jo", "jo@x.com", "Hi!", "Interested in a site")).is_ok());

        let long = "x".repeat(101);
        assert!(validate(&payload(&long, "jo@x.com", "Hi!", "Interested in a site")).is_err());
        assert!(
            validate(&payload(&long[..100], "jo@x.com", "Hi!", "Interested in a site")).is_ok()
        );
    }

    #[test]
    fn test_subject_length_bounds() {
        assert!(validate(&payload("Jo", "jo@x.com", "Hi", "Interested in a site")).is_err());
        assert!(validate(&payload("Jo", "jo@x.com", "Hi!", "Interested in a site")).is_ok());

        let long = "s".repeat(201);
        assert!(validate(&payload("Jo", "jo@x.com", &long, "Interested in a site")).is_err());
    }

    #[test]
    fn test_message_length_bounds() {
        assert!(validate(&payload("Jo", "jo@x.com", "Hi!", "short")).is_err());
        assert!(validate(&payload("Jo", "jo@x.com", "Hi!", "0123456789")).is_ok());

        let long = "m".repeat(5001);
        assert!(validate(&payload("Jo", "jo@x.com", "Hi!", &long)).is_err());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // Two chars, six bytes.
        assert!(validate(&payload("日本", "jo@x.com", "Hi!", "Interested in a site")).is_ok());
    }

    #[test]
    fn test_rejects_malformed_emails() {
        for email in ["plain", "no@tld", "two@@x.com", "spaces in@x.com", "@x.com"] {
            let result = validate(&payload("Jo", email, "Hi!", "Interested in a site"));
            assert!(result.is_err(), "accepted {email}");
            assert_eq!(result.unwrap_err().field, "email");
        }
    }

    #[test]
    fn test_rejects_overlong_email() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(validate(&payload("Jo", &email, "Hi!", "Interested in a site")).is_err());
    }

    #[test]
    fn test_whitespace_only_fields_rejected() {
        assert!(validate(&payload("   ", "jo@x.com", "Hi!", "Interested in a site")).is_err());
        assert!(validate(&payload("Jo", "jo@x.com", "   ", "Interested in a site")).is_err());
        assert!(validate(&payload("Jo", "jo@x.com", "Hi!", "          ")).is_err());
    }
}
