//! # Starfall contact form client
//!
//! The submission side of the contact pipeline: draft state, cheap local
//! validation before any network round trip, anti-automation signals
//! (honeypot passthrough, time-since-render), a single-flight POST to
//! the intake endpoint, and an out-of-band fallback link for when the
//! endpoint is unreachable.

pub mod fallback;
pub mod form;

pub use form::{ContactForm, Draft, Outcome};
