use urlencoding::encode;

use crate::form::Draft;

/// Direct-message link used when the intake endpoint is unreachable or
/// rejects the submission. Built entirely from the local draft so it
/// works even when the network call never happened.
pub fn fallback_link(number: &str, draft: &Draft) -> String {
    let text = format!(
        "Hi, I'm {} ({}). {}: {}",
        draft.name, draft.email, draft.subject, draft.message
    );

    format!("https://wa.me/{number}?text={}", encode(&text))
}
