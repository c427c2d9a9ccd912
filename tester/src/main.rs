use std::time::Duration;

use starfall_client::ContactForm;

#[tokio::main]
async fn main() {
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:1111/contact".to_string());

    let mut form = ContactForm::new(&endpoint, "254700000000");
    form.set_name("Ada Tester");
    form.set_email("ada@example.com");
    form.set_subject("Tester run");
    form.set_message("Checking the contact intake pipeline end to end.");

    // Submitting immediately would trip the server's timing gate.
    println!("Waiting out the minimum fill time...");
    tokio::time::sleep(Duration::from_millis(3100)).await;

    println!("Posting to {endpoint}");
    let outcome = form.submit().await;
    println!("Outcome: {outcome:?}");
}
