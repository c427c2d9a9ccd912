#[tokio::main]
async fn main() {
    starfall_server::start_server().await;
}
