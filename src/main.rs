// src/main.rs
use wardrobe_client::start;

#[tokio::main]
async fn main() {
    start::run().await;
}
