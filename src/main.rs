#[tokio::main]
async fn main() {
    registration_backend::run().await;
}
