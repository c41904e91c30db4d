#[tokio::main]
async fn main() {
    autosite_backend::run().await;
}
