#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vokabel_backend::run().await
}
