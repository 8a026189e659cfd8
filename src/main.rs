#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = learnly_api::run().await {
        eprintln!("learnly-api fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
