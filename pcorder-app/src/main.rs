use anyhow::Context;
use pcorder_app::{logging, session, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    logging::init(&config.logging);

    tracing::info!("Starting pcorder session");
    let outcome = session::run(&config).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
