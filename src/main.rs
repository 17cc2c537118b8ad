use std::error::Error;

use tracing::{Level, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    let dotenv = dotenvy::dotenv();

    ai_llm_service::telemetry::init("info", Level::INFO)?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => info!("no .env file; using process environment"),
        Err(e) => return Err(e.into()),
    }

    api::start().await?;

    Ok(())
}
