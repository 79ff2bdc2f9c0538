//! Shared plumbing for the delegated signing tools.

pub mod args;
pub mod rpc;

use anyhow::{bail, Result};
use tracing::debug;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();
}

/// Load environment variables from a `.env` file if present.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }
    Ok(())
}
