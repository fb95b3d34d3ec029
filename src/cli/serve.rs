use std::env;

use anyhow::Result;

use crate::api;
use crate::core::startup::startup;

pub async fn run(host: String, port: String) -> Result<()> {
    api::init_tracing();

    // A missing .env file is fine, the keys may already be in the
    // environment
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let (config, services) = startup(|key| env::var(key).ok())
        .await
        .inspect_err(|e| tracing::error!("{}", e))?;

    api::serve(host, port, config, services).await
}
