use std::path::Path;

use artifact_lens::config::{AppConfig, DOTENV_FILE, EnvSource};
use artifact_lens::{server, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One source for log settings and app settings
    let source = EnvSource::load(Path::new(DOTENV_FILE))?;

    let _guard = telemetry::init_from_source(&source)?;
    let config = AppConfig::from_source(&source)?;

    tracing::info!(
        configured = config.is_configured(),
        bind = %config.bind,
        max_upload_bytes = config.max_upload_bytes,
        "starting artifact-lens"
    );

    server::serve(&config).await?;
    Ok(())
}
