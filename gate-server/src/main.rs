use anyhow::Result;
use gate_core::GateConfig;
use gate_server::{build, ENV_PREFIX};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = GateConfig::from_env(ENV_PREFIX);
    let (app, settings) = build(&config).await?;

    tracing::info!(
        version = %settings.service_version,
        max_upload_bytes = settings.max_upload_bytes,
        "starting mediagate"
    );

    app.listen(settings.addr()).await
}
