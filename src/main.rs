use anyhow::{Context, Result};
use clap::Parser;
use sku_bundle_admin::{
    cli::{Args, CliApp},
    database::ApiClient,
    utils::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.env_file {
        dotenv::from_path(path)
            .with_context(|| format!("Failed to load env file {}", path.display()))?;
    }
    let config = Config::from_env().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if args.verbose { "debug" } else { config.log_level.as_str() };
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!config.is_production())
        .init();

    tracing::debug!(
        "Configuration loaded for {} environment ({} backend)",
        config.environment,
        config.backend_name()
    );

    if !config.use_mock_api {
        let api = ApiClient::from_url(&config.api_base_url, config.api_timeout)?;
        match api.health_check().await {
            Ok(true) => {}
            Ok(false) => tracing::warn!("API at {} is not healthy", api.base_url()),
            Err(e) => tracing::warn!("API at {} is unreachable: {}", api.base_url(), e),
        }
    }

    let app = CliApp::new(&config)?;
    app.run(args).await
}
