//! DentoBridge lead capture server - main entry point.

use anyhow::Result;
use dentobridge_leads::{
    AppState, AsyncResendClient, Config, EmailSender, LeadService, Metrics, ResendClient,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Sending lead notifications through {} to {} recipient(s)",
        config.resend_api_url,
        config.mail.to.len()
    );

    let metrics = Metrics::new();
    let resend = ResendClient::new(&config, metrics.clone());
    let sender = Arc::new(AsyncResendClient::new(resend)) as Arc<dyn EmailSender>;
    let service = LeadService::new(sender, config.mail.clone(), metrics);

    let state = AppState::new(service, config.site_url.as_str());
    dentobridge_leads::server::run_server(state, &config.bind_address).await?;

    info!("Lead capture server shutdown complete");
    Ok(())
}
