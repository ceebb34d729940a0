use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use mt_api::{create_app, telemetry::init_tracing, AppState};
use mt_core::repositories::{InMemoryOtpStore, OtpStore};
use mt_core::services::otp::{OtpService, OtpServiceConfig, StatusReporter};
use mt_infra::cache::RedisOtpStore;
use mt_infra::sms::CascadeSmsService;
use mt_shared::{AppConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    info!(
        environment = ?config.environment,
        store = ?config.store.backend,
        "Starting MtaaSuite OTP server"
    );

    let dispatcher = Arc::new(
        CascadeSmsService::from_config(&config.providers)
            .context("Failed to build SMS provider cascade")?,
    );
    info!(providers = ?dispatcher.provider_ids(), "SMS provider cascade ready");

    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory OTP store");
            serve(config, Arc::new(InMemoryOtpStore::new()), dispatcher).await
        }
        StoreBackend::Redis => {
            let store = RedisOtpStore::connect(config.store.clone())
                .await
                .context("Failed to connect to the Redis OTP store")?;
            serve(config, Arc::new(store), dispatcher).await
        }
    }
}

async fn serve<S>(
    config: AppConfig,
    store: Arc<S>,
    dispatcher: Arc<CascadeSmsService>,
) -> anyhow::Result<()>
where
    S: OtpStore + 'static,
{
    let otp_service = OtpService::new(store, dispatcher, OtpServiceConfig::from(&config.otp))
        .context("Invalid OTP configuration")?;
    let state = web::Data::new(AppState::new(
        otp_service,
        StatusReporter::new(&config.providers),
    ));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
