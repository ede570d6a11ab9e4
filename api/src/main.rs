use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use cs_api::app::create_app;
use cs_api::routes::AppState;
use cs_core::{EnquiryService, EnquiryServiceConfig, OtpService, OtpSweeper, VerificationServiceConfig};
use cs_infra::{create_email_service, EmailDeliveryAdapter};
use cs_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );
    if !config.logging.timestamp {
        logger.format_timestamp(None);
    }
    logger.init();

    info!(
        "Starting CalmSpace API Server ({:?} environment)",
        config.environment
    );

    let email_service = Arc::new(EmailDeliveryAdapter::new(
        Arc::from(create_email_service(&config.email)),
        config.email.enquiry_recipient.clone(),
        config.email.enquiry_recipient_name.clone(),
    ));
    let email_provider = email_service.provider_name().to_string();
    info!("Email provider: {}", email_provider);

    let otp_service = Arc::new(OtpService::new(
        email_service.clone(),
        VerificationServiceConfig::from(&config.otp),
    ));
    let enquiry_service = Arc::new(EnquiryService::new(
        email_service,
        otp_service.clone(),
        EnquiryServiceConfig::from(&config.enquiry),
    ));

    let sweeper = Arc::new(OtpSweeper::new(otp_service.clone())).start_background_task();

    let app_state = web::Data::new(AppState {
        otp_service,
        enquiry_service,
        email_provider,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind to {}", bind_address))?
        .run()
        .await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }

    info!("CalmSpace API Server stopped");
    Ok(())
}
