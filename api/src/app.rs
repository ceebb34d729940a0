//! Application state and factory
//!
//! This module holds the shared application state and builds the
//! Actix-web application around it.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpRequest, HttpResponse,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use mt_core::repositories::OtpStore;
use mt_core::services::otp::{OtpService, SmsDispatcher, StatusReporter};
use mt_shared::{ErrorCode, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::{RequestIdExt, RequestIdMiddleware};
use crate::routes::{
    health::health_check,
    otp::{provider_status, send_otp, verify_otp},
};

/// Application state that holds shared services
pub struct AppState<S, D>
where
    S: OtpStore,
    D: SmsDispatcher,
{
    pub otp_service: Arc<OtpService<S, D>>,
    pub status: StatusReporter,
}

impl<S, D> AppState<S, D>
where
    S: OtpStore,
    D: SmsDispatcher,
{
    pub fn new(otp_service: OtpService<S, D>, status: StatusReporter) -> Self {
        Self {
            otp_service: Arc::new(otp_service),
            status,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S, D>(
    app_state: web::Data<AppState<S, D>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
    D: SmsDispatcher + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        // Outermost, so the request ID exists before the logger runs
        .wrap(RequestIdMiddleware)
        .route("/health", web::get().to(health_check::<S, D>))
        .service(
            web::scope("/api/v1/otp")
                .route("/send", web::post().to(send_otp::<S, D>))
                .route("/verify", web::post().to(verify_otp::<S, D>))
                .route("/providers", web::get().to(provider_status::<S, D>)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new(
            ErrorCode::NotFound,
            "The requested resource was not found",
        )
        .with_request_id(req.request_id()),
    )
}
