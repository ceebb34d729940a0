use actix_web::{web, HttpResponse};

use mt_core::repositories::OtpStore;
use mt_core::services::otp::SmsDispatcher;

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports liveness and the configured providers. Nothing is probed.
pub async fn health_check<S, D>(state: web::Data<AppState<S, D>>) -> HttpResponse
where
    S: OtpStore + 'static,
    D: SmsDispatcher + 'static,
{
    HttpResponse::Ok().json(state.status.health())
}
