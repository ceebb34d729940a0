use actix_web::{web, HttpResponse};

use mt_core::repositories::OtpStore;
use mt_core::services::otp::SmsDispatcher;

use crate::app::AppState;
use crate::dto::ProviderStatusResponse;

/// Handler for GET /api/v1/otp/providers
pub async fn provider_status<S, D>(state: web::Data<AppState<S, D>>) -> HttpResponse
where
    S: OtpStore + 'static,
    D: SmsDispatcher + 'static,
{
    HttpResponse::Ok().json(ProviderStatusResponse::from_statuses(
        state.status.provider_status(),
    ))
}
