use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mt_core::repositories::OtpStore;
use mt_core::services::otp::SmsDispatcher;
use mt_shared::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::RequestIdExt;

/// Handler for POST /api/v1/otp/send
///
/// # Request Body
///
/// ```json
/// {
///     "phoneNumber": "+255712345678",
///     "customMessage": "optional replacement text"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "provider": "Beem",
///     "message": "OTP sent successfully via Beem SMS",
///     "timestamp": "2025-01-01T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `invalid-argument` for a missing or malformed phone number
/// - 500 `internal` when no provider delivered the SMS in time
pub async fn send_otp<S, D>(
    req: HttpRequest,
    state: web::Data<AppState<S, D>>,
    body: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    D: SmsDispatcher + 'static,
{
    let request_id = req.request_id();
    let request = body.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors, &request_id);
    }

    tracing::info!(
        request_id = %request_id,
        phone = %mask_phone_number(&request.phone_number),
        "Processing OTP send request"
    );

    match state
        .otp_service
        .issue(&request.phone_number, request.custom_message.as_deref())
        .await
    {
        Ok(result) => HttpResponse::Ok().json(SendOtpResponse {
            success: true,
            provider: result.provider_name,
            message: result.message,
            timestamp: result.issued_at,
        }),
        Err(error) => domain_error_response(&error, &request_id),
    }
}
