use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mt_core::repositories::OtpStore;
use mt_core::services::otp::SmsDispatcher;
use mt_shared::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::RequestIdExt;

/// Handler for POST /api/v1/otp/verify
///
/// # Request Body
///
/// ```json
/// {
///     "phoneNumber": "+255712345678",
///     "otp": "123456"
/// }
/// ```
///
/// ## Errors
/// - 400 `invalid-argument` for missing fields or a wrong code
/// - 404 `not-found` when no passcode is outstanding
/// - 504 `deadline-exceeded` when the passcode expired
/// - 409 `already-exists` when the passcode was already used
/// - 429 `resource-exhausted` after too many wrong codes
pub async fn verify_otp<S, D>(
    req: HttpRequest,
    state: web::Data<AppState<S, D>>,
    body: web::Json<VerifyOtpRequest>,
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
        "Processing OTP verify request"
    );

    match state
        .otp_service
        .verify(&request.phone_number, &request.otp)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(VerifyOtpResponse {
            success: true,
            message: result.message,
            timestamp: result.verified_at,
        }),
        Err(error) => domain_error_response(&error, &request_id),
    }
}
