//! Mapping of domain errors to HTTP responses
//!
//! Every failure leaves the API as an [`ErrorResponse`] whose `code` is one
//! of the stable error codes, with the HTTP status derived from that code.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use mt_core::errors::DomainError;
use mt_shared::{ErrorCode, ErrorResponse};

use crate::middleware::RequestIdExt;

/// HTTP status for an error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::AlreadyExists => StatusCode::CONFLICT,
        ErrorCode::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the standard error response.
///
/// Internal details stay in the logs; the body carries the user message.
pub fn domain_error_response(error: &DomainError, request_id: &str) -> HttpResponse {
    let code = error.code();
    if code == ErrorCode::Internal {
        tracing::error!(
            request_id = %request_id,
            code = %code,
            error = %error,
            event = "request_failed",
            "Request failed"
        );
    } else {
        tracing::warn!(
            request_id = %request_id,
            code = %code,
            error = %error,
            event = "request_rejected",
            "Request rejected"
        );
    }

    HttpResponse::build(status_for(code))
        .json(ErrorResponse::new(code, error.user_message()).with_request_id(request_id))
}

/// Convert request validation failures into an `invalid-argument` response
pub fn validation_error_response(errors: &ValidationErrors, request_id: &str) -> HttpResponse {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request data".to_string());

    tracing::warn!(
        request_id = %request_id,
        fields = ?errors.field_errors().keys().collect::<Vec<_>>(),
        event = "request_validation_failed",
        "Request validation failed"
    );

    HttpResponse::BadRequest().json(
        ErrorResponse::new(ErrorCode::InvalidArgument, message).with_request_id(request_id),
    )
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let request_id = req.request_id();
    tracing::warn!(
        request_id = %request_id,
        error = %err,
        event = "invalid_request_body",
        "Rejected malformed request body"
    );

    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(ErrorCode::InvalidArgument, "Invalid request body")
            .with_request_id(request_id),
    );
    actix_web::error::InternalError::from_response(err, response).into()
}
