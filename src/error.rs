// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (state-transition guard violated)
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (card gateway issues)
    BadGateway(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::ValidationError(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Log the real error but return a generic message
        tracing::error!("database error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::ConfigMissing(_) => {
                tracing::error!("database configuration missing: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => sqlx_err.into(),
        }
    }
}

impl From<crate::auth::TokenError> for ApiError {
    fn from(err: crate::auth::TokenError) -> Self {
        match err {
            crate::auth::TokenError::Invalid(msg) => {
                ApiError::unauthorized(format!("invalid token: {}", msg))
            }
            crate::auth::TokenError::MissingSecret => {
                tracing::error!("ACCESS_TOKEN_SECRET is not configured");
                ApiError::internal_server_error("Token service unavailable")
            }
            crate::auth::TokenError::Generation(msg) => {
                tracing::error!("token generation failed: {}", msg);
                ApiError::internal_server_error("Token service unavailable")
            }
        }
    }
}

impl From<crate::services::offer_service::OfferError> for ApiError {
    fn from(err: crate::services::offer_service::OfferError) -> Self {
        use crate::services::offer_service::OfferError;
        match err {
            OfferError::PropertyNotFound(id) => {
                ApiError::not_found(format!("property {} not found", id))
            }
            OfferError::OfferNotFound(id) => ApiError::not_found(format!("offer {} not found", id)),
            OfferError::AlreadyBought => {
                ApiError::conflict("property already bought".to_string())
            }
            OfferError::NotPending(status) => ApiError::conflict(format!(
                "offer is {} and can no longer transition",
                status
            )),
            OfferError::MissingTransactionRef => {
                ApiError::validation_error("transactionId is required to mark as bought")
            }
            OfferError::Database(e) => e.into(),
        }
    }
}

impl From<crate::services::payment_service::PaymentError> for ApiError {
    fn from(err: crate::services::payment_service::PaymentError) -> Self {
        use crate::services::payment_service::PaymentError;
        match err {
            PaymentError::CleanupIncomplete { payment_id, source } => {
                // Partial success: the payment is durably recorded but its cart
                // entries were not removed. The caller must retry or reconcile.
                tracing::error!(
                    "payment {} recorded but cart cleanup failed: {}",
                    payment_id,
                    source
                );
                ApiError::internal_server_error(format!(
                    "payment {} recorded but cart cleanup incomplete; retry to reconcile",
                    payment_id
                ))
            }
            PaymentError::Database(e) => e.into(),
        }
    }
}

impl From<crate::services::gateway::GatewayError> for ApiError {
    fn from(err: crate::services::gateway::GatewayError) -> Self {
        use crate::services::gateway::GatewayError;
        match err {
            GatewayError::MissingSecret => {
                tracing::error!("card gateway secret key is not configured");
                ApiError::bad_gateway("Payment gateway unavailable")
            }
            GatewayError::Rejected { status, body } => {
                tracing::error!("card gateway rejected request ({}): {}", status, body);
                ApiError::bad_gateway("Payment gateway rejected the request")
            }
            GatewayError::Http(e) => {
                tracing::error!("card gateway request failed: {}", e);
                ApiError::bad_gateway("Payment gateway unavailable")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::forbidden("x").status_code(), 403);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::validation_error("x").status_code(), 400);
        assert_eq!(ApiError::conflict("x").status_code(), 409);
        assert_eq!(ApiError::internal_server_error("x").status_code(), 500);
        assert_eq!(ApiError::bad_gateway("x").status_code(), 502);
    }

    #[test]
    fn json_body_carries_message_and_code() {
        let body = ApiError::forbidden("forbidden access").to_json();
        assert_eq!(body["message"], "forbidden access");
        assert_eq!(body["code"], "FORBIDDEN");
        assert_eq!(body["error"], true);
    }
}
