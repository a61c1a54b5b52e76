use axum::{
    extract::{Extension, Path},
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::Payment;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::gateway::{PaymentGateway, PaymentIntent};
use crate::services::payment_service::{NewPayment, PaymentReceipt, PaymentService};

/// POST /payments - record a settled payment and cascade cart-entry removal.
/// Retrying the identical submission (same transactionId) is a no-op that
/// still completes any unfinished cleanup.
pub async fn record(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<NewPayment>,
) -> ApiResult<PaymentReceipt> {
    if body.transaction_id.trim().is_empty() {
        return Err(ApiError::validation_error("transactionId is required"));
    }
    if body.amount <= Decimal::ZERO {
        return Err(ApiError::validation_error("amount must be positive"));
    }

    let receipt = PaymentService::new(pool)
        .record(&auth_user.email, body)
        .await?;

    if receipt.duplicate {
        Ok(ApiResponse::success(receipt))
    } else {
        Ok(ApiResponse::created(receipt))
    }
}

/// GET /payments/:email - self-only payment history
pub async fn list_for(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Vec<Payment>> {
    if email != auth_user.email {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let payments = PaymentService::new(pool).list_by_payer(&email).await?;

    Ok(ApiResponse::success(payments))
}

#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub price: Decimal,
}

/// POST /payments/intent - ask the card gateway for a client secret
pub async fn create_intent(Json(body): Json<IntentRequest>) -> ApiResult<PaymentIntent> {
    if body.price <= Decimal::ZERO {
        return Err(ApiError::validation_error("price must be positive"));
    }

    let intent = PaymentGateway::new().create_intent(body.price).await?;

    Ok(ApiResponse::success(intent))
}
