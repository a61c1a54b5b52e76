use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Property;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::offer_service::OfferService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub transaction_id: Option<String>,
}

/// PATCH /properties/buy/:id - the canonical buy route. Marks the property
/// bought exactly once, recording the transaction reference; a repeat (or a
/// losing concurrent buyer) gets 409 and the first reference stands.
pub async fn buy(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
    Json(body): Json<BuyRequest>,
) -> ApiResult<Property> {
    let transaction_id = body
        .transaction_id
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation_error("transactionId is required"))?;

    let property = OfferService::new(pool).buy_property(id, transaction_id).await?;

    Ok(ApiResponse::success(property))
}
