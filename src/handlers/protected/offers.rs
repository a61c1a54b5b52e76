use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Offer, OfferStatus};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::account_service;
use crate::services::offer_service::{NewOffer, OfferService};

/// POST /offers - any authenticated buyer; always created pending. The buyer
/// identity is the authenticated one, never taken from the body.
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<NewOffer>,
) -> ApiResult<Offer> {
    if body.buyer_name.trim().is_empty() {
        return Err(ApiError::validation_error("buyerName is required"));
    }
    if body.offered_amount <= Decimal::ZERO {
        return Err(ApiError::validation_error("offeredAmount must be positive"));
    }

    let offer = OfferService::new(pool)
        .create(&auth_user.email, body)
        .await?;

    Ok(ApiResponse::created(offer))
}

#[derive(Debug, Deserialize)]
pub struct OfferQuery {
    pub email: Option<String>,
}

/// GET /offers - own offers by default; other buyers' offers and the full
/// listing require admin.
pub async fn list(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<OfferQuery>,
) -> ApiResult<Vec<Offer>> {
    let service = OfferService::new(pool.clone());

    match query.email.as_deref() {
        Some(email) if email == auth_user.email => {
            Ok(ApiResponse::success(service.list_by_buyer(email).await?))
        }
        Some(email) => {
            require_admin(&pool, &auth_user).await?;
            Ok(ApiResponse::success(service.list_by_buyer(email).await?))
        }
        None => {
            require_admin(&pool, &auth_user).await?;
            Ok(ApiResponse::success(service.list_all().await?))
        }
    }
}

/// GET /offers/:id - the path id is a property reference; answers "the offer
/// on this property".
pub async fn get(
    Extension(pool): Extension<PgPool>,
    Path(property_id): Path<Uuid>,
) -> ApiResult<Offer> {
    let offer = OfferService::new(pool)
        .find_by_property(property_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("no offer found for property {}", property_id))
        })?;

    Ok(ApiResponse::success(offer))
}

/// DELETE /offers/:id - buyer or admin, and only while pending
pub async fn remove(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let service = OfferService::new(pool.clone());

    let offer = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("offer {} not found", id)))?;

    if offer.buyer_email != auth_user.email {
        require_admin(&pool, &auth_user).await?;
    }

    service.delete_pending(id).await?;

    Ok(ApiResponse::success(json!({ "deletedCount": 1 })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub status: OfferStatus,
    pub transaction_id: Option<String>,
}

/// PATCH /offers/:id/status - explicit offer transition, distinct from the
/// property buy route. pending -> bought requires a transaction reference;
/// pending -> rejected needs none. Terminal offers conflict.
pub async fn transition(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> ApiResult<Offer> {
    if body.status == OfferStatus::Pending {
        return Err(ApiError::validation_error(
            "status must be bought or rejected",
        ));
    }

    let service = OfferService::new(pool.clone());

    let offer = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("offer {} not found", id)))?;

    if offer.buyer_email != auth_user.email {
        require_admin(&pool, &auth_user).await?;
    }

    let updated = service
        .transition(id, body.status, body.transaction_id.as_deref())
        .await?;

    Ok(ApiResponse::success(updated))
}

/// Inline admin re-resolution for the owner-or-admin routes, same store
/// lookup the admin middleware performs.
async fn require_admin(pool: &PgPool, auth_user: &AuthUser) -> Result<(), ApiError> {
    let account = account_service::find_by_email(pool, &auth_user.email).await?;
    let is_admin = account.map(|a| a.role.is_admin()).unwrap_or(false);
    if !is_admin {
        return Err(ApiError::forbidden("forbidden access"));
    }
    Ok(())
}
