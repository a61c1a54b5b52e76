use axum::{extract::Extension, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::account_service;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub name: Option<String>,
}

/// POST /accounts - idempotent first-sign-in insert, keyed by email. New
/// accounts start as members; role changes go through the admin route.
pub async fn sign_in(
    Extension(pool): Extension<PgPool>,
    Json(body): Json<SignInRequest>,
) -> ApiResult<Value> {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::validation_error("a valid email is required"));
    }

    match account_service::ensure(&pool, email, body.name.as_deref()).await? {
        Some(id) => Ok(ApiResponse::created(json!({ "insertedId": id }))),
        None => Ok(ApiResponse::success(json!({
            "message": "account already exists",
            "insertedId": null
        }))),
    }
}
