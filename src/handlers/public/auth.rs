use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::middleware::{ApiResponse, ApiResult};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /auth/token - issue a signed bearer token for the supplied identity.
/// Tokens carry identity only and expire after the configured window (1h).
pub async fn issue_token(Json(body): Json<TokenRequest>) -> ApiResult<Value> {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::validation_error("a valid email is required"));
    }

    let claims = Claims::new(email.to_string());
    let token = auth::generate_token(&claims)?;

    Ok(ApiResponse::success(json!({ "token": token })))
}
