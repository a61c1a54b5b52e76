use axum::{extract::Extension, response::Json};
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::ContactMessage;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// POST /contact - all fields required
pub async fn submit(
    Extension(pool): Extension<PgPool>,
    Json(body): Json<ContactRequest>,
) -> ApiResult<ContactMessage> {
    let name = body.name.as_deref().map(str::trim).unwrap_or_default();
    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    let message = body.message.as_deref().map(str::trim).unwrap_or_default();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ApiError::validation_error("All fields are required."));
    }

    let saved = sqlx::query_as::<_, ContactMessage>(
        "INSERT INTO contact_messages (name, email, message) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(message)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created(saved))
}
