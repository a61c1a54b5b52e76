use axum::extract::{Extension, Path};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Account;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::account_service;

/// GET /accounts - admin-gated listing
pub async fn list(Extension(pool): Extension<PgPool>) -> ApiResult<Vec<Account>> {
    let accounts = account_service::list(&pool).await?;
    Ok(ApiResponse::success(accounts))
}

/// GET /accounts/admin/:email - self-only admin flag. The path identity must
/// match the authenticated identity; the flag itself comes from the store.
pub async fn admin_flag(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Value> {
    if email != auth_user.email {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let account = account_service::find_by_email(&pool, &email).await?;
    let admin = account.map(|a| a.role.is_admin()).unwrap_or(false);

    Ok(ApiResponse::success(json!({ "admin": admin })))
}

/// PATCH /accounts/admin/:id - admin-gated promotion of another account
pub async fn promote(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let modified = account_service::promote_to_admin(&pool, id).await?;
    if modified == 0 {
        return Err(ApiError::not_found(format!("account {} not found", id)));
    }

    Ok(ApiResponse::success(json!({ "modifiedCount": modified })))
}

/// DELETE /accounts/:id - admin-gated
pub async fn remove(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let deleted = account_service::delete(&pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found(format!("account {} not found", id)));
    }

    Ok(ApiResponse::success(json!({ "deletedCount": deleted })))
}
