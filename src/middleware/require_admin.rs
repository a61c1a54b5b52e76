use axum::{extract::Request, middleware::Next, response::Response};
use sqlx::PgPool;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::services::account_service;

/// Privilege resolution middleware for admin routes. Runs after
/// `jwt_auth_middleware` and re-resolves the account's role from the store on
/// every request, so a demoted or deleted account loses admin access
/// immediately rather than at token expiry.
pub async fn require_admin_middleware(
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("authentication required before admin check"))?
        .clone();

    let pool = request
        .extensions()
        .get::<PgPool>()
        .ok_or_else(|| ApiError::internal_server_error("database pool not injected"))?
        .clone();

    let account = account_service::find_by_email(&pool, &auth_user.email).await?;

    let is_admin = account.map(|a| a.role.is_admin()).unwrap_or(false);
    if !is_admin {
        tracing::warn!("admin access denied for '{}'", auth_user.email);
        return Err(ApiError::forbidden("forbidden access"));
    }

    Ok(next.run(request).await)
}
