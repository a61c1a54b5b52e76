use axum::extract::Extension;
use sqlx::PgPool;

use crate::database::models::MenuItem;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /menu - public catalog listing
pub async fn list(Extension(pool): Extension<PgPool>) -> ApiResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items ORDER BY created_at")
        .fetch_all(&pool)
        .await?;

    Ok(ApiResponse::success(items))
}
