use axum::extract::{Extension, Path};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Property;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /properties - public listing
pub async fn list(Extension(pool): Extension<PgPool>) -> ApiResult<Vec<Property>> {
    let properties =
        sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await?;

    Ok(ApiResponse::success(properties))
}

/// GET /properties/:id
pub async fn get(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> ApiResult<Property> {
    let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("property {} not found", id)))?;

    Ok(ApiResponse::success(property))
}
