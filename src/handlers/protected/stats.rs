use axum::extract::Extension;
use sqlx::PgPool;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::stats_service::{AdminStats, CategoryStat, StatsService};

/// GET /admin-stats - aggregate counts and total revenue
pub async fn admin_stats(Extension(pool): Extension<PgPool>) -> ApiResult<AdminStats> {
    let stats = StatsService::new(pool).admin_stats().await?;
    Ok(ApiResponse::success(stats))
}

/// GET /order-stats - per-category order quantity and revenue
pub async fn order_stats(Extension(pool): Extension<PgPool>) -> ApiResult<Vec<CategoryStat>> {
    let stats = StatsService::new(pool).order_stats().await?;
    Ok(ApiResponse::success(stats))
}
