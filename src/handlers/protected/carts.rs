use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::CartEntry;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: Option<String>,
}

/// GET /carts?email= - the caller's own cart. A mismatched email is a
/// privilege violation, same rule as the other self-only routes.
pub async fn list(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<CartQuery>,
) -> ApiResult<Vec<CartEntry>> {
    if let Some(email) = query.email.as_deref() {
        if email != auth_user.email {
            return Err(ApiError::forbidden("forbidden access"));
        }
    }

    let entries = sqlx::query_as::<_, CartEntry>(
        "SELECT * FROM carts WHERE email = $1 ORDER BY created_at",
    )
    .bind(&auth_user.email)
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(entries))
}

/// GET /carts/:id - lookup by referenced catalog item id ("is this item in
/// my cart"), mirroring the selection check the client makes.
pub async fn get_by_item(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Path(item_id): Path<Uuid>,
) -> ApiResult<Option<CartEntry>> {
    let entry = sqlx::query_as::<_, CartEntry>(
        "SELECT * FROM carts WHERE item_id = $1 AND email = $2",
    )
    .bind(item_id)
    .bind(&auth_user.email)
    .fetch_optional(&pool)
    .await?;

    Ok(ApiResponse::success(entry))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartEntry {
    pub item_id: Uuid,
}

/// POST /carts
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<NewCartEntry>,
) -> ApiResult<CartEntry> {
    let entry = sqlx::query_as::<_, CartEntry>(
        "INSERT INTO carts (email, item_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(&auth_user.email)
    .bind(body.item_id)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created(entry))
}

/// DELETE /carts/:id - owner only
pub async fn remove(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let result = sqlx::query("DELETE FROM carts WHERE id = $1 AND email = $2")
        .bind(id)
        .bind(&auth_user.email)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found(format!("cart entry {} not found", id)));
    }

    Ok(ApiResponse::success(json!({ "deletedCount": result.rows_affected() })))
}
