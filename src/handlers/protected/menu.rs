use axum::{
    extract::{Extension, Path},
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::MenuItem;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRequest {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub recipe: Option<String>,
    pub image: Option<String>,
}

fn validate(body: &MenuItemRequest) -> Result<(), ApiError> {
    if body.name.trim().is_empty() || body.category.trim().is_empty() {
        return Err(ApiError::validation_error("name and category are required"));
    }
    if body.price < Decimal::ZERO {
        return Err(ApiError::validation_error("price must not be negative"));
    }
    Ok(())
}

/// POST /menu - admin-gated catalog insert
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Json(body): Json<MenuItemRequest>,
) -> ApiResult<MenuItem> {
    validate(&body)?;

    let item = sqlx::query_as::<_, MenuItem>(
        r#"
        INSERT INTO menu_items (name, category, price, recipe, image)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(body.name.trim())
    .bind(body.category.trim())
    .bind(body.price)
    .bind(&body.recipe)
    .bind(&body.image)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created(item))
}

/// PATCH /menu/:id - admin-gated catalog update
pub async fn update(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
    Json(body): Json<MenuItemRequest>,
) -> ApiResult<MenuItem> {
    validate(&body)?;

    let item = sqlx::query_as::<_, MenuItem>(
        r#"
        UPDATE menu_items
        SET name = $2, category = $3, price = $4, recipe = $5, image = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(body.name.trim())
    .bind(body.category.trim())
    .bind(body.price)
    .bind(&body.recipe)
    .bind(&body.image)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found(format!("menu item {} not found", id)))?;

    Ok(ApiResponse::success(item))
}

/// DELETE /menu/:id - admin-gated
pub async fn remove(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found(format!("menu item {} not found", id)));
    }

    Ok(ApiResponse::success(json!({ "deletedCount": result.rows_affected() })))
}
