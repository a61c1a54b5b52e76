use axum::{
    extract::{Extension, Query},
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Review;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub property_id: Uuid,
    pub buyer_email: String,
    pub review_text: String,
    pub rating: i32,
}

/// POST /reviews
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Json(body): Json<NewReview>,
) -> ApiResult<Review> {
    if body.review_text.trim().is_empty() {
        return Err(ApiError::validation_error("review text is required"));
    }
    if !(1..=5).contains(&body.rating) {
        return Err(ApiError::validation_error("rating must be between 1 and 5"));
    }

    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (property_id, buyer_email, review_text, rating)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(body.property_id)
    .bind(body.buyer_email.trim())
    .bind(body.review_text.trim())
    .bind(body.rating)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created(review))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub property_id: Option<Uuid>,
}

/// GET /reviews?propertyId=
pub async fn list(
    Extension(pool): Extension<PgPool>,
    Query(query): Query<ReviewQuery>,
) -> ApiResult<Vec<Review>> {
    let reviews = match query.property_id {
        Some(property_id) => {
            sqlx::query_as::<_, Review>(
                "SELECT * FROM reviews WHERE property_id = $1 ORDER BY created_at DESC",
            )
            .bind(property_id)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY created_at DESC")
                .fetch_all(&pool)
                .await?
        }
    };

    Ok(ApiResponse::success(reviews))
}
