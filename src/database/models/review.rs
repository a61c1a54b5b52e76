use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub property_id: Uuid,
    pub buyer_email: String,
    pub review_text: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}
