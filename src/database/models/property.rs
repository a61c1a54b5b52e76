use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Property sale status. `available -> bought` happens exactly once; `bought`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Bought,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub agent: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub status: PropertyStatus,
    /// Gateway reference recorded by the winning buy; never overwritten.
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
