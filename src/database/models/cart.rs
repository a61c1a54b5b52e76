use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cart entry: lives only between selection and payment settlement, at which
/// point the payment recorder removes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub id: Uuid,
    pub email: String,
    pub item_id: Uuid,
    pub created_at: DateTime<Utc>,
}
