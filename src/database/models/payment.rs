use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Settled payment. Immutable once written; `transaction_id` is the
/// idempotency key (unique index), `cart_ids` are the entries this payment
/// settled and removed, `item_ids` the catalog line items behind them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub email: String,
    pub amount: Decimal,
    pub transaction_id: String,
    pub cart_ids: Vec<Uuid>,
    pub item_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
