use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Offer state machine: `pending` (initial) -> `bought` | `rejected`
/// (terminal). `bought` happens only in lockstep with a settled payment and
/// carries a transaction reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Bought,
    Rejected,
}

impl OfferStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Bought => "bought",
            OfferStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, OfferStatus::Pending)
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub property_id: Uuid,
    pub title: Option<String>,
    pub location: Option<String>,
    pub agent: Option<String>,
    pub buyer_name: String,
    pub buyer_email: String,
    pub offered_amount: Decimal,
    pub buying_date: Option<NaiveDate>,
    pub status: OfferStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_open_state() {
        assert!(!OfferStatus::Pending.is_terminal());
        assert!(OfferStatus::Bought.is_terminal());
        assert!(OfferStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OfferStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
