use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Payment;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The payment row is durably recorded but its cart entries were not
    /// removed. Callers must see this; a retry of the same submission
    /// converges because both steps are idempotent.
    #[error("payment {payment_id} recorded but cart cleanup failed")]
    CleanupIncomplete {
        payment_id: Uuid,
        #[source]
        source: sqlx::Error,
    },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Payment submission. `transaction_id` is the gateway reference and doubles
/// as the idempotency key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub amount: Decimal,
    pub transaction_id: String,
    #[serde(default)]
    pub cart_ids: Vec<Uuid>,
    #[serde(default)]
    pub item_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment_id: Uuid,
    /// True when this submission matched an already-recorded payment.
    pub duplicate: bool,
    pub carts_removed: u64,
}

/// Records payments and cascades cart-entry removal.
///
/// The two steps are not one native transaction by design; instead the insert
/// is keyed on the transaction reference (duplicate submissions are detected
/// no-ops) and the delete is remove-if-present, so the whole sequence is
/// safely retryable after any partial failure.
pub struct PaymentService {
    pool: PgPool,
}

impl PaymentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(
        &self,
        payer_email: &str,
        payment: NewPayment,
    ) -> Result<PaymentReceipt, PaymentError> {
        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO payments (email, amount, transaction_id, cart_ids, item_ids)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (transaction_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(payer_email)
        .bind(payment.amount)
        .bind(&payment.transaction_id)
        .bind(&payment.cart_ids)
        .bind(&payment.item_ids)
        .fetch_optional(&self.pool)
        .await?;

        let (payment_id, duplicate) = match inserted {
            Some((id,)) => (id, false),
            None => {
                // Same transaction reference seen before: resolve the
                // existing record instead of writing a second one
                let (id,): (Uuid,) =
                    sqlx::query_as("SELECT id FROM payments WHERE transaction_id = $1")
                        .bind(&payment.transaction_id)
                        .fetch_one(&self.pool)
                        .await?;
                (id, true)
            }
        };

        // Cleanup runs on duplicates too, so a retry after a partial failure
        // finishes the job. Deleting entries that are already gone matches
        // zero rows and is not an error.
        let removed = sqlx::query("DELETE FROM carts WHERE id = ANY($1)")
            .bind(&payment.cart_ids)
            .execute(&self.pool)
            .await
            .map_err(|source| PaymentError::CleanupIncomplete { payment_id, source })?;

        if duplicate {
            tracing::info!(
                "duplicate payment submission for transaction {}; no new record",
                payment.transaction_id
            );
        }

        Ok(PaymentReceipt {
            payment_id,
            duplicate,
            carts_removed: removed.rows_affected(),
        })
    }

    pub async fn list_by_payer(&self, email: &str) -> Result<Vec<Payment>, PaymentError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
