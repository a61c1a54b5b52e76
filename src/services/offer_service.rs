use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Offer, OfferStatus, Property, PropertyStatus};

#[derive(Debug, thiserror::Error)]
pub enum OfferError {
    #[error("property {0} not found")]
    PropertyNotFound(Uuid),
    #[error("offer {0} not found")]
    OfferNotFound(Uuid),
    #[error("property already bought")]
    AlreadyBought,
    #[error("offer is {0}, not pending")]
    NotPending(OfferStatus),
    #[error("transaction reference required")]
    MissingTransactionRef,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Offer submission payload. Status is never accepted from the caller; every
/// offer starts pending.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    pub property_id: Uuid,
    pub title: Option<String>,
    pub location: Option<String>,
    pub agent: Option<String>,
    pub buyer_name: String,
    pub offered_amount: Decimal,
    pub buying_date: Option<NaiveDate>,
}

/// Offer lifecycle and the companion property-status transition.
///
/// Multi-step flows here are not serialized by any lock; safety under
/// concurrent duplicate submissions comes from re-check-before-write: the
/// buy is a conditional update that only matches `available`, so exactly one
/// of two racing buyers can win and the loser cannot overwrite the winner's
/// transaction reference.
pub struct OfferService {
    pool: PgPool,
}

impl OfferService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, buyer_email: &str, offer: NewOffer) -> Result<Offer, OfferError> {
        let created = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers
                (property_id, title, location, agent, buyer_name, buyer_email,
                 offered_amount, buying_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            RETURNING *
            "#,
        )
        .bind(offer.property_id)
        .bind(&offer.title)
        .bind(&offer.location)
        .bind(&offer.agent)
        .bind(&offer.buyer_name)
        .bind(buyer_email)
        .bind(offer.offered_amount)
        .bind(offer.buying_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, OfferError> {
        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(offer)
    }

    /// The client asks "is there an offer on this property" by property id.
    pub async fn find_by_property(&self, property_id: Uuid) -> Result<Option<Offer>, OfferError> {
        let offer = sqlx::query_as::<_, Offer>(
            "SELECT * FROM offers WHERE property_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(offer)
    }

    pub async fn list_by_buyer(&self, buyer_email: &str) -> Result<Vec<Offer>, OfferError> {
        let offers = sqlx::query_as::<_, Offer>(
            "SELECT * FROM offers WHERE buyer_email = $1 ORDER BY created_at DESC",
        )
        .bind(buyer_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(offers)
    }

    pub async fn list_all(&self) -> Result<Vec<Offer>, OfferError> {
        let offers = sqlx::query_as::<_, Offer>("SELECT * FROM offers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(offers)
    }

    /// Delete an offer while it is still pending. Ownership (buyer or admin)
    /// is enforced by the caller; the pending guard is re-checked here so a
    /// concurrent settlement cannot be deleted out from under.
    pub async fn delete_pending(&self, id: Uuid) -> Result<(), OfferError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Nothing deleted: distinguish absent from already-settled
        match self.find_by_id(id).await? {
            None => Err(OfferError::OfferNotFound(id)),
            Some(offer) => Err(OfferError::NotPending(offer.status)),
        }
    }

    /// Mark a property bought, recording the gateway transaction reference.
    /// Conditional on current status: an already-bought property is left
    /// untouched and reported as a conflict, which is what the loser of a
    /// concurrent double-buy sees.
    pub async fn buy_property(
        &self,
        property_id: Uuid,
        transaction_id: &str,
    ) -> Result<Property, OfferError> {
        let updated = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET status = 'bought', transaction_id = $2
            WHERE id = $1 AND status = 'available'
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(property) = updated {
            return Ok(property);
        }

        // Re-read to report why the guard did not match
        let status: Option<(PropertyStatus,)> =
            sqlx::query_as("SELECT status FROM properties WHERE id = $1")
                .bind(property_id)
                .fetch_optional(&self.pool)
                .await?;

        match status {
            None => Err(OfferError::PropertyNotFound(property_id)),
            Some(_) => Err(OfferError::AlreadyBought),
        }
    }

    /// Explicit offer-status transition: pending -> bought | rejected.
    /// `bought` must carry a transaction reference. Terminal states are
    /// frozen; a repeat transition is rejected without mutating anything.
    pub async fn transition(
        &self,
        id: Uuid,
        target: OfferStatus,
        transaction_id: Option<&str>,
    ) -> Result<Offer, OfferError> {
        if target == OfferStatus::Bought && transaction_id.is_none() {
            return Err(OfferError::MissingTransactionRef);
        }

        let updated = sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers
            SET status = $2, transaction_id = COALESCE($3, transaction_id), updated_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(target)
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(offer) = updated {
            return Ok(offer);
        }

        match self.find_by_id(id).await? {
            None => Err(OfferError::OfferNotFound(id)),
            Some(offer) => Err(OfferError::NotPending(offer.status)),
        }
    }
}
