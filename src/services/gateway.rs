use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway secret key not configured")]
    MissingSecret,
    #[error("gateway rejected request with status {status}")]
    Rejected { status: u16, body: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

/// Card-gateway client. Creates a payment intent for a given price and hands
/// the client secret back to the caller, which completes the charge
/// client-side.
pub struct PaymentGateway {
    http: reqwest::Client,
}

impl PaymentGateway {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub async fn create_intent(&self, price: Decimal) -> Result<PaymentIntent, GatewayError> {
        let gateway = &config::config().gateway;
        if gateway.secret_key.is_empty() {
            return Err(GatewayError::MissingSecret);
        }

        let amount = to_minor_units(price);
        let url = format!("{}/v1/payment_intents", gateway.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&gateway.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", gateway.currency.clone()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected { status, body });
        }

        let intent: IntentResponse = response.json().await?;
        Ok(PaymentIntent {
            client_secret: intent.client_secret,
        })
    }
}

impl Default for PaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Gateway amounts are integer minor units (cents); fractional cents are
/// truncated.
fn to_minor_units(price: Decimal) -> i64 {
    (price * Decimal::from(100)).trunc().to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn converts_dollars_to_cents() {
        assert_eq!(to_minor_units(Decimal::from_str("10.00").unwrap()), 1000);
        assert_eq!(to_minor_units(Decimal::from_str("0.99").unwrap()), 99);
    }

    #[test]
    fn truncates_fractional_cents() {
        assert_eq!(to_minor_units(Decimal::from_str("1.999").unwrap()), 199);
    }
}
