mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Boundary validation runs before any store access, so these hold with or
// without a reachable database.

#[tokio::test]
async fn contact_requires_all_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/contact", server.base_url))
        .json(&json!({ "name": "Ann", "email": "", "message": "hi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "All fields are required.");

    Ok(())
}

#[tokio::test]
async fn buy_requires_transaction_reference() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    let res = client
        .patch(format!(
            "{}/properties/buy/7f3c2a9e-1111-4222-8333-444455556666",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    Ok(())
}

#[tokio::test]
async fn offer_transition_rejects_pending_target() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    let res = client
        .patch(format!(
            "{}/offers/7f3c2a9e-1111-4222-8333-444455556666/status",
            server.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({ "status": "pending" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn payment_requires_transaction_reference() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    let res = client
        .post(format!("{}/payments", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "amount": "49.99",
            "transactionId": "",
            "cartIds": [],
            "itemIds": []
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn payment_intent_rejects_non_positive_price() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    let res = client
        .post(format!("{}/payments/intent", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "price": "0" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn offer_rejects_non_positive_amount() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    let res = client
        .post(format!("{}/offers", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "propertyId": "7f3c2a9e-1111-4222-8333-444455556666",
            "buyerName": "Buyer",
            "offeredAmount": "-10"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
