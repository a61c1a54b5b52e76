mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn issues_token_for_identity() -> Result<()> {
    let server = common::ensure_server().await?;

    let token = common::issue_token(server, "buyer@example.com").await?;
    assert!(!token.is_empty());
    // Three dot-separated JWT segments
    assert_eq!(token.split('.').count(), 3);

    Ok(())
}

#[tokio::test]
async fn rejects_blank_identity() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/token", server.base_url))
        .json(&json!({ "email": "  " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].is_string(), "body: {}", body);

    Ok(())
}

#[tokio::test]
async fn protected_route_requires_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/offers", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].is_string(), "body: {}", body);

    Ok(())
}

#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/offers", server.base_url))
        .header("authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn rejects_tampered_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    // Corrupt the signature segment
    let mut tampered = token.clone();
    let flipped = if tampered.ends_with('A') { 'B' } else { 'A' };
    tampered.pop();
    tampered.push(flipped);

    let res = client
        .get(format!("{}/offers", server.base_url))
        .bearer_auth(&tampered)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn self_only_payment_history_rejects_other_identity() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    let res = client
        .get(format!("{}/payments/intruder@example.com", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "forbidden access");

    Ok(())
}

#[tokio::test]
async fn self_only_admin_flag_rejects_other_identity() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(server, "buyer@example.com").await?;

    let res = client
        .get(format!(
            "{}/accounts/admin/intruder@example.com",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    Ok(())
}
