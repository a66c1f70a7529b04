mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn empty_cart_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .post(server.url("/api/checkout"))
        .json(&json!({ "items": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["field_errors"]["items"], "cart is empty");
    Ok(())
}

#[tokio::test]
async fn oversized_order_is_a_conflict() -> Result<()> {
    let server = common::ensure_server().await?;
    if !server.database_available().await {
        return Ok(());
    }

    let res = reqwest::Client::new()
        .post(server.url("/api/checkout"))
        .json(&json!({ "items": [{ "product": "vinyl", "quantity": 1000000 }] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn checkout_without_stripe_key_is_unavailable() -> Result<()> {
    let server = common::ensure_server().await?;
    if !server.database_available().await {
        return Ok(());
    }

    // Seeded stock covers one record; the server was started without STRIPE_SECRET_KEY
    let res = reqwest::Client::new()
        .post(server.url("/api/checkout"))
        .json(&json!({ "items": [{ "product": "vinyl", "quantity": 1 }] }))
        .send()
        .await?;
    assert!(
        res.status() == StatusCode::SERVICE_UNAVAILABLE || res.status() == StatusCode::CONFLICT,
        "unexpected status: {}",
        res.status()
    );
    Ok(())
}
