#![cfg(feature = "http")]

//! Integration tests against a running order backend.
//!
//! All tests are `#[ignore]` because they require a live server. The base URL
//! comes from `LIQUID_NATION_API_URL` (a `.env` file is honoured) and falls
//! back to the SDK default.
//!
//! Run with:
//! ```bash
//! cargo test -p liquid-nation-sdk --test api_integration -- --ignored
//! ```

use std::time::Duration;

use liquid_nation_sdk::prelude::*;

fn api_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("LIQUID_NATION_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

fn client() -> LiquidNationClient {
    LiquidNationClient::builder()
        .base_url(&api_url())
        .submit_timeout(Duration::from_secs(15))
        .build()
        .expect("client should build")
}

#[tokio::test]
#[ignore]
async fn test_health() {
    let health = client().health().await.expect("health check should succeed");
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_orders() {
    let orders = client()
        .orders()
        .list(&OrderQuery {
            limit: Some(5),
            ..Default::default()
        })
        .await
        .expect("list should succeed");
    assert!(orders.len() <= 5);
}

#[tokio::test]
#[ignore]
async fn test_create_then_fetch_order() {
    let client = client();
    let form = client.draft(WalletSnapshot::disconnected(), WalletSnapshot::disconnected());
    form.set_field(DraftField::ManualBtcAddress(
        "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx".into(),
    ));
    form.set_field(DraftField::Amount("0.01".into()));
    form.set_field(DraftField::Premium("1".into()));
    form.toggle_accepted_token(AssetId::from("ETH"));

    let submitted = form.submit().await.expect("submit should succeed");
    assert_eq!(submitted.navigate_to, View::Dashboard);

    let fetched = client
        .orders()
        .get(&submitted.record.id)
        .await
        .expect("created order should be retrievable");
    assert_eq!(fetched.id, submitted.record.id);
    assert_eq!(fetched.asset, "BTC");
}
