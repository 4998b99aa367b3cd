//! End-to-end tests for the order draft controller against in-process
//! order services and wallets.
//!
//! Run with:
//! ```bash
//! cargo test -p liquid-nation-sdk --test order_draft
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::oneshot;

use liquid_nation_sdk::prelude::*;

// ─── Fakes ───────────────────────────────────────────────────────────────────

enum Reply {
    Accept,
    Reject(Option<String>),
}

/// Records every payload it receives and answers with a fixed reply.
struct RecordingService {
    reply: Reply,
    received: Mutex<Vec<SubmissionPayload>>,
}

impl RecordingService {
    fn accepting() -> Self {
        Self {
            reply: Reply::Accept,
            received: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(message: Option<&str>) -> Self {
        Self {
            reply: Reply::Reject(message.map(str::to_string)),
            received: Mutex::new(Vec::new()),
        }
    }

    fn received(&self) -> Vec<SubmissionPayload> {
        self.received.lock().unwrap().clone()
    }
}

fn record_for(order: &SubmissionPayload) -> OrderRecord {
    let (amount, asset) = order.asset.split_once(' ').unwrap();
    OrderRecord {
        id: "order-1".to_string(),
        order_type: order.order_type,
        amount: amount.parse().unwrap(),
        asset: AssetId::from(asset),
        chain: order.chain.clone(),
        accepts: order.accepts.clone(),
        partial: order.partial,
        premium: order.premium.trim_end_matches('%').to_string(),
        filled_amount: None,
        btc_wallet: order.btc_wallet.clone(),
        evm_wallet: order.evm_wallet.clone(),
        status: OrderStatus::Open,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl OrderService for RecordingService {
    async fn submit(&self, order: &SubmissionPayload) -> Result<OrderRecord, SubmissionError> {
        self.received.lock().unwrap().push(order.clone());
        match &self.reply {
            Reply::Accept => Ok(record_for(order)),
            Reply::Reject(message) => Err(SubmissionError::from_message(message.clone())),
        }
    }
}

/// Blocks inside `submit` until released, signalling when it has been entered.
struct GatedService {
    calls: AtomicUsize,
    entered: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl OrderService for GatedService {
    async fn submit(&self, order: &SubmissionPayload) -> Result<OrderRecord, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(tx) = self.entered.lock().unwrap().take() {
            let _ = tx.send(());
        }
        let release = self.release.lock().unwrap().take();
        if let Some(rx) = release {
            let _ = rx.await;
        }
        Ok(record_for(order))
    }
}

fn form<S: OrderService>(service: S, btc: SharedWallet, evm: SharedWallet) -> OrderDraftController<S> {
    OrderDraftController::new(
        service,
        ThemeCatalog::liquid_nation(),
        WalletSources::new(btc, evm),
        DraftConfig::default(),
    )
}

fn offline_form<S: OrderService>(service: S) -> OrderDraftController<S> {
    form(service, SharedWallet::new(), SharedWallet::new())
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_successful_submission_resets_draft() {
    let c = offline_form(RecordingService::accepting());
    c.set_field(DraftField::Amount("1.5".into()));
    c.set_field(DraftField::Asset(AssetId::from("BTC")));
    c.set_field(DraftField::Chain(AssetId::from("ARB")));
    c.set_field(DraftField::ManualBtcAddress("tb1qxyz".into()));
    c.toggle_accepted_token(AssetId::from("ETH"));

    let submitted = c.submit().await.expect("submission should succeed");
    assert_eq!(submitted.navigate_to, View::Dashboard);
    assert_eq!(submitted.navigate_to.as_str(), "dashboard");
    assert_eq!(submitted.record.amount, Decimal::new(15, 1));

    let received = c.service().received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].asset, "1.5 BTC");
    assert_eq!(received[0].chain, "ARB");
    assert_eq!(received[0].btc_wallet.as_deref(), Some("tb1qxyz"));
    assert_eq!(received[0].evm_wallet, None);

    let draft = c.draft();
    assert_eq!(draft.amount, "");
    assert_eq!(draft.asset, "BTC");
    assert_eq!(draft.chain, "ETH");
    assert!(draft.accepted_tokens.is_empty());
    assert_eq!(draft.order_type, OrderType::LimitBuy);
    assert_eq!(draft.manual_btc_address, "tb1qxyz");
    assert!(!c.is_submitting());
    assert_eq!(c.error(), None);
}

#[tokio::test]
async fn test_zero_amount_fails_without_calling_service() {
    let c = offline_form(RecordingService::accepting());
    c.set_field(DraftField::Amount("0".into()));
    c.set_field(DraftField::ManualBtcAddress("tb1qxyz".into()));
    c.toggle_accepted_token(AssetId::from("ETH"));
    let before = c.draft();

    let err = c.submit().await.unwrap_err();
    assert_eq!(err, DraftError::Validation(ValidationError::InvalidAmount));
    assert!(c.service().received().is_empty());
    assert_eq!(c.draft(), before);
    assert_eq!(c.error().as_deref(), Some("Please enter a valid amount"));
}

#[tokio::test]
async fn test_service_rejection_surfaces_message_and_keeps_draft() {
    let c = offline_form(RecordingService::rejecting(Some("network timeout")));
    c.set_field(DraftField::Amount("3".into()));
    c.set_field(DraftField::Premium("1.25".into()));
    c.set_field(DraftField::ManualEvmAddress("0xabc".into()));
    c.toggle_accepted_token(AssetId::from("SOL"));
    let before = c.draft();

    let err = c.submit().await.unwrap_err();
    assert_eq!(
        err,
        DraftError::Submission(SubmissionError::Service("network timeout".into()))
    );
    assert_eq!(c.error().as_deref(), Some("network timeout"));
    assert!(!c.is_submitting());
    assert_eq!(c.draft(), before);
    assert_eq!(c.service().received()[0].premium, "1.25%");
}

#[tokio::test]
async fn test_service_rejection_without_message_uses_generic_text() {
    let c = offline_form(RecordingService::rejecting(None));
    c.set_field(DraftField::Amount("3".into()));
    c.set_field(DraftField::ManualEvmAddress("0xabc".into()));
    c.toggle_accepted_token(AssetId::from("SOL"));

    assert!(c.submit().await.is_err());
    assert_eq!(
        c.error().as_deref(),
        Some("Failed to create order. Please try again.")
    );
}

// ─── Validation properties ───────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_amounts_never_reach_service() {
    for amount in ["", "0", "0.00", "-5", "abc", "   "] {
        let c = offline_form(RecordingService::accepting());
        c.set_field(DraftField::Amount(amount.into()));
        c.set_field(DraftField::ManualBtcAddress("tb1qxyz".into()));
        c.toggle_accepted_token(AssetId::from("ETH"));

        assert_eq!(
            c.submit().await.unwrap_err(),
            DraftError::Validation(ValidationError::InvalidAmount),
            "amount {amount:?}"
        );
        assert!(c.service().received().is_empty());
    }
}

#[tokio::test]
async fn test_empty_accepted_tokens_never_reach_service() {
    let c = offline_form(RecordingService::accepting());
    c.set_field(DraftField::Amount("2".into()));
    c.set_field(DraftField::ManualBtcAddress("tb1qxyz".into()));
    c.toggle_accepted_token(AssetId::from("ETH"));
    c.toggle_accepted_token(AssetId::from("ETH"));

    assert_eq!(
        c.submit().await.unwrap_err(),
        DraftError::Validation(ValidationError::NoAcceptedTokens)
    );
    assert!(c.service().received().is_empty());
}

#[tokio::test]
async fn test_missing_wallet_never_reaches_service() {
    let c = offline_form(RecordingService::accepting());
    c.set_field(DraftField::Amount("2".into()));
    c.toggle_accepted_token(AssetId::from("ETH"));

    assert!(!c.can_submit());
    assert_eq!(
        c.submit().await.unwrap_err(),
        DraftError::Validation(ValidationError::NoWallet)
    );
    assert!(c.service().received().is_empty());
}

// ─── Wallet resolution ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_connected_wallet_used_unless_overridden() {
    let btc = SharedWallet::new();
    let evm = SharedWallet::new();
    let c = form(RecordingService::accepting(), btc.clone(), evm.clone());

    btc.connect("B");
    assert_eq!(c.resolved_addresses().btc, "B");
    assert!(matches!(
        c.address_status(AddressNamespace::Bitcoin),
        AddressStatus::Connected { .. }
    ));

    c.set_field(DraftField::ManualBtcAddress("A".into()));
    assert_eq!(c.resolved_addresses().btc, "A");
    assert_eq!(c.address_status(AddressNamespace::Bitcoin), AddressStatus::Manual);

    c.set_field(DraftField::ManualBtcAddress(String::new()));
    evm.connect("0xconnected");
    c.set_field(DraftField::Amount("0.5".into()));
    c.toggle_accepted_token(AssetId::from("BASE"));
    c.submit().await.unwrap();

    let received = c.service().received();
    assert_eq!(received[0].btc_wallet.as_deref(), Some("B"));
    assert_eq!(received[0].evm_wallet.as_deref(), Some("0xconnected"));
}

#[tokio::test]
async fn test_wallet_disconnect_is_seen_on_next_submit() {
    let btc = SharedWallet::new();
    let c = form(RecordingService::accepting(), btc.clone(), SharedWallet::new());
    btc.connect("tb1qconnected");
    c.set_field(DraftField::Amount("1".into()));
    c.toggle_accepted_token(AssetId::from("ETH"));
    assert!(c.can_submit());

    btc.disconnect();
    assert!(!c.can_submit());
    assert_eq!(
        c.submit().await.unwrap_err(),
        DraftError::Validation(ValidationError::NoWallet)
    );
}

// ─── Re-entrancy ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_submit_is_rejected() {
    let (entered_tx, entered_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    let service = GatedService {
        calls: AtomicUsize::new(0),
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(Some(release_rx)),
    };
    let c = offline_form(service);
    c.set_field(DraftField::Amount("1".into()));
    c.set_field(DraftField::ManualBtcAddress("tb1qxyz".into()));
    c.toggle_accepted_token(AssetId::from("ETH"));

    let (first, second) = tokio::join!(c.submit(), async {
        entered_rx.await.unwrap();
        assert!(c.is_submitting());
        assert!(!c.can_submit());
        let second = c.submit().await;
        release_tx.send(()).unwrap();
        second
    });

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), DraftError::Busy);
    assert_eq!(c.service().calls.load(Ordering::SeqCst), 1);
    assert!(!c.is_submitting());
    assert_eq!(c.error(), None);
}

#[tokio::test]
async fn test_form_is_reusable_after_success() {
    let c = offline_form(RecordingService::accepting());
    c.set_field(DraftField::ManualBtcAddress("tb1qxyz".into()));

    for amount in ["1", "2"] {
        c.set_field(DraftField::Amount(amount.into()));
        c.toggle_accepted_token(AssetId::from("ETH"));
        c.submit().await.unwrap();
    }

    let assets: Vec<String> = c.service().received().into_iter().map(|p| p.asset).collect();
    assert_eq!(assets, vec!["1 BTC", "2 BTC"]);
}
