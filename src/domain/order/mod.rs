//! Order domain — order drafts, submission payloads, created orders.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod service;
pub mod state;
pub mod wire;

use crate::domain::wallet::ResolvedAddresses;
use crate::shared::{parse_amount, AssetId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(feature = "http")]
pub use client::{HttpOrderService, Orders};
pub use service::OrderService;
pub use state::{OrderDraftController, Submitted, View};

// ─── OrderType ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    #[default]
    LimitBuy,
    LimitSell,
    MarketBuy,
    MarketSell,
}

impl OrderType {
    pub const ALL: [OrderType; 4] = [
        OrderType::LimitBuy,
        OrderType::LimitSell,
        OrderType::MarketBuy,
        OrderType::MarketSell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LimitBuy => "limit-buy",
            Self::LimitSell => "limit-sell",
            Self::MarketBuy => "market-buy",
            Self::MarketSell => "market-sell",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OrderType::LimitBuy => write!(f, "Limit Buy Order"),
            OrderType::LimitSell => write!(f, "Limit Sell Order"),
            OrderType::MarketBuy => write!(f, "Market Buy Order"),
            OrderType::MarketSell => write!(f, "Market Sell Order"),
        }
    }
}

// ─── OrderStatus ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
    Expired,
    PartiallyFilled,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Initial asset and chain selections for a fresh draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftDefaults {
    pub asset: AssetId,
    pub chain: AssetId,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            asset: AssetId::from("BTC"),
            chain: AssetId::from("ETH"),
        }
    }
}

/// Controller configuration.
#[derive(Debug, Clone, Default)]
pub struct DraftConfig {
    pub defaults: DraftDefaults,
    /// Give up waiting on the order service after this long. `None` waits forever.
    pub submit_timeout: Option<Duration>,
}

/// The in-progress, not-yet-submitted order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_type: OrderType,
    pub asset: AssetId,
    /// Raw amount text as entered.
    pub amount: String,
    pub chain: AssetId,
    /// Insertion-ordered, no duplicates.
    pub accepted_tokens: Vec<AssetId>,
    pub partial_fills_allowed: bool,
    /// Raw percentage text as entered. Not range-checked.
    pub premium: String,
    pub manual_btc_address: String,
    pub manual_evm_address: String,
}

impl OrderDraft {
    pub fn new(defaults: &DraftDefaults) -> Self {
        Self {
            order_type: OrderType::default(),
            asset: defaults.asset.clone(),
            amount: String::new(),
            chain: defaults.chain.clone(),
            accepted_tokens: Vec::new(),
            partial_fills_allowed: true,
            premium: String::new(),
            manual_btc_address: String::new(),
            manual_evm_address: String::new(),
        }
    }

    /// Reset order fields to defaults. Manual addresses are kept so the user
    /// can place several orders in a row.
    pub fn reset(&mut self, defaults: &DraftDefaults) {
        let manual_btc_address = std::mem::take(&mut self.manual_btc_address);
        let manual_evm_address = std::mem::take(&mut self.manual_evm_address);
        *self = Self {
            manual_btc_address,
            manual_evm_address,
            ..Self::new(defaults)
        };
    }

    /// Apply one field update. No validation happens here.
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::OrderType(v) => self.order_type = v,
            DraftField::Asset(v) => self.asset = v,
            DraftField::Amount(v) => self.amount = v,
            DraftField::Chain(v) => self.chain = v,
            DraftField::PartialFills(v) => self.partial_fills_allowed = v,
            DraftField::Premium(v) => self.premium = v,
            DraftField::ManualBtcAddress(v) => self.manual_btc_address = v,
            DraftField::ManualEvmAddress(v) => self.manual_evm_address = v,
        }
    }

    /// Add `token` if absent, remove it if present.
    pub fn toggle_accepted_token(&mut self, token: AssetId) {
        if let Some(pos) = self.accepted_tokens.iter().position(|t| *t == token) {
            self.accepted_tokens.remove(pos);
        } else {
            self.accepted_tokens.push(token);
        }
    }

    pub fn accepts(&self, token: &AssetId) -> bool {
        self.accepted_tokens.contains(token)
    }
}

/// A single form-field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    OrderType(OrderType),
    Asset(AssetId),
    Amount(String),
    Chain(AssetId),
    PartialFills(bool),
    Premium(String),
    ManualBtcAddress(String),
    ManualEvmAddress(String),
}

// ─── SubmissionPayload ───────────────────────────────────────────────────────

/// Flattened order request sent to the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub order_type: OrderType,
    /// `"<amount> <asset>"`, e.g. `"1.5 BTC"`.
    pub asset: String,
    pub chain: AssetId,
    pub accepts: Vec<AssetId>,
    pub partial: bool,
    /// `"<premium>%"`.
    pub premium: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc_wallet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm_wallet: Option<String>,
}

impl SubmissionPayload {
    pub fn assemble(draft: &OrderDraft, addresses: &ResolvedAddresses) -> Self {
        Self {
            order_type: draft.order_type,
            asset: format!("{} {}", draft.amount.trim(), draft.asset),
            chain: draft.chain.clone(),
            accepts: draft.accepted_tokens.clone(),
            partial: draft.partial_fills_allowed,
            premium: format!("{}%", draft.premium.trim()),
            btc_wallet: addresses.btc_wallet(),
            evm_wallet: addresses.evm_wallet(),
        }
    }
}

// ─── OrderRecord ─────────────────────────────────────────────────────────────

/// A created order as acknowledged by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub order_type: OrderType,
    pub amount: Decimal,
    pub asset: AssetId,
    pub chain: AssetId,
    pub accepts: Vec<AssetId>,
    pub partial: bool,
    /// Premium as entered, without the trailing `%`. Free-form text.
    pub premium: String,
    /// Amount taken by fills so far, when the backend reports it.
    pub filled_amount: Option<Decimal>,
    pub btc_wallet: Option<String>,
    pub evm_wallet: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Result of filling (or partially filling) an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReceipt {
    pub order: OrderRecord,
    pub spell: wire::SpellData,
    /// Transactions the taker still has to sign and broadcast.
    pub unsigned_txs: Vec<String>,
}

impl OrderRecord {
    /// The premium as a percentage, if the entered text is a number.
    pub fn premium_percent(&self) -> Option<Decimal> {
        parse_amount(&self.premium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> OrderDraft {
        OrderDraft::new(&DraftDefaults::default())
    }

    #[test]
    fn test_defaults() {
        let d = draft();
        assert_eq!(d.order_type, OrderType::LimitBuy);
        assert_eq!(d.asset, "BTC");
        assert_eq!(d.chain, "ETH");
        assert!(d.partial_fills_allowed);
        assert!(d.accepted_tokens.is_empty());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut d = draft();
        d.toggle_accepted_token(AssetId::from("ETH"));
        d.toggle_accepted_token(AssetId::from("SOL"));
        let before = d.accepted_tokens.clone();

        d.toggle_accepted_token(AssetId::from("BASE"));
        d.toggle_accepted_token(AssetId::from("BASE"));
        assert_eq!(d.accepted_tokens, before);

        d.toggle_accepted_token(AssetId::from("ETH"));
        assert_eq!(d.accepted_tokens, vec![AssetId::from("SOL")]);
        d.toggle_accepted_token(AssetId::from("ETH"));
        assert!(d.accepts(&AssetId::from("ETH")));
        assert_eq!(d.accepted_tokens.len(), 2);
    }

    #[test]
    fn test_reset_keeps_manual_addresses() {
        let mut d = draft();
        d.apply(DraftField::Amount("1.5".into()));
        d.apply(DraftField::OrderType(OrderType::MarketSell));
        d.apply(DraftField::ManualBtcAddress("tb1qxyz".into()));
        d.apply(DraftField::ManualEvmAddress("0xabc".into()));
        d.apply(DraftField::PartialFills(false));
        d.toggle_accepted_token(AssetId::from("ETH"));

        d.reset(&DraftDefaults::default());

        let mut expected = draft();
        expected.manual_btc_address = "tb1qxyz".into();
        expected.manual_evm_address = "0xabc".into();
        assert_eq!(d, expected);
    }

    #[test]
    fn test_payload_shape() {
        let mut d = draft();
        d.apply(DraftField::Amount("1.5".into()));
        d.apply(DraftField::Premium("2".into()));
        d.toggle_accepted_token(AssetId::from("ETH"));
        let addresses = ResolvedAddresses {
            btc: "tb1qxyz".into(),
            evm: String::new(),
        };

        let payload = SubmissionPayload::assemble(&d, &addresses);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "orderType": "limit-buy",
                "asset": "1.5 BTC",
                "chain": "ETH",
                "accepts": ["ETH"],
                "partial": true,
                "premium": "2%",
                "btcWallet": "tb1qxyz",
            })
        );
    }

    #[test]
    fn test_order_type_wire_names() {
        for ty in OrderType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }
}
