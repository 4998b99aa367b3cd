//! Wire types for the order REST endpoints.

use super::{OrderStatus, OrderType};
use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order as returned by `POST /api/orders`, `GET /api/orders/{id}` and
/// the cancel endpoint.
///
/// Mirrors the submission payload, plus server-assigned fields.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub order_type: OrderType,
    /// `"<amount> <asset>"`.
    pub asset: String,
    pub chain: AssetId,
    #[serde(default)]
    pub accepts: Vec<AssetId>,
    pub partial: bool,
    /// `"<premium>%"`, possibly just `"%"`.
    #[serde(default)]
    pub premium: String,
    #[serde(default)]
    pub btc_wallet: Option<String>,
    #[serde(default)]
    pub evm_wallet: Option<String>,
    pub status: OrderStatus,
    /// Decimal text; absent until the order has been filled at least once.
    #[serde(default)]
    pub filled_amount: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `GET /api/orders` response.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Filters for `GET /api/orders`. Unset fields are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub asset: Option<AssetId>,
    pub chain: Option<AssetId>,
    pub btc_wallet: Option<String>,
    pub evm_wallet: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl OrderQuery {
    /// URL query string without the leading `?`. Empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            let status = serde_json::to_value(status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            params.push(format!("status={}", status));
        }
        if let Some(asset) = &self.asset {
            params.push(format!("asset={}", urlencoding::encode(asset.as_str())));
        }
        if let Some(chain) = &self.chain {
            params.push(format!("chain={}", urlencoding::encode(chain.as_str())));
        }
        if let Some(w) = &self.btc_wallet {
            params.push(format!("btc_wallet={}", urlencoding::encode(w)));
        }
        if let Some(w) = &self.evm_wallet {
            params.push(format!("evm_wallet={}", urlencoding::encode(w)));
        }
        if let Some(l) = self.limit {
            params.push(format!("limit={}", l));
        }
        if let Some(o) = self.offset {
            params.push(format!("offset={}", o));
        }
        params.join("&")
    }
}

/// Body for `POST /api/orders/{id}/fill` and `POST /api/orders/{id}/partial-fill`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FillOrderRequest {
    pub taker_address: String,
    /// `"<txid>:<vout>"` funding the taker side.
    pub taker_utxo: String,
    /// Partial fills only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_amount: Option<String>,
}

/// Spell material the taker signs to settle a fill.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpellData {
    pub spell_yaml: String,
    #[serde(default)]
    pub app_binary: String,
    #[serde(default)]
    pub prev_txs: Vec<String>,
}

/// Fill and partial-fill response.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FillOrderResponse {
    pub order: OrderResponse,
    pub spell: SpellData,
    #[serde(default)]
    pub unsigned_txs: Vec<String>,
}

/// `GET /health` response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    #[serde(alias = "error")]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Parse an error body, preferring `message` over `details`.
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message.or(e.details))
    }
}
