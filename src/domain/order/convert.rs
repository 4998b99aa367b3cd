//! Conversions: order wire types → Order domain types.

use super::wire;
use super::{FillReceipt, OrderRecord};
use crate::error::SdkError;
use crate::shared::{parse_amount, AssetId};
use rust_decimal::Decimal;

/// Split `"<amount> <asset>"` into its parts.
fn split_amount_asset(value: &str) -> Result<(Decimal, AssetId), SdkError> {
    let mut parts = value.split_whitespace();
    let (Some(amount), Some(asset), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SdkError::Validation(format!(
            "Expected \"<amount> <asset>\", got {:?}",
            value
        )));
    };
    let amount = parse_amount(amount)
        .ok_or_else(|| SdkError::Validation(format!("Invalid order amount: {:?}", amount)))?;
    Ok((amount, AssetId::from(asset)))
}

/// Strip the `%` from `"<premium>%"`. The premium is free-form, so any
/// text is kept as is.
fn premium_text(value: &str) -> String {
    value.trim().trim_end_matches('%').trim().to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl TryFrom<wire::OrderResponse> for OrderRecord {
    type Error = SdkError;

    fn try_from(resp: wire::OrderResponse) -> Result<Self, Self::Error> {
        let (amount, asset) = split_amount_asset(&resp.asset)?;
        let filled_amount = resp.filled_amount.as_deref().and_then(parse_amount);

        Ok(OrderRecord {
            id: resp.id,
            order_type: resp.order_type,
            amount,
            asset,
            chain: resp.chain,
            accepts: resp.accepts,
            partial: resp.partial,
            premium: premium_text(&resp.premium),
            filled_amount,
            btc_wallet: non_empty(resp.btc_wallet),
            evm_wallet: non_empty(resp.evm_wallet),
            status: resp.status,
            created_at: resp.created_at,
        })
    }
}

impl TryFrom<wire::ListOrdersResponse> for Vec<OrderRecord> {
    type Error = SdkError;

    fn try_from(resp: wire::ListOrdersResponse) -> Result<Self, Self::Error> {
        resp.orders.into_iter().map(OrderRecord::try_from).collect()
    }
}

impl TryFrom<wire::FillOrderResponse> for FillReceipt {
    type Error = SdkError;

    fn try_from(resp: wire::FillOrderResponse) -> Result<Self, Self::Error> {
        Ok(FillReceipt {
            order: resp.order.try_into()?,
            spell: resp.spell,
            unsigned_txs: resp.unsigned_txs,
        })
    }
}
