//! Orders sub-client and the HTTP-backed order service.

use super::service::OrderService;
use super::wire::{ErrorResponse, FillOrderRequest, OrderQuery};
use super::{FillReceipt, OrderRecord, SubmissionPayload};
use crate::client::LiquidNationClient;
use crate::error::{HttpError, SdkError, SubmissionError};
use crate::http::LiquidNationHttp;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

// ─── Orders sub-client ───────────────────────────────────────────────────────

pub struct Orders<'a> {
    pub(crate) client: &'a LiquidNationClient,
}

impl<'a> Orders<'a> {
    /// Create an order directly, bypassing the draft controller.
    pub async fn create(&self, payload: &SubmissionPayload) -> Result<OrderRecord, SdkError> {
        let record = OrderRecord::try_from(self.client.http.create_order(payload).await?)?;
        self.cache(&record).await;
        Ok(record)
    }

    pub async fn list(&self, query: &OrderQuery) -> Result<Vec<OrderRecord>, SdkError> {
        let records: Vec<OrderRecord> = self.client.http.list_orders(query).await?.try_into()?;
        for record in &records {
            self.cache(record).await;
        }
        Ok(records)
    }

    /// Fetch one order, served from cache while fresh.
    pub async fn get(&self, order_id: &str) -> Result<OrderRecord, SdkError> {
        {
            let cache = self.client.order_cache.read().await;
            if let Some((record, fetched_at)) = cache.get(order_id) {
                if fetched_at.elapsed() < self.client.order_cache_ttl {
                    tracing::debug!(order_id, "Order cache hit");
                    return Ok(record.clone());
                }
            }
        }

        let record = OrderRecord::try_from(self.client.http.get_order(order_id).await?)?;
        self.cache(&record).await;
        Ok(record)
    }

    pub async fn cancel(&self, order_id: &str) -> Result<OrderRecord, SdkError> {
        self.client.order_cache.write().await.remove(order_id);
        let record = OrderRecord::try_from(self.client.http.cancel_order(order_id).await?)?;
        self.cache(&record).await;
        Ok(record)
    }

    /// Take the whole order as `taker_address`, funded by `taker_utxo`.
    pub async fn fill(
        &self,
        order_id: &str,
        taker_address: &str,
        taker_utxo: &str,
    ) -> Result<FillReceipt, SdkError> {
        let request = fill_request(taker_address, taker_utxo, None)?;
        let resp = self.client.http.fill_order(order_id, &request).await?;
        self.settle(order_id, resp.try_into()?).await
    }

    /// Take `fill_amount` of an order that allows partial fills.
    pub async fn partial_fill(
        &self,
        order_id: &str,
        taker_address: &str,
        taker_utxo: &str,
        fill_amount: Decimal,
    ) -> Result<FillReceipt, SdkError> {
        let request = fill_request(taker_address, taker_utxo, Some(fill_amount))?;
        let resp = self.client.http.partial_fill_order(order_id, &request).await?;
        self.settle(order_id, resp.try_into()?).await
    }

    async fn settle(&self, order_id: &str, receipt: FillReceipt) -> Result<FillReceipt, SdkError> {
        tracing::info!(
            order_id,
            status = ?receipt.order.status,
            "Order fill prepared"
        );
        self.client.order_cache.write().await.remove(order_id);
        self.cache(&receipt.order).await;
        Ok(receipt)
    }

    /// Insert `record`, dropping entries that have outlived the TTL.
    async fn cache(&self, record: &OrderRecord) {
        let ttl = self.client.order_cache_ttl;
        let mut cache = self.client.order_cache.write().await;
        cache.retain(|_, (_, fetched_at)| fetched_at.elapsed() < ttl);
        cache.insert(record.id.clone(), (record.clone(), Instant::now()));
    }
}

fn fill_request(
    taker_address: &str,
    taker_utxo: &str,
    fill_amount: Option<Decimal>,
) -> Result<FillOrderRequest, SdkError> {
    if taker_address.trim().is_empty() {
        return Err(SdkError::Validation("Taker address is required".into()));
    }
    if taker_utxo.trim().is_empty() {
        return Err(SdkError::Validation("Taker UTXO is required".into()));
    }
    if let Some(amount) = fill_amount {
        if amount <= Decimal::ZERO {
            return Err(SdkError::Validation(format!(
                "Fill amount must be positive, got {}",
                amount
            )));
        }
    }
    Ok(FillOrderRequest {
        taker_address: taker_address.trim().to_string(),
        taker_utxo: taker_utxo.trim().to_string(),
        fill_amount: fill_amount.map(|a| a.normalize().to_string()),
    })
}

// ─── HttpOrderService ────────────────────────────────────────────────────────

/// [`OrderService`] backed by the order REST API.
///
/// Reports `is_loading` while any of its requests are outstanding, including
/// ones started by clones sharing the same counter.
#[derive(Clone)]
pub struct HttpOrderService {
    http: LiquidNationHttp,
    in_flight: Arc<AtomicUsize>,
}

impl HttpOrderService {
    pub fn new(http: LiquidNationHttp) -> Self {
        Self {
            http,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}

struct InFlightCount<'a>(&'a AtomicUsize);

impl<'a> InFlightCount<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightCount<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn submit(&self, order: &SubmissionPayload) -> Result<OrderRecord, SubmissionError> {
        let _count = InFlightCount::start(&self.in_flight);
        let response = self
            .http
            .create_order(order)
            .await
            .map_err(submission_error)?;
        OrderRecord::try_from(response).map_err(|e| SubmissionError::InvalidResponse(e.to_string()))
    }

    fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

/// Turn a transport failure into the message shown to the user.
///
/// Error bodies carrying a `message`/`error`/`details` field are surfaced
/// verbatim; bodies without one fall back to the generic message.
pub(crate) fn submission_error(err: HttpError) -> SubmissionError {
    match err {
        HttpError::BadRequest(body)
        | HttpError::NotFound(body)
        | HttpError::ServerError { body, .. } => {
            SubmissionError::from_message(ErrorResponse::message_from_body(&body))
        }
        other => SubmissionError::Service(other.to_string()),
    }
}
