//! Low-level HTTP client — `LiquidNationHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the order sub-client). Internal building block for the
//! high-level client and [`HttpOrderService`](crate::domain::order::HttpOrderService).

use crate::domain::order::wire::{
    FillOrderRequest, FillOrderResponse, HealthResponse, ListOrdersResponse, OrderQuery,
    OrderResponse,
};
use crate::domain::order::SubmissionPayload;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Low-level HTTP client for the Liquid Nation order backend.
#[derive(Clone)]
pub struct LiquidNationHttp {
    base_url: String,
    client: Client,
}

impl LiquidNationHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Orders ───────────────────────────────────────────────────────────

    pub async fn create_order(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<OrderResponse, HttpError> {
        let url = format!("{}/api/orders", self.base_url);
        self.post(&url, payload, RetryPolicy::None).await
    }

    pub async fn list_orders(&self, query: &OrderQuery) -> Result<ListOrdersResponse, HttpError> {
        let mut url = format!("{}/api/orders", self.base_url);
        let params = query.to_query_string();
        if !params.is_empty() {
            url = format!("{}?{}", url, params);
        }
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_order(&self, order_id: &str) -> Result<OrderResponse, HttpError> {
        let url = format!(
            "{}/api/orders/{}",
            self.base_url,
            urlencoding::encode(order_id)
        );
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<OrderResponse, HttpError> {
        let url = format!(
            "{}/api/orders/{}/cancel",
            self.base_url,
            urlencoding::encode(order_id)
        );
        self.post(&url, &serde_json::json!({}), RetryPolicy::None)
            .await
    }

    pub async fn fill_order(
        &self,
        order_id: &str,
        request: &FillOrderRequest,
    ) -> Result<FillOrderResponse, HttpError> {
        let url = format!(
            "{}/api/orders/{}/fill",
            self.base_url,
            urlencoding::encode(order_id)
        );
        self.post(&url, request, RetryPolicy::None).await
    }

    pub async fn partial_fill_order(
        &self,
        order_id: &str,
        request: &FillOrderRequest,
    ) -> Result<FillOrderResponse, HttpError> {
        let url = format!(
            "{}/api/orders/{}/partial-fill",
            self.base_url,
            urlencoding::encode(order_id)
        );
        self.post(&url, request, RetryPolicy::None).await
    }

    // ── Health ───────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse, HttpError> {
        let url = format!("{}/health", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(config.retry_after_delay(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            400 | 422 => Err(HttpError::BadRequest(body_text)),
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// `Retry-After` in delay-seconds form, as milliseconds. HTTP-date values
/// are ignored.
fn parse_retry_after(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("2"), Some(2000));
        assert_eq!(parse_retry_after(" 0 "), Some(0));
        assert_eq!(parse_retry_after("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn test_base_url_trimmed() {
        let http = LiquidNationHttp::new("http://localhost:3000/").unwrap();
        assert_eq!(http.base_url(), "http://localhost:3000");
    }
}
