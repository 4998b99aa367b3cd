//! High-level client — `LiquidNationClient` with nested sub-client accessors.
//!
//! Keeps the builder, the shared order cache, the theme catalog and the
//! draft configuration, and hands out draft controllers wired to the
//! order API.

use crate::domain::order::client::Orders;
use crate::domain::order::wire::HealthResponse;
use crate::domain::order::{DraftConfig, HttpOrderService, OrderDraftController, OrderRecord};
use crate::domain::theme::ThemeCatalog;
use crate::domain::wallet::{WalletSource, WalletSources};
use crate::error::SdkError;
use crate::http::LiquidNationHttp;

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use crate::domain::order::client::Orders as OrdersClient;

/// The primary entry point for the Liquid Nation SDK.
#[derive(Clone)]
pub struct LiquidNationClient {
    pub(crate) http: LiquidNationHttp,
    pub(crate) catalog: ThemeCatalog,
    pub(crate) draft_config: DraftConfig,
    /// Order cache: id → (OrderRecord, fetched_at)
    pub(crate) order_cache: Arc<RwLock<HashMap<String, (OrderRecord, Instant)>>>,
    pub(crate) order_cache_ttl: Duration,
}

impl LiquidNationClient {
    pub fn builder() -> LiquidNationClientBuilder {
        LiquidNationClientBuilder::default()
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn http(&self) -> &LiquidNationHttp {
        &self.http
    }

    /// Start a new order form session reading from the given wallets.
    ///
    /// Form state is per session; the order service shares this client's
    /// HTTP connection pool.
    pub fn draft(
        &self,
        btc_wallet: impl WalletSource + 'static,
        evm_wallet: impl WalletSource + 'static,
    ) -> OrderDraftController<HttpOrderService> {
        OrderDraftController::new(
            HttpOrderService::new(self.http.clone()),
            self.catalog.clone(),
            WalletSources::new(btc_wallet, evm_wallet),
            self.draft_config.clone(),
        )
    }

    pub async fn health(&self) -> Result<HealthResponse, SdkError> {
        Ok(self.http.health().await?)
    }

    pub async fn clear_order_cache(&self) {
        self.order_cache.write().await.clear();
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct LiquidNationClientBuilder {
    base_url: String,
    catalog: ThemeCatalog,
    draft_config: DraftConfig,
    order_cache_ttl: Duration,
}

impl Default for LiquidNationClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            catalog: ThemeCatalog::liquid_nation(),
            draft_config: DraftConfig::default(),
            order_cache_ttl: Duration::from_secs(60),
        }
    }
}

impl LiquidNationClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn theme_catalog(mut self, catalog: ThemeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn draft_config(mut self, config: DraftConfig) -> Self {
        self.draft_config = config;
        self
    }

    pub fn submit_timeout(mut self, timeout: Duration) -> Self {
        self.draft_config.submit_timeout = Some(timeout);
        self
    }

    pub fn order_cache_ttl(mut self, ttl: Duration) -> Self {
        self.order_cache_ttl = ttl;
        self
    }

    /// Build the client. Fails if the draft defaults name an asset or chain
    /// missing from the theme catalog.
    pub fn build(self) -> Result<LiquidNationClient, SdkError> {
        let defaults = &self.draft_config.defaults;
        for id in [&defaults.asset, &defaults.chain] {
            if !self.catalog.contains(id) {
                return Err(SdkError::Validation(format!(
                    "Draft default {} is not in the theme catalog",
                    id
                )));
            }
        }

        Ok(LiquidNationClient {
            http: LiquidNationHttp::new(&self.base_url)?,
            catalog: self.catalog,
            draft_config: self.draft_config,
            order_cache: Arc::new(RwLock::new(HashMap::new())),
            order_cache_ttl: self.order_cache_ttl,
        })
    }
}
