//! # Liquid Nation SDK
//!
//! Client-side core for the Liquid Nation peer-to-peer cross-chain order app.
//!
//! ## Architecture
//!
//! 1. **Core** — Shared newtypes, the theme catalog, wallet resolution and the
//!    order draft controller (always available, WASM-safe)
//! 2. **HTTP API** — `LiquidNationHttp` with per-endpoint retry policies
//! 3. **High-Level Client** — `LiquidNationClient` with an orders sub-client,
//!    an order cache and a draft-controller factory
//!
//! Wallet connection and signing stay with the host's wallet connector; the
//! SDK only reads `{connected, address}` snapshots through [`WalletSource`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use liquid_nation_sdk::prelude::*;
//!
//! let client = LiquidNationClient::builder()
//!     .base_url("http://localhost:3000")
//!     .build()?;
//!
//! let btc = SharedWallet::new();
//! let form = client.draft(btc.clone(), SharedWallet::new());
//!
//! form.set_field(DraftField::ManualBtcAddress("tb1q...".into()));
//! form.set_field(DraftField::Amount("1.5".into()));
//! form.toggle_accepted_token(AssetId::from("ETH"));
//!
//! match form.submit().await {
//!     Ok(done) => navigate(done.navigate_to.as_str()),
//!     Err(e) => show_error(form.error().unwrap_or_else(|| e.to_string())),
//! }
//! ```
//!
//! [`WalletSource`]: domain::wallet::WalletSource

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and input helpers.
pub mod shared;

/// Domain modules (vertical slices): order, theme, wallet.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `LiquidNationClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::AssetId;

    // Domain types — order
    pub use crate::domain::order::wire::{OrderQuery, SpellData};
    pub use crate::domain::order::{
        DraftConfig, DraftDefaults, DraftField, FillReceipt, OrderDraft, OrderDraftController,
        OrderRecord, OrderService, OrderStatus, OrderType, SubmissionPayload, Submitted, View,
    };

    // Domain types — theme
    pub use crate::domain::theme::{AssetOption, ChainTheme, ChipStyle, ThemeCatalog};

    // Domain types — wallet
    pub use crate::domain::wallet::{
        AddressNamespace, AddressStatus, ResolvedAddresses, SharedWallet, WalletSnapshot,
        WalletSource, WalletSources,
    };

    // Errors
    pub use crate::error::{DraftError, SdkError, SubmissionError, ValidationError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{LiquidNationClient, LiquidNationClientBuilder, OrdersClient};
    #[cfg(feature = "http")]
    pub use crate::domain::order::HttpOrderService;
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
