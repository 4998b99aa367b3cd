//! Wallet domain — read-only wallet sources and effective-address resolution.
//!
//! Connection, signing and chain switching live in the host's wallet
//! connector. This module only reads `{connected, address}` snapshots from it
//! and merges them with manually entered addresses.

use crate::shared::short_address;
use std::sync::{Arc, PoisonError, RwLock};

// ─── AddressNamespace ────────────────────────────────────────────────────────

/// The two address families an order can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressNamespace {
    /// UTXO-style Bitcoin (testnet4) addresses.
    Bitcoin,
    /// Account-based EVM addresses.
    Evm,
}

impl AddressNamespace {
    /// Leading characters kept when shortening a connected address.
    fn display_head(&self) -> usize {
        match self {
            Self::Bitcoin => 12,
            Self::Evm => 8,
        }
    }

    fn display_tail(&self) -> usize {
        6
    }
}

// ─── WalletSource ────────────────────────────────────────────────────────────

/// Point-in-time view of a connected (or disconnected) wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub connected: bool,
    /// Empty when no address is available.
    pub address: String,
}

impl WalletSnapshot {
    pub fn connected(address: &str) -> Self {
        Self {
            connected: true,
            address: address.to_string(),
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }
}

/// Read-only capability exposing the current state of one wallet.
///
/// Implementations are polled on every evaluation and must be cheap.
pub trait WalletSource: Send + Sync {
    fn snapshot(&self) -> WalletSnapshot;
}

impl WalletSource for WalletSnapshot {
    fn snapshot(&self) -> WalletSnapshot {
        self.clone()
    }
}

/// A wallet source the host updates as its connector reports changes.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SharedWallet {
    inner: Arc<RwLock<WalletSnapshot>>,
}

impl SharedWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, address: &str) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) =
            WalletSnapshot::connected(address);
    }

    pub fn disconnect(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) =
            WalletSnapshot::disconnected();
    }
}

impl WalletSource for SharedWallet {
    fn snapshot(&self) -> WalletSnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// The pair of wallet sources a draft reads from.
#[derive(Clone)]
pub struct WalletSources {
    pub btc: Arc<dyn WalletSource>,
    pub evm: Arc<dyn WalletSource>,
}

impl WalletSources {
    pub fn new(btc: impl WalletSource + 'static, evm: impl WalletSource + 'static) -> Self {
        Self {
            btc: Arc::new(btc),
            evm: Arc::new(evm),
        }
    }

    pub fn get(&self, namespace: AddressNamespace) -> &dyn WalletSource {
        match namespace {
            AddressNamespace::Bitcoin => self.btc.as_ref(),
            AddressNamespace::Evm => self.evm.as_ref(),
        }
    }
}

impl std::fmt::Debug for WalletSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSources")
            .field("btc", &self.btc.snapshot())
            .field("evm", &self.evm.snapshot())
            .finish()
    }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Manual override wins whenever it is non-empty.
pub fn effective_address(manual: &str, connected: &str) -> String {
    if manual.is_empty() {
        connected.to_string()
    } else {
        manual.to_string()
    }
}

/// Effective addresses after manual-override precedence. Derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddresses {
    pub btc: String,
    pub evm: String,
}

impl ResolvedAddresses {
    pub fn resolve(manual_btc: &str, manual_evm: &str, wallets: &WalletSources) -> Self {
        Self::from_snapshots(
            manual_btc,
            manual_evm,
            &wallets.btc.snapshot(),
            &wallets.evm.snapshot(),
        )
    }

    /// Resolve against wallet snapshots the caller already took.
    pub fn from_snapshots(
        manual_btc: &str,
        manual_evm: &str,
        btc: &WalletSnapshot,
        evm: &WalletSnapshot,
    ) -> Self {
        Self {
            btc: effective_address(manual_btc, &btc.address),
            evm: effective_address(manual_evm, &evm.address),
        }
    }

    /// True if at least one namespace has an address to submit with.
    pub fn any(&self) -> bool {
        !self.btc.is_empty() || !self.evm.is_empty()
    }

    pub fn btc_wallet(&self) -> Option<String> {
        non_empty(&self.btc)
    }

    pub fn evm_wallet(&self) -> Option<String> {
        non_empty(&self.evm)
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

// ─── AddressStatus ───────────────────────────────────────────────────────────

/// Which address a wallet field will use, for the help text beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressStatus {
    /// A manually entered address overrides the wallet.
    Manual,
    /// The connected wallet's address is used (shortened for display).
    Connected { short: String },
    /// Nothing to submit with: enter an address or connect a wallet.
    Missing,
}

impl AddressStatus {
    pub fn for_field(namespace: AddressNamespace, manual: &str, wallet: &WalletSnapshot) -> Self {
        if !manual.is_empty() {
            AddressStatus::Manual
        } else if wallet.connected && !wallet.address.is_empty() {
            AddressStatus::Connected {
                short: short_address(
                    &wallet.address,
                    namespace.display_head(),
                    namespace.display_tail(),
                ),
            }
        } else {
            AddressStatus::Missing
        }
    }
}
