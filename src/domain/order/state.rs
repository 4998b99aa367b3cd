//! Order draft state — the form controller behind "Create Order".
//!
//! The app owns one [`OrderDraftController`] per form session, feeds it field
//! updates and calls [`OrderDraftController::submit`]. The controller keeps
//! the draft, the current error message and the in-flight flag.
//!
//! Per submission attempt:
//!
//! ```text
//! Idle ─► Validating ─┬─► Idle (validation failed, error set)
//!                     └─► Submitting ─┬─► Idle (success, draft reset)
//!                                     └─► Idle (failure, error set, draft intact)
//! ```

use super::service::OrderService;
use super::{DraftConfig, DraftField, OrderDraft, OrderRecord, SubmissionPayload};
use crate::domain::theme::{AssetOption, ChipStyle, ThemeCatalog};
use crate::domain::wallet::{
    AddressNamespace, AddressStatus, ResolvedAddresses, WalletSnapshot, WalletSources,
};
use crate::error::{DraftError, SubmissionError, ValidationError};
use crate::shared::{parse_amount, AssetId};
use futures_util::future::{select, Either};
use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where the app should go after an order is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
        }
    }
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub record: OrderRecord,
    pub navigate_to: View,
}

#[derive(Debug)]
struct DraftState {
    draft: OrderDraft,
    error: Option<String>,
    submitting: bool,
}

/// Holds draft state, validates it and drives submission to an [`OrderService`].
///
/// State sits behind a mutex that is never held across an await, so
/// `submit(&self)` may be called while a previous call is pending; the second
/// call returns [`DraftError::Busy`].
pub struct OrderDraftController<S> {
    service: S,
    catalog: ThemeCatalog,
    wallets: WalletSources,
    config: DraftConfig,
    state: Mutex<DraftState>,
}

impl<S: OrderService> OrderDraftController<S> {
    pub fn new(
        service: S,
        catalog: ThemeCatalog,
        wallets: WalletSources,
        config: DraftConfig,
    ) -> Self {
        let draft = OrderDraft::new(&config.defaults);
        Self {
            service,
            catalog,
            wallets,
            config,
            state: Mutex::new(DraftState {
                draft,
                error: None,
                submitting: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DraftState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Field updates ────────────────────────────────────────────────────

    /// Unconditionally update one field. A previously shown error stays
    /// until the next submit attempt.
    pub fn set_field(&self, field: DraftField) {
        self.lock().draft.apply(field);
    }

    pub fn toggle_accepted_token(&self, token: AssetId) {
        self.lock().draft.toggle_accepted_token(token);
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn draft(&self) -> OrderDraft {
        self.lock().draft.clone()
    }

    /// The message to show above the submit button, if any.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().submitting
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Effective addresses for the current draft and wallet state.
    pub fn resolved_addresses(&self) -> ResolvedAddresses {
        let (btc, evm) = self.wallet_snapshots();
        let state = self.lock();
        ResolvedAddresses::from_snapshots(
            &state.draft.manual_btc_address,
            &state.draft.manual_evm_address,
            &btc,
            &evm,
        )
    }

    // Host wallet code runs before the state lock is taken, so a wallet
    // source may read this controller back.
    fn wallet_snapshots(&self) -> (WalletSnapshot, WalletSnapshot) {
        (self.wallets.btc.snapshot(), self.wallets.evm.snapshot())
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.service.is_loading() && self.resolved_addresses().any()
    }

    pub fn address_status(&self, namespace: AddressNamespace) -> AddressStatus {
        let wallet = self.wallets.get(namespace).snapshot();
        let state = self.lock();
        let manual = match namespace {
            AddressNamespace::Bitcoin => &state.draft.manual_btc_address,
            AddressNamespace::Evm => &state.draft.manual_evm_address,
        };
        AddressStatus::for_field(namespace, manual, &wallet)
    }

    /// Assets, chains and accepted tokens all come from the catalog.
    pub fn asset_options(&self) -> Vec<AssetOption<'_>> {
        self.catalog.options()
    }

    /// Chip style for `token`, reflecting whether it is currently accepted.
    pub fn token_chip(&self, token: &AssetId) -> Option<ChipStyle<'_>> {
        let selected = self.lock().draft.accepts(token);
        self.catalog.chip_style(token, selected)
    }

    // ── Submission ───────────────────────────────────────────────────────

    /// Validate the draft and send it to the order service.
    ///
    /// Checks run in a fixed order and stop at the first failure: wallet,
    /// amount, accepted tokens, then catalog membership. On success the draft
    /// is reset (manual addresses kept) and the caller is told to navigate to
    /// the dashboard. On failure the draft is left as entered.
    pub async fn submit(&self) -> Result<Submitted, DraftError> {
        let service_loading = self.service.is_loading();
        let (btc, evm) = self.wallet_snapshots();
        let payload = {
            let mut state = self.lock();
            if state.submitting || service_loading {
                tracing::warn!("Order submission already in progress, ignoring submit");
                return Err(DraftError::Busy);
            }
            state.error = None;

            let addresses = ResolvedAddresses::from_snapshots(
                &state.draft.manual_btc_address,
                &state.draft.manual_evm_address,
                &btc,
                &evm,
            );
            if let Err(e) = self.validate(&state.draft, &addresses) {
                tracing::debug!(reason = %e, "Order draft rejected");
                state.error = Some(e.to_string());
                return Err(e.into());
            }

            state.submitting = true;
            SubmissionPayload::assemble(&state.draft, &addresses)
        };
        let _in_flight = InFlight { state: &self.state };

        let result = self.send(&payload).await;

        let mut state = self.lock();
        match result {
            Ok(record) => {
                tracing::info!(order_id = %record.id, asset = %payload.asset, "Order created");
                state.draft.reset(&self.config.defaults);
                Ok(Submitted {
                    record,
                    navigate_to: View::Dashboard,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create order");
                state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    fn validate(
        &self,
        draft: &OrderDraft,
        addresses: &ResolvedAddresses,
    ) -> Result<(), ValidationError> {
        if !addresses.any() {
            return Err(ValidationError::NoWallet);
        }

        match parse_amount(&draft.amount) {
            Some(amount) if amount > Decimal::ZERO => {}
            _ => return Err(ValidationError::InvalidAmount),
        }

        if draft.accepted_tokens.is_empty() {
            return Err(ValidationError::NoAcceptedTokens);
        }

        let referenced = [&draft.asset, &draft.chain]
            .into_iter()
            .chain(draft.accepted_tokens.iter());
        for id in referenced {
            if !self.catalog.contains(id) {
                return Err(ValidationError::UnknownAsset(id.clone()));
            }
        }

        Ok(())
    }

    async fn send(&self, payload: &SubmissionPayload) -> Result<OrderRecord, SubmissionError> {
        let Some(limit) = self.config.submit_timeout else {
            return self.service.submit(payload).await;
        };

        let timer = futures_timer::Delay::new(limit);
        futures_util::pin_mut!(timer);
        match select(self.service.submit(payload), timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(SubmissionError::Timeout(limit)),
        }
    }
}

/// Clears the submitting flag when a submission ends, including when the
/// `submit` future is dropped before completing.
struct InFlight<'a> {
    state: &'a Mutex<DraftState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .submitting = false;
    }
}
