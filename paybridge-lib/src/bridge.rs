//! The Request Bridge.
//!
//! Owns the lifecycle of exactly one in-flight operation and guarantees
//! exactly-once settlement across racing vendor callbacks, host lifecycle
//! events, and out-of-process browser/app switches.
//!
//! Per operation: resolve the host context, authorize a vendor session,
//! dispatch exactly one vendor flow, suspend until the first terminal
//! signal, normalize and return. Configuration errors never reach the
//! vendor; vendor failures are normalized at the single settlement point.
//!
//! # Resource lifetime caveat
//!
//! No timeout is imposed. An abandoned out-of-process flow (the user never
//! returns from the external browser or wallet) leaves its caller pending
//! indefinitely; this mirrors vendor/host behavior and is accepted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::adapters;
use crate::config::{
    ApplePayConfig, BillingAgreementConfig, CardConfig, GooglePayConfig, OneTimePaymentConfig,
};
use crate::errors::{BridgeError, TokenizeFlow, Wallet};
use crate::host::HostContextProvider;
use crate::results::{ApplePayOutcome, CardNonce, DeviceData, GooglePayNonce, PayPalAccountNonce};
use crate::settlement::{self, Completion, FlowOutcome, SettleOnce};
use crate::vendor::{
    AccountNoncePayload, ApplePayEvent, CardPayload, RequestCode, VendorError, VendorSdk,
    VendorSession,
};
use crate::ClientToken;

/// Receives event-driven Google Pay results.
///
/// Google Pay is asymmetric by design: [`Bridge::request_google_pay`] only
/// covers launching the sheet, and the terminal outcome arrives here. The
/// bridge applies its one-shot guard before forwarding, so a listener sees
/// at most one terminal event per operation.
pub trait GooglePayListener: Send + Sync {
    /// The wallet delivered a payment method nonce.
    fn on_success(&self, nonce: GooglePayNonce);

    /// The wallet flow failed or was cancelled.
    fn on_failure(&self, error: BridgeError);
}

/// The single outstanding flight, typed by flow.
enum InFlight {
    PayPal {
        completion: Completion<AccountNoncePayload>,
        session: Arc<dyn VendorSession>,
    },
    Card(Completion<CardPayload>),
    DeviceData(Completion<String>),
    ApplePay(Completion<ApplePayEvent>),
    GooglePay(Arc<SettleOnce>),
}

impl InFlight {
    /// Abandon without settling; the superseded caller observes the closed
    /// channel and maps it to a terminal error.
    fn abandon(&self) {
        match self {
            Self::PayPal { completion, .. } => completion.abandon(),
            Self::Card(completion) => completion.abandon(),
            Self::DeviceData(completion) => completion.abandon(),
            Self::ApplePay(completion) => completion.abandon(),
            Self::GooglePay(guard) => {
                let _ = guard.settle();
            }
        }
    }
}

/// Single-flight asynchronous bridge over an opaque vendor SDK.
///
/// At most one request is pending per bridge instance; settlement happens
/// exactly once per request. See the module docs for the contract.
pub struct Bridge {
    vendor: Arc<dyn VendorSdk>,
    host: Arc<dyn HostContextProvider>,
    in_flight: Mutex<Option<(u64, InFlight)>>,
    next_flight: AtomicU64,
    google_pay_listener: Mutex<Option<Arc<dyn GooglePayListener>>>,
}

impl Bridge {
    /// Create a bridge over the given vendor SDK and host-context provider.
    pub fn new(vendor: Arc<dyn VendorSdk>, host: Arc<dyn HostContextProvider>) -> Self {
        Self {
            vendor,
            host,
            in_flight: Mutex::new(None),
            next_flight: AtomicU64::new(0),
            google_pay_listener: Mutex::new(None),
        }
    }

    /// Register the listener for event-driven Google Pay results.
    pub fn set_google_pay_listener(&self, listener: Arc<dyn GooglePayListener>) {
        *self
            .google_pay_listener
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(listener);
    }

    /// Request a PayPal billing agreement (vault) nonce.
    pub async fn request_billing_agreement(
        &self,
        config: BillingAgreementConfig,
    ) -> Result<PayPalAccountNonce, BridgeError> {
        let request = adapters::vault_request(&config);
        let session = self.authorize_session(&config.client_token)?;
        let (completion, rx) = settlement::pending();
        let flight = self.begin(InFlight::PayPal {
            completion: completion.clone(),
            session: Arc::clone(&session),
        });
        debug!("dispatching billing agreement tokenization");
        session.tokenize_vault(request, completion).await;
        let payload = self
            .settle(flight, rx, |message| BridgeError::Tokenize {
                flow: TokenizeFlow::Vault,
                message,
            })
            .await?;
        Ok(adapters::account_nonce(payload))
    }

    /// Request a PayPal one-time checkout nonce.
    pub async fn request_one_time_payment(
        &self,
        config: OneTimePaymentConfig,
    ) -> Result<PayPalAccountNonce, BridgeError> {
        let request = adapters::checkout_request(&config)?;
        let session = self.authorize_session(&config.client_token)?;
        let (completion, rx) = settlement::pending();
        let flight = self.begin(InFlight::PayPal {
            completion: completion.clone(),
            session: Arc::clone(&session),
        });
        debug!(intent = ?request.intent, "dispatching one-time payment tokenization");
        session.tokenize_checkout(request, completion).await;
        let payload = self
            .settle(flight, rx, |message| BridgeError::Tokenize {
                flow: TokenizeFlow::Checkout,
                message,
            })
            .await?;
        Ok(adapters::account_nonce(payload))
    }

    /// Tokenize raw card data.
    pub async fn tokenize_card(&self, config: CardConfig) -> Result<CardNonce, BridgeError> {
        let request = adapters::card_request(&config);
        let session = self.authorize_session(&config.client_token)?;
        let (completion, rx) = settlement::pending();
        let flight = self.begin(InFlight::Card(completion.clone()));
        debug!("dispatching card tokenization");
        session.tokenize_card(request, completion).await;
        let payload = self
            .settle(flight, rx, |message| BridgeError::Tokenize {
                flow: TokenizeFlow::Card,
                message,
            })
            .await?;
        Ok(adapters::card_nonce(payload))
    }

    /// Collect device data, yielding an opaque correlation id.
    pub async fn collect_device_data(
        &self,
        client_token: ClientToken,
    ) -> Result<DeviceData, BridgeError> {
        let session = self.authorize_session(&client_token)?;
        let (completion, rx) = settlement::pending();
        let flight = self.begin(InFlight::DeviceData(completion.clone()));
        debug!("dispatching device data collection");
        session.collect_device_data(completion).await;
        let correlation_id = self
            .settle(flight, rx, BridgeError::DataCollector)
            .await?;
        Ok(DeviceData::new(correlation_id))
    }

    /// Present the Apple Pay sheet and drive it to a terminal outcome.
    ///
    /// The user dismissing the sheet is a normal termination and returns
    /// `Ok(ApplePayOutcome::Cancelled { .. })`, not an error.
    pub async fn request_apple_pay(
        &self,
        config: ApplePayConfig,
    ) -> Result<ApplePayOutcome, BridgeError> {
        let request = adapters::payment_sheet_request(&config)?;
        let session = self.authorize_session(&config.client_token)?;
        if !session.can_make_apple_pay_payments() {
            return Err(BridgeError::PaymentNotSupported {
                wallet: Wallet::ApplePay,
                message: "device cannot make payments with the supported networks".to_string(),
            });
        }
        let (completion, rx) = settlement::pending();
        let flight = self.begin(InFlight::ApplePay(completion.clone()));
        debug!("presenting Apple Pay sheet");
        session.present_apple_pay(request, completion).await;
        let event = self
            .settle(flight, rx, |message| BridgeError::Tokenize {
                flow: TokenizeFlow::ApplePay,
                message,
            })
            .await?;
        match event {
            ApplePayEvent::Authorized { nonce, method_type } => {
                debug!(method_type = method_type.as_str(), "Apple Pay authorized");
                Ok(ApplePayOutcome::authorized(nonce))
            }
            ApplePayEvent::SheetDismissed => Ok(ApplePayOutcome::cancelled()),
            ApplePayEvent::RequestFailed(message) => Err(BridgeError::PaymentRequest(message)),
            ApplePayEvent::PresentationFailed(message) => Err(BridgeError::PaymentSheet(message)),
            ApplePayEvent::TokenizeFailed(message) => Err(BridgeError::Tokenize {
                flow: TokenizeFlow::ApplePay,
                message,
            }),
        }
    }

    /// Launch the Google Pay sheet.
    ///
    /// Asymmetric result channel: `Ok(())` only means the sheet was
    /// launched. The nonce or failure arrives through the registered
    /// [`GooglePayListener`] via [`Bridge::on_google_pay_success`] /
    /// [`Bridge::on_google_pay_failure`].
    pub async fn request_google_pay(&self, config: GooglePayConfig) -> Result<(), BridgeError> {
        let request = adapters::google_pay_request(&config)?;
        let session = self.authorize_session(&config.client_token)?;
        if !session.is_google_pay_ready().await {
            return Err(BridgeError::PaymentNotSupported {
                wallet: Wallet::GooglePay,
                message: "Google Pay is not ready on this device".to_string(),
            });
        }
        self.begin(InFlight::GooglePay(Arc::new(SettleOnce::new())));
        debug!("launching Google Pay sheet");
        session
            .request_google_pay(request)
            .await
            .map_err(|error| {
                self.clear_google_pay();
                BridgeError::from_vendor(error, BridgeError::google_pay)
            })
    }

    /// Platform success callback for Google Pay. First signal wins; later
    /// signals for the same operation are no-ops.
    pub fn on_google_pay_success(&self, nonce: GooglePayNonce) {
        if !self.settle_google_pay() {
            debug!("late Google Pay success ignored");
            return;
        }
        match self.listener() {
            Some(listener) => listener.on_success(nonce),
            None => warn!("Google Pay result dropped: no listener registered"),
        }
    }

    /// Platform failure callback for Google Pay.
    pub fn on_google_pay_failure(&self, error: VendorError) {
        if !self.settle_google_pay() {
            debug!("late Google Pay failure ignored");
            return;
        }
        let normalized = BridgeError::from_vendor(error, BridgeError::google_pay);
        match self.listener() {
            Some(listener) => listener.on_failure(normalized),
            None => warn!("Google Pay failure dropped: no listener registered"),
        }
    }

    /// Host lifecycle hook: the host regained the foreground.
    ///
    /// Asks the vendor session of the pending PayPal flight for a deferred
    /// browser-switch result; if one exists for the current context and its
    /// request code matches, it is routed through the same settle path as an
    /// in-process callback. Anything else is a no-op.
    pub async fn on_host_resume(&self) {
        let Some(host) = self.host.current() else {
            return;
        };
        let (session, completion) = {
            let slot = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            match slot.as_ref() {
                Some((_, InFlight::PayPal { completion, session })) => {
                    (Arc::clone(session), completion.clone())
                }
                _ => return,
            }
        };
        let Some(result) = session.take_browser_switch_result(&host) else {
            return;
        };
        if result.request_code != RequestCode::PayPal {
            debug!(code = ?result.request_code, "ignoring browser switch result for foreign request code");
            return;
        }
        debug!("delivering deferred browser switch result");
        session.resume_browser_switch(result, completion).await;
    }

    /// Whether a request is currently outstanding.
    pub fn has_pending_request(&self) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Resolve the host context and authorize a vendor session.
    ///
    /// Both failure modes — no foreground context, unusable token — surface
    /// as `ClientInitializationError` with zero vendor flow interaction.
    fn authorize_session(
        &self,
        token: &ClientToken,
    ) -> Result<Arc<dyn VendorSession>, BridgeError> {
        let host = self.host.current().ok_or_else(|| {
            BridgeError::client_initialization("no foreground host context available")
        })?;
        if token.is_empty() {
            return Err(BridgeError::client_initialization("empty client token"));
        }
        self.vendor
            .authorize(&host, token)
            .map_err(|e| BridgeError::client_initialization(e.to_string()))
    }

    /// Install a new flight, abandoning any outstanding one.
    fn begin(&self, flight: InFlight) -> u64 {
        let id = self.next_flight.fetch_add(1, Ordering::Relaxed);
        let mut slot = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((previous, old)) = slot.take() {
            warn!(flight = previous, "replacing outstanding request");
            old.abandon();
        }
        *slot = Some((id, flight));
        id
    }

    /// Remove the flight if it is still the current one.
    fn clear(&self, id: u64) {
        let mut slot = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if matches!(slot.as_ref(), Some((current, _)) if *current == id) {
            *slot = None;
        }
    }

    /// Await the first terminal signal, clear the flight, and normalize.
    async fn settle<T>(
        &self,
        flight: u64,
        rx: oneshot::Receiver<FlowOutcome<T>>,
        fallback: impl FnOnce(String) -> BridgeError,
    ) -> Result<T, BridgeError> {
        let outcome = rx.await;
        self.clear(flight);
        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(vendor)) => Err(BridgeError::from_vendor(vendor, fallback)),
            // Sender dropped without settling: a newer request replaced us.
            Err(_) => Err(BridgeError::superseded()),
        }
    }

    /// Consume the Google Pay latch, if a Google Pay flight is pending.
    fn settle_google_pay(&self) -> bool {
        let mut slot = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let settled = matches!(
            slot.as_ref(),
            Some((_, InFlight::GooglePay(guard))) if guard.settle()
        );
        if settled {
            *slot = None;
        }
        settled
    }

    /// Drop a Google Pay flight whose launch failed.
    fn clear_google_pay(&self) {
        let mut slot = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if matches!(slot.as_ref(), Some((_, InFlight::GooglePay(_)))) {
            *slot = None;
        }
    }

    fn listener(&self) -> Option<Arc<dyn GooglePayListener>> {
        self.google_pay_listener
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("pending", &self.has_pending_request())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixtures, MockVendor, PayPalScript, StaticHostContext};

    fn bridge_with(vendor: MockVendor) -> Bridge {
        Bridge::new(Arc::new(vendor), Arc::new(StaticHostContext::foreground()))
    }

    #[tokio::test]
    async fn missing_host_context_fails_before_vendor() {
        let vendor = MockVendor::new();
        let bridge = Bridge::new(
            Arc::new(vendor.clone()),
            Arc::new(StaticHostContext::none()),
        );
        let err = bridge
            .collect_device_data(ClientToken::new("token-1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ClientInitialization);
        assert_eq!(vendor.sessions_built(), 0);
    }

    #[tokio::test]
    async fn empty_token_fails_before_vendor() {
        let vendor = MockVendor::new();
        let bridge = bridge_with(vendor.clone());
        let err = bridge
            .collect_device_data(ClientToken::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ClientInitialization);
        assert_eq!(vendor.sessions_built(), 0);
    }

    #[tokio::test]
    async fn slot_is_cleared_after_settlement() {
        let vendor = MockVendor::new();
        let bridge = bridge_with(vendor);
        let nonce = bridge
            .tokenize_card(fixtures::card_config())
            .await
            .unwrap();
        assert!(!nonce.nonce.is_empty());
        assert!(!bridge.has_pending_request());
    }

    #[tokio::test]
    async fn superseded_request_settles_with_platform_error() {
        let vendor = MockVendor::new();
        vendor.script_paypal(PayPalScript::BrowserSwitch(fixtures::account_nonce_payload(
            "pp-old",
        )));
        let bridge = Arc::new(bridge_with(vendor.clone()));

        let first = {
            let bridge = Arc::clone(&bridge);
            tokio::spawn(async move {
                bridge
                    .request_billing_agreement(fixtures::billing_agreement_config())
                    .await
            })
        };
        // Wait until the first flight parks in the slot.
        while !bridge.has_pending_request() {
            tokio::task::yield_now().await;
        }

        vendor.script_paypal(PayPalScript::Succeed(fixtures::account_nonce_payload(
            "pp-new",
        )));
        let second = bridge
            .request_one_time_payment(fixtures::one_time_payment_config())
            .await
            .unwrap();
        assert_eq!(second.nonce, "pp-new");

        let superseded = first.await.unwrap().unwrap_err();
        assert_eq!(superseded.kind(), crate::ErrorKind::GenericPlatform);
    }

    #[tokio::test]
    async fn resume_with_foreign_request_code_is_a_noop() {
        let vendor = MockVendor::new();
        vendor.script_paypal(PayPalScript::BrowserSwitch(fixtures::account_nonce_payload(
            "pp-1",
        )));
        vendor.stash_request_code(RequestCode::GooglePay);
        let bridge = Arc::new(bridge_with(vendor));

        let pending = {
            let bridge = Arc::clone(&bridge);
            tokio::spawn(async move {
                bridge
                    .request_billing_agreement(fixtures::billing_agreement_config())
                    .await
            })
        };
        while !bridge.has_pending_request() {
            tokio::task::yield_now().await;
        }

        bridge.on_host_resume().await;
        assert!(bridge.has_pending_request());
        assert!(!pending.is_finished());
        pending.abort();
    }
}
