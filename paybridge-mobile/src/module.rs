//! Host-facing bridge module.
//!
//! One [`BridgeModule`] per embedding host. Each method mirrors a bridge
//! operation: it returns immediately and the outcome arrives later through
//! the supplied callback, exactly once. Lifecycle and wallet-listener events
//! from the host are forwarded to the bridge unchanged.

use std::sync::Arc;

use tracing::debug;

use paybridge_lib::host::HostContextProvider;
use paybridge_lib::results::{
    ApplePayOutcome, CardNonce, DeviceData, GooglePayNonce, PayPalAccountNonce,
};
use paybridge_lib::vendor::{VendorError, VendorSdk};
use paybridge_lib::{
    ApplePayConfig, BillingAgreementConfig, Bridge, BridgeError, CardConfig, ClientToken,
    GooglePayConfig, GooglePayListener, OneTimePaymentConfig,
};

use crate::async_bridge::{AsyncRuntime, ResultCallback};
use crate::HostError;

/// Adapts a host result callback to the bridge's Google Pay listener seam.
struct ListenerAdapter {
    callback: Arc<dyn ResultCallback<GooglePayNonce>>,
}

impl GooglePayListener for ListenerAdapter {
    fn on_success(&self, nonce: GooglePayNonce) {
        self.callback.on_success(nonce);
    }

    fn on_failure(&self, error: BridgeError) {
        self.callback.on_error(error.into());
    }
}

/// Callback-style facade over [`Bridge`] for host runtimes.
pub struct BridgeModule {
    runtime: AsyncRuntime,
    bridge: Arc<Bridge>,
}

impl BridgeModule {
    /// Create a module over the given vendor SDK and host-context provider.
    pub fn new(
        vendor: Arc<dyn VendorSdk>,
        host: Arc<dyn HostContextProvider>,
    ) -> Result<Self, HostError> {
        Ok(Self {
            runtime: AsyncRuntime::new()?,
            bridge: Arc::new(Bridge::new(vendor, host)),
        })
    }

    /// Request a PayPal billing agreement (vault) nonce.
    pub fn request_billing_agreement(
        &self,
        config: BillingAgreementConfig,
        callback: Arc<dyn ResultCallback<PayPalAccountNonce>>,
    ) {
        let bridge = Arc::clone(&self.bridge);
        self.runtime.spawn_with_callback(
            async move {
                bridge
                    .request_billing_agreement(config)
                    .await
                    .map_err(HostError::from)
            },
            callback,
        );
    }

    /// Request a PayPal one-time checkout nonce.
    pub fn request_one_time_payment(
        &self,
        config: OneTimePaymentConfig,
        callback: Arc<dyn ResultCallback<PayPalAccountNonce>>,
    ) {
        let bridge = Arc::clone(&self.bridge);
        self.runtime.spawn_with_callback(
            async move {
                bridge
                    .request_one_time_payment(config)
                    .await
                    .map_err(HostError::from)
            },
            callback,
        );
    }

    /// Tokenize raw card data.
    pub fn tokenize_card(&self, config: CardConfig, callback: Arc<dyn ResultCallback<CardNonce>>) {
        let bridge = Arc::clone(&self.bridge);
        self.runtime.spawn_with_callback(
            async move { bridge.tokenize_card(config).await.map_err(HostError::from) },
            callback,
        );
    }

    /// Collect device data for fraud correlation.
    pub fn collect_device_data(
        &self,
        client_token: ClientToken,
        callback: Arc<dyn ResultCallback<DeviceData>>,
    ) {
        let bridge = Arc::clone(&self.bridge);
        self.runtime.spawn_with_callback(
            async move {
                bridge
                    .collect_device_data(client_token)
                    .await
                    .map_err(HostError::from)
            },
            callback,
        );
    }

    /// Present the Apple Pay sheet.
    ///
    /// Sheet dismissal by the user arrives as a successful
    /// [`ApplePayOutcome::Cancelled`] marker, not through the error path.
    pub fn request_apple_pay(
        &self,
        config: ApplePayConfig,
        callback: Arc<dyn ResultCallback<ApplePayOutcome>>,
    ) {
        let bridge = Arc::clone(&self.bridge);
        self.runtime.spawn_with_callback(
            async move {
                bridge
                    .request_apple_pay(config)
                    .await
                    .map_err(HostError::from)
            },
            callback,
        );
    }

    /// Launch the Google Pay sheet.
    ///
    /// The callback only acknowledges the launch; the nonce or failure is
    /// delivered through the listener registered with
    /// [`BridgeModule::set_google_pay_listener`].
    pub fn request_google_pay(
        &self,
        config: GooglePayConfig,
        callback: Arc<dyn ResultCallback<()>>,
    ) {
        let bridge = Arc::clone(&self.bridge);
        self.runtime.spawn_with_callback(
            async move {
                bridge
                    .request_google_pay(config)
                    .await
                    .map_err(HostError::from)
            },
            callback,
        );
    }

    /// Register the host listener for Google Pay results.
    pub fn set_google_pay_listener(&self, callback: Arc<dyn ResultCallback<GooglePayNonce>>) {
        self.bridge
            .set_google_pay_listener(Arc::new(ListenerAdapter { callback }));
    }

    /// Host lifecycle hook: the host regained the foreground.
    ///
    /// Picks up a deferred browser-switch result, if one is stashed for the
    /// current context, and settles the pending request through it.
    pub fn on_host_resume(&self) {
        debug!("host resume");
        let bridge = Arc::clone(&self.bridge);
        self.runtime.spawn(async move {
            bridge.on_host_resume().await;
        });
    }

    /// Platform wallet callback: Google Pay produced a nonce.
    pub fn on_google_pay_success(&self, nonce: GooglePayNonce) {
        self.bridge.on_google_pay_success(nonce);
    }

    /// Platform wallet callback: Google Pay failed or was cancelled.
    pub fn on_google_pay_failure(&self, error: VendorError) {
        self.bridge.on_google_pay_failure(error);
    }

    /// Whether an operation is currently outstanding.
    pub fn has_pending_request(&self) -> bool {
        self.bridge.has_pending_request()
    }
}
