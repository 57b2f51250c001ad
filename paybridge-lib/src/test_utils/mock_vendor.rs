//! Scripted in-memory vendor.
//!
//! [`MockVendor`] implements both vendor traits; each flow is scripted per
//! test through interior mutability, and every dispatched request is
//! recorded for assertions. Clones share state, so a test can keep a handle
//! while the bridge owns another.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::host::{HostContextProvider, HostHandle};
use crate::settlement::Completion;
use crate::vendor::{
    AccountNoncePayload, ApplePayEvent, BrowserSwitchResult, CardPayload, CardRequest,
    CheckoutRequest, GooglePayRequest, PaymentMethodType, PaymentSheetRequest, RequestCode,
    VaultRequest, VendorError, VendorSdk, VendorSession,
};
use crate::ClientToken;

/// How a PayPal vault/checkout flow should behave.
#[derive(Clone, Debug)]
pub enum PayPalScript {
    /// Settle immediately with this payload.
    Succeed(AccountNoncePayload),
    /// Settle immediately with this failure.
    Fail(VendorError),
    /// Fire a success and then a redundant failure for the same request.
    SettleTwice(AccountNoncePayload, VendorError),
    /// Do not settle in-process; stash the payload as a browser-switch
    /// result to be delivered on host resume.
    BrowserSwitch(AccountNoncePayload),
}

/// How card tokenization should behave.
#[derive(Clone, Debug)]
pub enum CardScript {
    /// Settle with a stub nonce derived from the request.
    Succeed,
    /// Settle with this failure.
    Fail(VendorError),
}

/// How device-data collection should behave.
#[derive(Clone, Debug)]
pub enum DeviceDataScript {
    /// Settle with this correlation id.
    Succeed(String),
    /// Settle with this failure.
    Fail(VendorError),
}

/// How the Apple Pay sheet should terminate.
#[derive(Clone, Debug)]
pub struct ApplePayScript(pub ApplePayEvent);

#[derive(Default)]
struct Recorded {
    vault: Option<VaultRequest>,
    checkout: Option<CheckoutRequest>,
    card: Option<CardRequest>,
    sheet: Option<PaymentSheetRequest>,
    google_pay: Option<GooglePayRequest>,
}

struct Inner {
    sessions_built: AtomicUsize,
    authorize_error: Mutex<Option<VendorError>>,
    paypal: Mutex<PayPalScript>,
    card: Mutex<CardScript>,
    device_data: Mutex<DeviceDataScript>,
    apple_pay: Mutex<ApplePayScript>,
    can_make_apple_pay: AtomicBool,
    google_pay_ready: AtomicBool,
    google_pay_launch_error: Mutex<Option<VendorError>>,
    stash_code: Mutex<RequestCode>,
    stash: Mutex<Option<BrowserSwitchResult>>,
    recorded: Mutex<Recorded>,
}

/// Scripted vendor shared by handle.
#[derive(Clone)]
pub struct MockVendor {
    inner: Arc<Inner>,
}

impl Default for MockVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVendor {
    /// A vendor where every flow succeeds with stub data.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                sessions_built: AtomicUsize::new(0),
                authorize_error: Mutex::new(None),
                paypal: Mutex::new(PayPalScript::Succeed(AccountNoncePayload {
                    nonce: "fake-paypal-nonce-1".to_string(),
                    ..AccountNoncePayload::default()
                })),
                card: Mutex::new(CardScript::Succeed),
                device_data: Mutex::new(DeviceDataScript::Succeed(
                    "fake-device-data-1".to_string(),
                )),
                apple_pay: Mutex::new(ApplePayScript(ApplePayEvent::Authorized {
                    nonce: "fake-apple-pay-nonce-1".to_string(),
                    method_type: PaymentMethodType::Debit,
                })),
                can_make_apple_pay: AtomicBool::new(true),
                google_pay_ready: AtomicBool::new(true),
                google_pay_launch_error: Mutex::new(None),
                stash_code: Mutex::new(RequestCode::PayPal),
                stash: Mutex::new(None),
                recorded: Mutex::new(Recorded::default()),
            }),
        }
    }

    /// Make session authorization fail.
    pub fn fail_authorize(&self, error: VendorError) {
        *self.lock(&self.inner.authorize_error) = Some(error);
    }

    /// Script the PayPal vault/checkout flows.
    pub fn script_paypal(&self, script: PayPalScript) {
        *self.lock(&self.inner.paypal) = script;
    }

    /// Script card tokenization.
    pub fn script_card(&self, script: CardScript) {
        *self.lock(&self.inner.card) = script;
    }

    /// Script device-data collection.
    pub fn script_device_data(&self, script: DeviceDataScript) {
        *self.lock(&self.inner.device_data) = script;
    }

    /// Script the Apple Pay sheet's terminal event.
    pub fn script_apple_pay(&self, event: ApplePayEvent) {
        *self.lock(&self.inner.apple_pay) = ApplePayScript(event);
    }

    /// Toggle the Apple Pay capability probe.
    pub fn set_can_make_apple_pay(&self, can: bool) {
        self.inner.can_make_apple_pay.store(can, Ordering::SeqCst);
    }

    /// Toggle the Google Pay readiness probe.
    pub fn set_google_pay_ready(&self, ready: bool) {
        self.inner.google_pay_ready.store(ready, Ordering::SeqCst);
    }

    /// Make the Google Pay sheet launch fail.
    pub fn fail_google_pay_launch(&self, error: VendorError) {
        *self.lock(&self.inner.google_pay_launch_error) = Some(error);
    }

    /// Request code attached to the next stashed browser-switch result.
    pub fn stash_request_code(&self, code: RequestCode) {
        *self.lock(&self.inner.stash_code) = code;
    }

    /// How many sessions `authorize` produced.
    pub fn sessions_built(&self) -> usize {
        self.inner.sessions_built.load(Ordering::SeqCst)
    }

    /// Whether a browser-switch result is still stashed.
    pub fn has_stashed_result(&self) -> bool {
        self.lock(&self.inner.stash).is_some()
    }

    /// The last dispatched vault request.
    pub fn last_vault_request(&self) -> Option<VaultRequest> {
        self.lock(&self.inner.recorded).vault.clone()
    }

    /// The last dispatched checkout request.
    pub fn last_checkout_request(&self) -> Option<CheckoutRequest> {
        self.lock(&self.inner.recorded).checkout.clone()
    }

    /// The last dispatched card request.
    pub fn last_card_request(&self) -> Option<CardRequest> {
        self.lock(&self.inner.recorded).card.clone()
    }

    /// The last dispatched payment sheet request.
    pub fn last_sheet_request(&self) -> Option<PaymentSheetRequest> {
        self.lock(&self.inner.recorded).sheet.clone()
    }

    /// The last dispatched Google Pay request.
    pub fn last_google_pay_request(&self) -> Option<GooglePayRequest> {
        self.lock(&self.inner.recorded).google_pay.clone()
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn run_paypal(&self, completion: Completion<AccountNoncePayload>) {
        match self.lock(&self.inner.paypal).clone() {
            PayPalScript::Succeed(payload) => {
                completion.success(payload);
            }
            PayPalScript::Fail(error) => {
                completion.failure(error);
            }
            PayPalScript::SettleTwice(payload, error) => {
                completion.success(payload);
                completion.failure(error);
            }
            PayPalScript::BrowserSwitch(payload) => {
                let code = *self.lock(&self.inner.stash_code);
                *self.lock(&self.inner.stash) = Some(BrowserSwitchResult {
                    request_code: code,
                    payload: serde_json::to_value(payload)
                        .unwrap_or(serde_json::Value::Null),
                });
            }
        }
    }
}

impl VendorSdk for MockVendor {
    fn authorize(
        &self,
        _host: &HostHandle,
        _token: &ClientToken,
    ) -> Result<Arc<dyn VendorSession>, VendorError> {
        if let Some(error) = self.lock(&self.inner.authorize_error).clone() {
            return Err(error);
        }
        self.inner.sessions_built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl VendorSession for MockVendor {
    async fn tokenize_vault(
        &self,
        request: VaultRequest,
        completion: Completion<AccountNoncePayload>,
    ) {
        self.lock(&self.inner.recorded).vault = Some(request);
        self.run_paypal(completion);
    }

    async fn tokenize_checkout(
        &self,
        request: CheckoutRequest,
        completion: Completion<AccountNoncePayload>,
    ) {
        self.lock(&self.inner.recorded).checkout = Some(request);
        self.run_paypal(completion);
    }

    async fn tokenize_card(&self, request: CardRequest, completion: Completion<CardPayload>) {
        let script = self.lock(&self.inner.card).clone();
        match script {
            CardScript::Succeed => {
                let digits: String = request.number.chars().filter(|c| c.is_ascii_digit()).collect();
                let last_four = digits.len().checked_sub(4).map(|at| digits[at..].to_string());
                let last_two = digits.len().checked_sub(2).map(|at| digits[at..].to_string());
                self.lock(&self.inner.recorded).card = Some(request.clone());
                completion.success(CardPayload {
                    nonce: "fake-nonce-1".to_string(),
                    card_network: Some("Visa".to_string()),
                    last_two,
                    last_four,
                    expiration_month: Some(request.expiration_month),
                    expiration_year: Some(request.expiration_year),
                });
            }
            CardScript::Fail(error) => {
                self.lock(&self.inner.recorded).card = Some(request);
                completion.failure(error);
            }
        }
    }

    async fn collect_device_data(&self, completion: Completion<String>) {
        match self.lock(&self.inner.device_data).clone() {
            DeviceDataScript::Succeed(correlation_id) => {
                completion.success(correlation_id);
            }
            DeviceDataScript::Fail(error) => {
                completion.failure(error);
            }
        }
    }

    fn can_make_apple_pay_payments(&self) -> bool {
        self.inner.can_make_apple_pay.load(Ordering::SeqCst)
    }

    async fn present_apple_pay(
        &self,
        request: PaymentSheetRequest,
        completion: Completion<ApplePayEvent>,
    ) {
        self.lock(&self.inner.recorded).sheet = Some(request);
        let ApplePayScript(event) = self.lock(&self.inner.apple_pay).clone();
        completion.success(event);
    }

    async fn is_google_pay_ready(&self) -> bool {
        self.inner.google_pay_ready.load(Ordering::SeqCst)
    }

    async fn request_google_pay(&self, request: GooglePayRequest) -> Result<(), VendorError> {
        self.lock(&self.inner.recorded).google_pay = Some(request);
        match self.lock(&self.inner.google_pay_launch_error).clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn take_browser_switch_result(&self, _host: &HostHandle) -> Option<BrowserSwitchResult> {
        self.lock(&self.inner.stash).take()
    }

    async fn resume_browser_switch(
        &self,
        result: BrowserSwitchResult,
        completion: Completion<AccountNoncePayload>,
    ) {
        match serde_json::from_value::<AccountNoncePayload>(result.payload) {
            Ok(payload) => {
                completion.success(payload);
            }
            Err(e) => {
                completion.failure(VendorError::Other(e.to_string()));
            }
        }
    }
}

/// Host-context provider with a fixed answer.
pub struct StaticHostContext(Option<HostHandle>);

impl StaticHostContext {
    /// A provider that always reports a foreground context.
    pub fn foreground() -> Self {
        Self(Some(HostHandle::new("main-activity")))
    }

    /// A provider with no available context.
    pub fn none() -> Self {
        Self(None)
    }
}

impl HostContextProvider for StaticHostContext {
    fn current(&self) -> Option<HostHandle> {
        self.0.clone()
    }
}
