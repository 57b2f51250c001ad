//! Opaque vendor SDK seam.
//!
//! The bridge never talks to a payment provider directly; it drives the
//! [`VendorSdk`] / [`VendorSession`] traits and treats everything behind them
//! (network calls, native UI, app switches) as an external collaborator.
//! Production builds wire a real SDK adapter in; tests inject the scripted
//! mock from [`crate::test_utils`].
//!
//! Vendor flows report completion through a [`Completion`] handle. Vendors
//! are observed to fire more than one terminal signal for a single request;
//! the handle absorbs every signal after the first.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{CheckoutIntent, GooglePayEnvironment, UserAction};
use crate::host::HostHandle;
use crate::settlement::Completion;
use crate::ClientToken;

/// Explicit `"true"`/`"false"` rendering for wire booleans.
///
/// The host runtime convention serializes booleans as string enums across
/// the process boundary; the API keeps real `bool`s and this module confines
/// the quirk to the vendor wire structs.
pub mod bool_string {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a bool as `"true"` or `"false"`.
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    /// Deserialize `"true"` or `"false"` back into a bool.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", got {other:?}"
            ))),
        }
    }
}

/// Failure signals a vendor flow can emit.
///
/// This is the heterogeneous input to the error normalizer; see
/// [`crate::errors::BridgeError::from_vendor`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VendorError {
    /// The user backed out of the vendor flow.
    #[error("user canceled the vendor flow")]
    Canceled,

    /// A feature is disabled in the merchant configuration.
    #[error("{feature} is disabled in the merchant configuration")]
    Disabled {
        /// The disabled feature, e.g. `"paypal"`.
        feature: String,
    },

    /// Any other vendor failure (network, rejection, presentation).
    #[error("{0}")]
    Other(String),
}

/// Request codes keying out-of-process round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestCode {
    /// PayPal vault/checkout browser switch.
    PayPal,
    /// Card tokenization.
    Card,
    /// Apple Pay sheet.
    ApplePay,
    /// Google Pay sheet.
    GooglePay,
}

/// A deferred result stashed by the vendor while the host was backgrounded.
///
/// The payload is opaque to the bridge; only the request code is inspected
/// to route the result back to the flow that started it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSwitchResult {
    /// Which flow the result belongs to.
    pub request_code: RequestCode,
    /// Vendor-shaped payload, passed back to the vendor for decoding.
    pub payload: serde_json::Value,
}

/// Vendor-native PayPal vault request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRequest {
    /// Description shown on the agreement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_agreement_description: Option<String>,
    /// Merchant display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Locale for the vendor UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_code: Option<String>,
    /// Pre-filled user email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_authentication_email: Option<String>,
    /// Offer PayPal Credit.
    #[serde(with = "bool_string")]
    pub offer_credit: bool,
    /// Request a shipping address.
    #[serde(with = "bool_string")]
    pub is_shipping_address_required: bool,
    /// Allow editing the shipping address.
    #[serde(with = "bool_string")]
    pub is_shipping_address_editable: bool,
    /// Accessibility flag for the vendor UI.
    #[serde(with = "bool_string")]
    pub is_accessibility_element: bool,
}

/// Vendor-native PayPal checkout request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Payment amount.
    pub amount: String,
    /// ISO currency code; always present, defaulted by the adapter.
    pub currency_code: String,
    /// Checkout intent.
    pub intent: CheckoutIntent,
    /// Button behavior.
    pub user_action: UserAction,
    /// Offer Pay Later.
    #[serde(with = "bool_string")]
    pub offer_pay_later: bool,
    /// Also vault the account.
    #[serde(with = "bool_string")]
    pub request_billing_agreement: bool,
}

/// Vendor-native card tokenization request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    /// Card number.
    pub number: String,
    /// Expiration month.
    pub expiration_month: String,
    /// Expiration year.
    pub expiration_year: String,
    /// Card verification value.
    pub cvv: String,
    /// Billing postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Card networks offered on the Apple Pay sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardNetwork {
    /// American Express.
    Amex,
    /// Discover.
    Discover,
    /// Mastercard.
    MasterCard,
    /// Visa.
    Visa,
    /// Interac.
    Interac,
    /// JCB.
    Jcb,
}

/// Networks the payment sheet accepts, in presentation order.
pub const SUPPORTED_NETWORKS: [CardNetwork; 6] = [
    CardNetwork::Amex,
    CardNetwork::Discover,
    CardNetwork::MasterCard,
    CardNetwork::Visa,
    CardNetwork::Interac,
    CardNetwork::Jcb,
];

/// Vendor-native Apple Pay payment sheet request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSheetRequest {
    /// Payment amount.
    pub amount: String,
    /// Apple merchant identifier.
    pub merchant_id: String,
    /// Label on the summary item.
    pub merchant_name: String,
    /// ISO currency code; defaulted by the adapter.
    pub currency_code: String,
    /// ISO country code; defaulted by the adapter.
    pub country_code: String,
    /// Accepted card networks.
    pub supported_networks: Vec<CardNetwork>,
}

/// Vendor-native Google Pay request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayRequest {
    /// Total price for the transaction.
    pub total_price: String,
    /// ISO currency code; defaulted by the adapter.
    pub currency_code: String,
    /// Require a phone number from the wallet.
    #[serde(with = "bool_string")]
    pub is_phone_number_required: bool,
    /// Require a shipping address from the wallet.
    #[serde(with = "bool_string")]
    pub is_shipping_address_required: bool,
    /// Wallet environment.
    pub environment: GooglePayEnvironment,
}

/// Raw PayPal account payload as the vendor reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNoncePayload {
    /// Single-use token.
    pub nonce: String,
    /// Payer email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Vendor payer identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    /// Payer first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Payer last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Billing address fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<AddressPayload>,
    /// Shipping address fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressPayload>,
}

/// Raw vendor address payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    /// Addressee name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    /// First street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    /// Second street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_address: Option<String>,
    /// City or locality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// Two-letter country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code_alpha2: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// State, province or region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Raw card payload as the vendor reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    /// Single-use token.
    pub nonce: String,
    /// Card network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_network: Option<String>,
    /// Last two digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_two: Option<String>,
    /// Last four digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,
    /// Expiration month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<String>,
    /// Expiration year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<String>,
}

/// Wallet payment method types, as the sheet reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethodType {
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
    /// Electronic money.
    EMoney,
    /// Prepaid card.
    Prepaid,
    /// Store card.
    Store,
    /// Unreported type.
    Unknown,
}

impl PaymentMethodType {
    /// Wire string for the method type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::EMoney => "eMoney",
            Self::Prepaid => "prepaid",
            Self::Store => "store",
            Self::Unknown => "unknown",
        }
    }
}

/// Terminal events an Apple Pay flow can produce.
///
/// The native sheet has several distinct completion callbacks; they all
/// funnel into this one enum so the flow has a single settle path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplePayEvent {
    /// The payment was authorized and tokenized.
    Authorized {
        /// Single-use token.
        nonce: String,
        /// Method type reported by the sheet.
        method_type: PaymentMethodType,
    },
    /// The user dismissed the sheet without authorizing.
    SheetDismissed,
    /// The vendor could not build a payment request.
    RequestFailed(String),
    /// The sheet could not be presented.
    PresentationFailed(String),
    /// Tokenizing the authorized payment failed.
    TokenizeFailed(String),
}

/// Entry point to an opaque vendor SDK.
pub trait VendorSdk: Send + Sync {
    /// Construct an authorized vendor session for one operation.
    ///
    /// Fails when the token is malformed; the bridge maps the failure to a
    /// `ClientInitializationError` before any network or UI interaction.
    fn authorize(
        &self,
        host: &HostHandle,
        token: &ClientToken,
    ) -> Result<std::sync::Arc<dyn VendorSession>, VendorError>;
}

/// One authorized vendor session.
///
/// Flow methods return once the flow is *dispatched*; the terminal outcome
/// arrives later through the supplied [`Completion`]. Implementations may
/// fire more than one signal per request; only the first is honored.
#[async_trait]
pub trait VendorSession: Send + Sync {
    /// Start a PayPal vault (billing agreement) tokenization.
    async fn tokenize_vault(&self, request: VaultRequest, completion: Completion<AccountNoncePayload>);

    /// Start a PayPal one-time checkout tokenization.
    async fn tokenize_checkout(
        &self,
        request: CheckoutRequest,
        completion: Completion<AccountNoncePayload>,
    );

    /// Tokenize card data.
    async fn tokenize_card(&self, request: CardRequest, completion: Completion<CardPayload>);

    /// Collect device data, yielding an opaque correlation id.
    async fn collect_device_data(&self, completion: Completion<String>);

    /// Whether the device can make Apple Pay payments at all.
    fn can_make_apple_pay_payments(&self) -> bool;

    /// Present the Apple Pay sheet and drive it to a terminal event.
    async fn present_apple_pay(
        &self,
        request: PaymentSheetRequest,
        completion: Completion<ApplePayEvent>,
    );

    /// Probe Google Pay readiness before presenting the sheet.
    async fn is_google_pay_ready(&self) -> bool;

    /// Launch the Google Pay sheet. The result is delivered through the
    /// platform listener path, not through this call.
    async fn request_google_pay(&self, request: GooglePayRequest) -> Result<(), VendorError>;

    /// Take the stashed browser-switch result for this host context, if one
    /// arrived while the host was backgrounded. Consuming.
    fn take_browser_switch_result(&self, host: &HostHandle) -> Option<BrowserSwitchResult>;

    /// Decode a stashed browser-switch result and settle the original
    /// request through the same completion path as an in-process callback.
    async fn resume_browser_switch(
        &self,
        result: BrowserSwitchResult,
        completion: Completion<AccountNoncePayload>,
    );
}
