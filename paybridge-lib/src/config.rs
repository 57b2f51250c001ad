//! Caller-supplied operation configurations.
//!
//! Each bridge operation accepts one plain configuration object. Configs are
//! immutable once passed in and are validated field-by-field by the request
//! adapters before any vendor client is constructed.
//!
//! Boolean options are real `bool`s here; they are only rendered as
//! `"true"`/`"false"` strings on the vendor wire (see
//! [`crate::vendor::bool_string`]).

use serde::{Deserialize, Serialize};

use crate::ClientToken;

/// Intent of a PayPal one-time checkout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutIntent {
    /// Authorize now, capture later.
    #[default]
    Authorize,
    /// Create an order without authorization.
    Order,
    /// Authorize and capture immediately.
    Sale,
}

/// Checkout button behavior shown to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserAction {
    /// Default continue-style flow.
    #[default]
    None,
    /// Show a "Pay Now" button for immediate payment.
    PayNow,
}

/// Google Pay environment selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GooglePayEnvironment {
    /// Sandbox environment.
    #[default]
    Test,
    /// Live environment.
    Production,
}

/// Configuration for a PayPal billing agreement (vault) request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAgreementConfig {
    /// Vendor authorization token.
    pub client_token: ClientToken,
    /// Description shown on the agreement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_agreement_description: Option<String>,
    /// Merchant display name shown in the flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Locale for the vendor UI, e.g. `"en_US"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_code: Option<String>,
    /// Pre-filled user email for the vendor flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_authentication_email: Option<String>,
    /// Offer PayPal Credit in the flow. Defaults to `false`.
    #[serde(default)]
    pub offer_credit: bool,
    /// Request a shipping address. Defaults to `false`.
    #[serde(default)]
    pub is_shipping_address_required: bool,
    /// Allow editing the shipping address. Defaults to `false`.
    #[serde(default)]
    pub is_shipping_address_editable: bool,
    /// Mark vendor UI as an accessibility element. Defaults to `false`.
    #[serde(default)]
    pub is_accessibility_element: bool,
}

/// Configuration for a PayPal one-time checkout request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimePaymentConfig {
    /// Vendor authorization token.
    pub client_token: ClientToken,
    /// Payment amount, e.g. `"5.00"`. Required.
    pub amount: String,
    /// Checkout intent. Defaults to [`CheckoutIntent::Authorize`].
    #[serde(default)]
    pub intent: CheckoutIntent,
    /// Button behavior. Defaults to [`UserAction::None`].
    #[serde(default)]
    pub user_action: UserAction,
    /// Offer Pay Later in the flow. Defaults to `false`.
    #[serde(default)]
    pub offer_pay_later: bool,
    /// ISO currency code. Defaults to `"USD"` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Also vault the account for future billing. Defaults to `false`.
    #[serde(default)]
    pub request_billing_agreement: bool,
}

/// Configuration for card tokenization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    /// Vendor authorization token.
    pub client_token: ClientToken,
    /// Card number.
    pub number: String,
    /// Two-digit expiration month, e.g. `"11"`.
    pub expiration_month: String,
    /// Two-digit expiration year, e.g. `"24"`.
    pub expiration_year: String,
    /// Card verification value.
    pub cvv: String,
    /// Billing postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Configuration for an Apple Pay payment request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayConfig {
    /// Vendor authorization token.
    pub client_token: ClientToken,
    /// Payment amount. Required.
    pub amount: String,
    /// Apple merchant identifier. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    /// Merchant name shown on the payment sheet. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    /// ISO currency code. Defaults to `"USD"` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// ISO country code. Defaults to `"US"` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Configuration for a Google Pay payment request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayConfig {
    /// Vendor authorization token.
    pub client_token: ClientToken,
    /// Payment amount. Required.
    pub amount: String,
    /// ISO currency code. Defaults to `"USD"` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Require a phone number from the wallet. Defaults to `false`.
    #[serde(default)]
    pub is_phone_number_required: bool,
    /// Require a shipping address from the wallet. Defaults to `false`.
    #[serde(default)]
    pub is_shipping_address_required: bool,
    /// Wallet environment. Defaults to [`GooglePayEnvironment::Test`].
    #[serde(default)]
    pub environment: GooglePayEnvironment,
}
