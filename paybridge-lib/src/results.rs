//! Normalized success payloads.
//!
//! Flat, camelCase wire shapes produced exactly once per operation. Fields
//! absent on the vendor payload are omitted on the wire, never defaulted to
//! placeholder values.

use serde::{Deserialize, Serialize};

/// A postal address attached to a PayPal account nonce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
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

/// Result of a successful PayPal vault or checkout tokenization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPalAccountNonce {
    /// Single-use payment method token.
    pub nonce: String,
    /// Payer email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Vendor payer identifier.
    #[serde(default, rename = "payerID", skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    /// Payer first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Payer last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Billing address, when the vendor supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<PostalAddress>,
    /// Shipping address, when the vendor supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<PostalAddress>,
}

/// Result of a successful card tokenization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardNonce {
    /// Single-use payment method token.
    pub nonce: String,
    /// Card network, e.g. `"Visa"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_network: Option<String>,
    /// Last two digits of the card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_two: Option<String>,
    /// Last four digits of the card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,
    /// Expiration month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<String>,
    /// Expiration year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<String>,
}

/// Opaque device-data correlation id from the vendor's data collector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceData(pub String);

impl DeviceData {
    /// Create device data from a correlation id.
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self(correlation_id.into())
    }

    /// The correlation id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal outcome of an Apple Pay flow.
///
/// The user backing out of the native sheet is a normal termination, not an
/// error: it surfaces as [`ApplePayOutcome::Cancelled`], which serializes to
/// `{"cancelled": true}` rather than a rejection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplePayOutcome {
    /// The payment was authorized and tokenized.
    Authorized {
        /// Single-use payment method token.
        nonce: String,
    },
    /// The user dismissed the sheet without authorizing.
    Cancelled {
        /// Always `true`; wire marker for the cancelled shape.
        cancelled: bool,
    },
}

impl ApplePayOutcome {
    /// Construct the authorized outcome.
    pub fn authorized(nonce: impl Into<String>) -> Self {
        Self::Authorized {
            nonce: nonce.into(),
        }
    }

    /// Construct the cancelled marker.
    pub fn cancelled() -> Self {
        Self::Cancelled { cancelled: true }
    }

    /// Whether the user backed out of the sheet.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Nonce delivered by the Google Pay success listener.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayNonce {
    /// Single-use payment method token.
    pub nonce: String,
    /// Wallet payment method type, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<String>,
}
