//! Canned configurations and payloads for tests.

use crate::config::{
    ApplePayConfig, BillingAgreementConfig, CardConfig, GooglePayConfig, OneTimePaymentConfig,
};
use crate::vendor::{AccountNoncePayload, AddressPayload};
use crate::ClientToken;

/// A token that passes the local emptiness check.
pub fn client_token() -> ClientToken {
    ClientToken::new("sandbox_abc123_xyz")
}

/// Minimal billing agreement configuration.
pub fn billing_agreement_config() -> BillingAgreementConfig {
    BillingAgreementConfig {
        client_token: client_token(),
        billing_agreement_description: Some("Monthly subscription".to_string()),
        ..BillingAgreementConfig::default()
    }
}

/// Minimal one-time payment configuration; currency left to the default.
pub fn one_time_payment_config() -> OneTimePaymentConfig {
    OneTimePaymentConfig {
        client_token: client_token(),
        amount: "5.00".to_string(),
        ..OneTimePaymentConfig::default()
    }
}

/// A complete card configuration.
pub fn card_config() -> CardConfig {
    CardConfig {
        client_token: client_token(),
        number: "1111222233334444".to_string(),
        expiration_month: "11".to_string(),
        expiration_year: "24".to_string(),
        cvv: "123".to_string(),
        postal_code: Some("60606".to_string()),
    }
}

/// A complete Apple Pay configuration; currency and country left to defaults.
pub fn apple_pay_config() -> ApplePayConfig {
    ApplePayConfig {
        client_token: client_token(),
        amount: "12.00".to_string(),
        merchant_id: Some("merchant.com.example.shop".to_string()),
        merchant_name: Some("Example Shop".to_string()),
        currency_code: None,
        country_code: None,
    }
}

/// A complete Google Pay configuration.
pub fn google_pay_config() -> GooglePayConfig {
    GooglePayConfig {
        client_token: client_token(),
        amount: "8.50".to_string(),
        ..GooglePayConfig::default()
    }
}

/// An account payload with the given nonce and a shipping address.
pub fn account_nonce_payload(nonce: &str) -> AccountNoncePayload {
    AccountNoncePayload {
        nonce: nonce.to_string(),
        email: Some("payer@example.com".to_string()),
        payer_id: Some("PAYER123".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        billing_address: None,
        shipping_address: Some(AddressPayload {
            recipient_name: Some("Ada Lovelace".to_string()),
            street_address: Some("1 Analytical Way".to_string()),
            extended_address: None,
            locality: Some("London".to_string()),
            country_code_alpha2: Some("GB".to_string()),
            postal_code: Some("EC1A 1AA".to_string()),
            region: None,
        }),
    }
}
