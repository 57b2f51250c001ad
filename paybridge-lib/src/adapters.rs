//! Request adapters.
//!
//! Pure, stateless translation between caller configurations and vendor
//! wire shapes, and between vendor payloads and normalized results.
//!
//! Validation policy: every optional field has a documented default
//! (currency `"USD"`, country `"US"`); every required field that is absent
//! raises the corresponding error with **no** vendor interaction — callers
//! run the adapter before constructing a vendor session.

use crate::config::{
    ApplePayConfig, BillingAgreementConfig, CardConfig, GooglePayConfig, OneTimePaymentConfig,
};
use crate::errors::BridgeError;
use crate::results::{CardNonce, PayPalAccountNonce, PostalAddress};
use crate::vendor::{
    AccountNoncePayload, AddressPayload, CardPayload, CardRequest, CheckoutRequest,
    GooglePayRequest, PaymentSheetRequest, VaultRequest, SUPPORTED_NETWORKS,
};

/// Currency applied when a config omits `currency_code`.
pub const DEFAULT_CURRENCY_CODE: &str = "USD";

/// Country applied when a config omits `country_code`.
pub const DEFAULT_COUNTRY_CODE: &str = "US";

/// Build the vendor vault request for a billing agreement.
pub fn vault_request(config: &BillingAgreementConfig) -> VaultRequest {
    VaultRequest {
        billing_agreement_description: config.billing_agreement_description.clone(),
        display_name: config.display_name.clone(),
        locale_code: config.locale_code.clone(),
        user_authentication_email: config.user_authentication_email.clone(),
        offer_credit: config.offer_credit,
        is_shipping_address_required: config.is_shipping_address_required,
        is_shipping_address_editable: config.is_shipping_address_editable,
        is_accessibility_element: config.is_accessibility_element,
    }
}

/// Build the vendor checkout request for a one-time payment.
///
/// An absent or empty `amount` short-circuits with [`BridgeError::MissingAmount`].
pub fn checkout_request(config: &OneTimePaymentConfig) -> Result<CheckoutRequest, BridgeError> {
    if config.amount.is_empty() {
        return Err(BridgeError::MissingAmount);
    }
    Ok(CheckoutRequest {
        amount: config.amount.clone(),
        currency_code: config
            .currency_code
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string()),
        intent: config.intent,
        user_action: config.user_action,
        offer_pay_later: config.offer_pay_later,
        request_billing_agreement: config.request_billing_agreement,
    })
}

/// Build the vendor card tokenization request.
pub fn card_request(config: &CardConfig) -> CardRequest {
    CardRequest {
        number: config.number.clone(),
        expiration_month: config.expiration_month.clone(),
        expiration_year: config.expiration_year.clone(),
        cvv: config.cvv.clone(),
        postal_code: config.postal_code.clone(),
    }
}

/// Build the Apple Pay payment sheet request.
///
/// Required fields are checked in the original order — `merchant_id`, then
/// `merchant_name`, then `amount` — each short-circuiting before any vendor
/// client exists.
pub fn payment_sheet_request(config: &ApplePayConfig) -> Result<PaymentSheetRequest, BridgeError> {
    let merchant_id = match config.merchant_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(BridgeError::MissingMerchantId),
    };
    let merchant_name = match config.merchant_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(BridgeError::MissingMerchantName),
    };
    if config.amount.is_empty() {
        return Err(BridgeError::MissingAmount);
    }
    Ok(PaymentSheetRequest {
        amount: config.amount.clone(),
        merchant_id,
        merchant_name,
        currency_code: config
            .currency_code
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string()),
        country_code: config
            .country_code
            .clone()
            .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string()),
        supported_networks: SUPPORTED_NETWORKS.to_vec(),
    })
}

/// Build the Google Pay request.
pub fn google_pay_request(config: &GooglePayConfig) -> Result<GooglePayRequest, BridgeError> {
    if config.amount.is_empty() {
        return Err(BridgeError::MissingAmount);
    }
    Ok(GooglePayRequest {
        total_price: config.amount.clone(),
        currency_code: config
            .currency_code
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string()),
        is_phone_number_required: config.is_phone_number_required,
        is_shipping_address_required: config.is_shipping_address_required,
        environment: config.environment,
    })
}

/// Flatten a vendor account payload into the normalized result.
pub fn account_nonce(payload: AccountNoncePayload) -> PayPalAccountNonce {
    PayPalAccountNonce {
        nonce: payload.nonce,
        email: payload.email,
        payer_id: payload.payer_id,
        first_name: payload.first_name,
        last_name: payload.last_name,
        billing_address: payload.billing_address.map(postal_address),
        shipping_address: payload.shipping_address.map(postal_address),
    }
}

/// Flatten a vendor address payload.
pub fn postal_address(payload: AddressPayload) -> PostalAddress {
    PostalAddress {
        recipient_name: payload.recipient_name,
        street_address: payload.street_address,
        extended_address: payload.extended_address,
        locality: payload.locality,
        country_code_alpha2: payload.country_code_alpha2,
        postal_code: payload.postal_code,
        region: payload.region,
    }
}

/// Flatten a vendor card payload into the normalized result.
pub fn card_nonce(payload: CardPayload) -> CardNonce {
    CardNonce {
        nonce: payload.nonce,
        card_network: payload.card_network,
        last_two: payload.last_two,
        last_four: payload.last_four,
        expiration_month: payload.expiration_month,
        expiration_year: payload.expiration_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientToken;

    fn apple_pay_config() -> ApplePayConfig {
        ApplePayConfig {
            client_token: ClientToken::new("token-1"),
            amount: "12.00".to_string(),
            merchant_id: Some("merchant.com.example".to_string()),
            merchant_name: Some("Example Shop".to_string()),
            currency_code: None,
            country_code: None,
        }
    }

    #[test]
    fn checkout_currency_defaults_to_usd() {
        let config = OneTimePaymentConfig {
            client_token: ClientToken::new("token-1"),
            amount: "5.00".to_string(),
            ..OneTimePaymentConfig::default()
        };
        let request = checkout_request(&config).unwrap();
        assert_eq!(request.currency_code, DEFAULT_CURRENCY_CODE);
    }

    #[test]
    fn checkout_preserves_explicit_currency() {
        let config = OneTimePaymentConfig {
            client_token: ClientToken::new("token-1"),
            amount: "5.00".to_string(),
            currency_code: Some("EUR".to_string()),
            ..OneTimePaymentConfig::default()
        };
        let request = checkout_request(&config).unwrap();
        assert_eq!(request.currency_code, "EUR");
    }

    #[test]
    fn checkout_without_amount_is_rejected() {
        let config = OneTimePaymentConfig {
            client_token: ClientToken::new("token-1"),
            ..OneTimePaymentConfig::default()
        };
        assert_eq!(checkout_request(&config), Err(BridgeError::MissingAmount));
    }

    #[test]
    fn sheet_request_checks_merchant_id_before_name() {
        let mut config = apple_pay_config();
        config.merchant_id = None;
        config.merchant_name = None;
        assert_eq!(
            payment_sheet_request(&config),
            Err(BridgeError::MissingMerchantId)
        );
    }

    #[test]
    fn sheet_request_requires_merchant_name() {
        let mut config = apple_pay_config();
        config.merchant_name = None;
        assert_eq!(
            payment_sheet_request(&config),
            Err(BridgeError::MissingMerchantName)
        );
    }

    #[test]
    fn sheet_request_defaults_country_and_currency() {
        let request = payment_sheet_request(&apple_pay_config()).unwrap();
        assert_eq!(request.currency_code, "USD");
        assert_eq!(request.country_code, "US");
        assert_eq!(request.supported_networks.len(), SUPPORTED_NETWORKS.len());
    }

    #[test]
    fn account_nonce_keeps_absent_fields_absent() {
        let flattened = account_nonce(AccountNoncePayload {
            nonce: "pp-nonce-1".to_string(),
            email: Some("payer@example.com".to_string()),
            ..AccountNoncePayload::default()
        });
        assert_eq!(flattened.nonce, "pp-nonce-1");
        assert_eq!(flattened.email.as_deref(), Some("payer@example.com"));
        assert!(flattened.billing_address.is_none());
        assert!(flattened.shipping_address.is_none());
    }

    #[test]
    fn addresses_flatten_field_by_field() {
        let flattened = account_nonce(AccountNoncePayload {
            nonce: "pp-nonce-1".to_string(),
            shipping_address: Some(AddressPayload {
                locality: Some("Warsaw".to_string()),
                country_code_alpha2: Some("PL".to_string()),
                ..AddressPayload::default()
            }),
            ..AccountNoncePayload::default()
        });
        let shipping = flattened.shipping_address.unwrap();
        assert_eq!(shipping.locality.as_deref(), Some("Warsaw"));
        assert_eq!(shipping.country_code_alpha2.as_deref(), Some("PL"));
        assert!(shipping.street_address.is_none());
    }
}
