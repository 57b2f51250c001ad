//! End-to-end bridge flows against the scripted vendor.

use std::sync::{Arc, Mutex};

use paybridge_lib::errors::domains;
use paybridge_lib::test_utils::{
    fixtures, CardScript, DeviceDataScript, MockVendor, PayPalScript, StaticHostContext,
};
use paybridge_lib::vendor::{ApplePayEvent, PaymentMethodType, VendorError};
use paybridge_lib::{
    ApplePayConfig, Bridge, BridgeError, ClientToken, ErrorKind, GooglePayListener, GooglePayNonce,
};

fn bridge_with(vendor: &MockVendor) -> Bridge {
    Bridge::new(
        Arc::new(vendor.clone()),
        Arc::new(StaticHostContext::foreground()),
    )
}

#[derive(Default)]
struct RecordingListener {
    successes: Mutex<Vec<GooglePayNonce>>,
    failures: Mutex<Vec<BridgeError>>,
}

impl RecordingListener {
    fn successes(&self) -> Vec<GooglePayNonce> {
        self.successes.lock().unwrap().clone()
    }

    fn failures(&self) -> Vec<BridgeError> {
        self.failures.lock().unwrap().clone()
    }
}

impl GooglePayListener for RecordingListener {
    fn on_success(&self, nonce: GooglePayNonce) {
        self.successes.lock().unwrap().push(nonce);
    }

    fn on_failure(&self, error: BridgeError) {
        self.failures.lock().unwrap().push(error);
    }
}

#[tokio::test]
async fn billing_agreement_returns_flattened_nonce() {
    let vendor = MockVendor::new();
    vendor.script_paypal(PayPalScript::Succeed(fixtures::account_nonce_payload(
        "pp-nonce-7",
    )));
    let bridge = bridge_with(&vendor);

    let nonce = bridge
        .request_billing_agreement(fixtures::billing_agreement_config())
        .await
        .unwrap();

    assert_eq!(nonce.nonce, "pp-nonce-7");
    assert_eq!(nonce.email.as_deref(), Some("payer@example.com"));
    let shipping = nonce.shipping_address.expect("shipping address");
    assert_eq!(shipping.locality.as_deref(), Some("London"));
    assert!(!bridge.has_pending_request());
}

#[tokio::test]
async fn one_time_payment_dispatches_default_currency() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);

    bridge
        .request_one_time_payment(fixtures::one_time_payment_config())
        .await
        .unwrap();

    let dispatched = vendor.last_checkout_request().expect("dispatched request");
    assert_eq!(dispatched.currency_code, "USD");
    assert_eq!(dispatched.amount, "5.00");
}

#[tokio::test]
async fn missing_amount_fails_without_touching_the_vendor() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);

    let mut config = fixtures::one_time_payment_config();
    config.amount = String::new();
    let err = bridge.request_one_time_payment(config).await.unwrap_err();

    let triple = err.triple();
    assert_eq!(triple.kind, "MissingAmount");
    assert_eq!(triple.domain, domains::AMOUNT);
    assert_eq!(vendor.sessions_built(), 0);
}

#[tokio::test]
async fn cancellation_surfaces_as_user_cancelled() {
    let vendor = MockVendor::new();
    vendor.script_paypal(PayPalScript::Fail(VendorError::Canceled));
    let bridge = bridge_with(&vendor);

    let err = bridge
        .request_billing_agreement(fixtures::billing_agreement_config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UserCancelled);
    assert_eq!(err.domain(), domains::USER_CANCEL_TRANSACTION);
}

#[tokio::test]
async fn disabled_feature_carries_its_own_domain() {
    let vendor = MockVendor::new();
    vendor.script_paypal(PayPalScript::Fail(VendorError::Disabled {
        feature: "paypal".to_string(),
    }));
    let bridge = bridge_with(&vendor);

    let err = bridge
        .request_one_time_payment(fixtures::one_time_payment_config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FeatureDisabled);
    assert_eq!(err.domain(), "PAYPAL_DISABLED_IN_CONFIGURATION_ERROR");
}

#[tokio::test]
async fn duplicate_vendor_callbacks_keep_the_first_outcome() {
    let vendor = MockVendor::new();
    vendor.script_paypal(PayPalScript::SettleTwice(
        fixtures::account_nonce_payload("pp-first"),
        VendorError::Other("late duplicate".to_string()),
    ));
    let bridge = bridge_with(&vendor);

    let nonce = bridge
        .request_billing_agreement(fixtures::billing_agreement_config())
        .await
        .unwrap();

    assert_eq!(nonce.nonce, "pp-first");
}

#[tokio::test]
async fn failed_authorization_is_a_client_initialization_error() {
    let vendor = MockVendor::new();
    vendor.fail_authorize(VendorError::Other("invalid client token".to_string()));
    let bridge = bridge_with(&vendor);

    let err = bridge
        .collect_device_data(fixtures::client_token())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientInitialization);
    assert_eq!(err.domain(), domains::API_CLIENT_INITIALIZATION);
    assert!(err.message().contains("invalid client token"));
}

#[tokio::test]
async fn browser_switch_result_is_delivered_on_host_resume() {
    let vendor = MockVendor::new();
    vendor.script_paypal(PayPalScript::BrowserSwitch(fixtures::account_nonce_payload(
        "pp-resumed",
    )));
    let bridge = Arc::new(bridge_with(&vendor));

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
    assert!(vendor.has_stashed_result());

    bridge.on_host_resume().await;

    let nonce = pending.await.unwrap().unwrap();
    assert_eq!(nonce.nonce, "pp-resumed");
    assert!(!vendor.has_stashed_result());
    assert!(!bridge.has_pending_request());
}

#[tokio::test]
async fn host_resume_without_pending_request_is_a_noop() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);

    bridge.on_host_resume().await;

    assert!(!bridge.has_pending_request());
    assert_eq!(vendor.sessions_built(), 0);
}

#[tokio::test]
async fn card_tokenization_returns_stub_nonce_with_digits() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);

    let nonce = bridge.tokenize_card(fixtures::card_config()).await.unwrap();

    assert_eq!(nonce.nonce, "fake-nonce-1");
    assert_eq!(nonce.last_four.as_deref(), Some("4444"));
    assert_eq!(nonce.last_two.as_deref(), Some("44"));
    assert_eq!(nonce.expiration_month.as_deref(), Some("11"));
}

#[tokio::test]
async fn card_tokenization_failure_uses_card_domain() {
    let vendor = MockVendor::new();
    vendor.script_card(CardScript::Fail(VendorError::Other(
        "card declined".to_string(),
    )));
    let bridge = bridge_with(&vendor);

    let err = bridge
        .tokenize_card(fixtures::card_config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Tokenize);
    assert_eq!(err.domain(), domains::CARD_TOKENIZATION);
}

#[tokio::test]
async fn device_data_failure_uses_data_collector_domain() {
    let vendor = MockVendor::new();
    vendor.script_device_data(DeviceDataScript::Fail(VendorError::Other(
        "collector unavailable".to_string(),
    )));
    let bridge = bridge_with(&vendor);

    let err = bridge
        .collect_device_data(fixtures::client_token())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataCollector);
    assert_eq!(err.domain(), domains::DATA_COLLECTOR);
}

#[tokio::test]
async fn device_data_returns_correlation_id() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);

    let device_data = bridge
        .collect_device_data(fixtures::client_token())
        .await
        .unwrap();

    assert_eq!(device_data.as_str(), "fake-device-data-1");
}

#[tokio::test]
async fn apple_pay_authorization_yields_nonce_outcome() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);

    let outcome = bridge
        .request_apple_pay(fixtures::apple_pay_config())
        .await
        .unwrap();

    assert!(!outcome.is_cancelled());
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        serde_json::json!({"nonce": "fake-apple-pay-nonce-1"})
    );
    let sheet = vendor.last_sheet_request().expect("sheet request");
    assert_eq!(sheet.currency_code, "USD");
    assert_eq!(sheet.country_code, "US");
}

#[tokio::test]
async fn apple_pay_dismissal_is_a_cancel_marker_not_an_error() {
    let vendor = MockVendor::new();
    vendor.script_apple_pay(ApplePayEvent::SheetDismissed);
    let bridge = bridge_with(&vendor);

    let outcome = bridge
        .request_apple_pay(fixtures::apple_pay_config())
        .await
        .unwrap();

    assert!(outcome.is_cancelled());
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        serde_json::json!({"cancelled": true})
    );
}

#[tokio::test]
async fn apple_pay_missing_merchant_id_short_circuits() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);

    let config = ApplePayConfig {
        client_token: ClientToken::new("token-1"),
        amount: "12.00".to_string(),
        ..ApplePayConfig::default()
    };
    let err = bridge.request_apple_pay(config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingMerchantId);
    assert_eq!(err.domain(), domains::MERCHANT_ID);
    assert_eq!(vendor.sessions_built(), 0);
}

#[tokio::test]
async fn apple_pay_unsupported_device_is_rejected() {
    let vendor = MockVendor::new();
    vendor.set_can_make_apple_pay(false);
    let bridge = bridge_with(&vendor);

    let err = bridge
        .request_apple_pay(fixtures::apple_pay_config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PaymentNotSupported);
    assert_eq!(err.domain(), domains::APPLE_PAY_PAYMENT);
}

#[tokio::test]
async fn apple_pay_tokenize_failure_uses_token_domain() {
    let vendor = MockVendor::new();
    vendor.script_apple_pay(ApplePayEvent::TokenizeFailed(
        "gateway rejected token".to_string(),
    ));
    let bridge = bridge_with(&vendor);

    let err = bridge
        .request_apple_pay(fixtures::apple_pay_config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Tokenize);
    assert_eq!(err.domain(), domains::APPLE_PAY_TOKEN);
}

#[tokio::test]
async fn google_pay_launch_then_listener_success() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);
    let listener = Arc::new(RecordingListener::default());
    bridge.set_google_pay_listener(listener.clone());

    bridge
        .request_google_pay(fixtures::google_pay_config())
        .await
        .unwrap();
    assert!(bridge.has_pending_request());

    bridge.on_google_pay_success(GooglePayNonce {
        nonce: "gp-nonce-1".to_string(),
        payment_method_type: Some("CARD".to_string()),
    });

    let successes = listener.successes();
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].nonce, "gp-nonce-1");
    assert!(!bridge.has_pending_request());

    let dispatched = vendor.last_google_pay_request().expect("request");
    assert_eq!(dispatched.total_price, "8.50");
    assert_eq!(dispatched.currency_code, "USD");
}

#[tokio::test]
async fn duplicate_google_pay_signals_are_dropped() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);
    let listener = Arc::new(RecordingListener::default());
    bridge.set_google_pay_listener(listener.clone());

    bridge
        .request_google_pay(fixtures::google_pay_config())
        .await
        .unwrap();

    bridge.on_google_pay_success(GooglePayNonce {
        nonce: "gp-nonce-1".to_string(),
        payment_method_type: None,
    });
    bridge.on_google_pay_failure(VendorError::Canceled);
    bridge.on_google_pay_success(GooglePayNonce {
        nonce: "gp-nonce-2".to_string(),
        payment_method_type: None,
    });

    assert_eq!(listener.successes().len(), 1);
    assert!(listener.failures().is_empty());
}

#[tokio::test]
async fn google_pay_cancellation_reaches_the_listener_normalized() {
    let vendor = MockVendor::new();
    let bridge = bridge_with(&vendor);
    let listener = Arc::new(RecordingListener::default());
    bridge.set_google_pay_listener(listener.clone());

    bridge
        .request_google_pay(fixtures::google_pay_config())
        .await
        .unwrap();
    bridge.on_google_pay_failure(VendorError::Canceled);

    let failures = listener.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind(), ErrorKind::UserCancelled);
}

#[tokio::test]
async fn google_pay_not_ready_is_rejected_before_launch() {
    let vendor = MockVendor::new();
    vendor.set_google_pay_ready(false);
    let bridge = bridge_with(&vendor);

    let err = bridge
        .request_google_pay(fixtures::google_pay_config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PaymentNotSupported);
    assert_eq!(err.domain(), domains::GPAY);
    assert!(vendor.last_google_pay_request().is_none());
    assert!(!bridge.has_pending_request());
}

#[tokio::test]
async fn google_pay_launch_failure_clears_the_slot() {
    let vendor = MockVendor::new();
    vendor.fail_google_pay_launch(VendorError::Other("sheet unavailable".to_string()));
    let bridge = bridge_with(&vendor);

    let err = bridge
        .request_google_pay(fixtures::google_pay_config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::GenericPlatform);
    assert_eq!(err.domain(), domains::GPAY);
    assert!(!bridge.has_pending_request());
}

#[tokio::test]
async fn apple_pay_method_type_is_observed_before_flattening() {
    let vendor = MockVendor::new();
    vendor.script_apple_pay(ApplePayEvent::Authorized {
        nonce: "fake-apple-pay-nonce-2".to_string(),
        method_type: PaymentMethodType::Credit,
    });
    let bridge = bridge_with(&vendor);

    let outcome = bridge
        .request_apple_pay(fixtures::apple_pay_config())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&outcome).unwrap()["nonce"],
        "fake-apple-pay-nonce-2"
    );
}
