//! Error taxonomy for bridge operations.
//!
//! Every failure surfaced to a caller is representable as the literal
//! `(kind, domain, message)` triple: `kind` identifies the exception
//! category, `domain` the finer-grained reason, and `message` is
//! human-readable text (often the vendor's own wording, passed through
//! untouched).
//!
//! Configuration/validation errors are raised by the request adapters before
//! any vendor client is constructed; vendor-originated failures are
//! normalized at the single settlement point in [`crate::bridge::Bridge`].
//! No error is retried and every error is terminal for its operation.

use std::fmt;

use crate::vendor::VendorError;

/// Closed set of error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Vendor API client could not be constructed, or no host UI context.
    ClientInitialization,
    /// The user backed out of a vendor flow.
    UserCancelled,
    /// A feature is disabled in the merchant configuration.
    FeatureDisabled,
    /// Required `merchantId` was absent from the configuration.
    MissingMerchantId,
    /// Required `merchantName` was absent from the configuration.
    MissingMerchantName,
    /// Required `amount` was absent or empty.
    MissingAmount,
    /// A tokenization flow failed at the vendor.
    Tokenize,
    /// Device-data collection failed.
    DataCollector,
    /// A native payment sheet could not be presented.
    PaymentSheet,
    /// The vendor could not build a payment request.
    PaymentRequest,
    /// The device or account cannot make payments with the wallet.
    PaymentNotSupported,
    /// Any other platform-originated failure.
    GenericPlatform,
}

impl ErrorKind {
    /// Stable identifier for the category, as seen by host runtimes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientInitialization => "ClientInitializationError",
            Self::UserCancelled => "UserCancelled",
            Self::FeatureDisabled => "FeatureDisabledInConfiguration",
            Self::MissingMerchantId => "MissingMerchantId",
            Self::MissingMerchantName => "MissingMerchantName",
            Self::MissingAmount => "MissingAmount",
            Self::Tokenize => "TokenizeError",
            Self::DataCollector => "DataCollectorError",
            Self::PaymentSheet => "PaymentSheetError",
            Self::PaymentRequest => "PaymentRequestError",
            Self::PaymentNotSupported => "PaymentNotSupported",
            Self::GenericPlatform => "GenericPlatformError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain literals shared with host runtimes.
pub mod domains {
    /// API client construction or host-context resolution failed.
    pub const API_CLIENT_INITIALIZATION: &str = "API_CLIENT_INITIALIZATION_ERROR";
    /// The user cancelled the transaction.
    pub const USER_CANCEL_TRANSACTION: &str = "USER_CANCEL_TRANSACTION_ERROR";
    /// `merchantId` missing from an Apple Pay configuration.
    pub const MERCHANT_ID: &str = "MERCHANT_ID_ERROR";
    /// `merchantName` missing from an Apple Pay configuration.
    pub const MERCHANT_NAME: &str = "MERCHANT_NAME_ERROR";
    /// `amount` missing or empty.
    pub const AMOUNT: &str = "AMOUNT_ERROR";
    /// Vault or checkout tokenization failed.
    pub const TOKENIZE_VAULT_PAYMENT: &str = "TOKENIZE_VAULT_PAYMENT_ERROR";
    /// Card tokenization failed.
    pub const CARD_TOKENIZATION: &str = "CARD_TOKENIZATION_ERROR";
    /// Tokenizing an authorized Apple Pay payment failed.
    pub const APPLE_PAY_TOKEN: &str = "APPLE_PAY_TOKEN_ERROR";
    /// Device-data collection failed.
    pub const DATA_COLLECTOR: &str = "DATA_COLLECTOR_ERROR";
    /// The Apple Pay sheet could not be presented.
    pub const APPLE_PAY_SHEET: &str = "APPLE_PAY_SHEET_ERROR";
    /// The Apple Pay payment request could not be created.
    pub const APPLE_PAY_REQUEST: &str = "APPLE_PAY_REQUEST_ERROR";
    /// The device cannot make Apple Pay payments.
    pub const APPLE_PAY_PAYMENT: &str = "APPLE_PAY_PAYMENT_ERROR";
    /// Google Pay failed or is unavailable.
    pub const GPAY: &str = "GPAY_ERROR";
    /// Any other platform failure.
    pub const PLATFORM: &str = "PLATFORM_ERROR";
}

/// Which vendor tokenization flow produced a [`BridgeError::Tokenize`].
///
/// The kind is the same for all of them; the domain differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeFlow {
    /// PayPal vault (billing agreement) tokenization.
    Vault,
    /// PayPal one-time checkout tokenization.
    Checkout,
    /// Card tokenization.
    Card,
    /// Apple Pay payment tokenization.
    ApplePay,
}

/// Which wallet reported that payments are not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wallet {
    /// Apple Pay.
    ApplePay,
    /// Google Pay.
    GooglePay,
}

/// Normalized bridge error.
///
/// The closed taxonomy of §kinds is exposed through [`BridgeError::kind`];
/// the finer-grained reason through [`BridgeError::domain`]. Use
/// [`BridgeError::triple`] to obtain the literal wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The vendor API client could not be constructed (bad or empty client
    /// token), or no foreground host context was available.
    ClientInitialization(String),

    /// The user cancelled the transaction.
    UserCancelled,

    /// A feature is disabled in the merchant configuration.
    FeatureDisabled {
        /// The disabled feature, e.g. `"paypal"`.
        feature: String,
    },

    /// `merchantId` was not provided.
    MissingMerchantId,

    /// `merchantName` was not provided.
    MissingMerchantName,

    /// `amount` was not provided or was empty.
    MissingAmount,

    /// A tokenization flow failed at the vendor.
    Tokenize {
        /// Which flow failed (determines the domain).
        flow: TokenizeFlow,
        /// Vendor-provided failure text, passed through untouched.
        message: String,
    },

    /// Device-data collection failed.
    DataCollector(String),

    /// The native payment sheet could not be presented.
    PaymentSheet(String),

    /// The vendor could not create a payment request.
    PaymentRequest(String),

    /// The wallet reported that payments cannot be made.
    PaymentNotSupported {
        /// Which wallet refused.
        wallet: Wallet,
        /// Vendor or platform text.
        message: String,
    },

    /// Any other platform-originated failure.
    GenericPlatform {
        /// Domain literal for the failure source.
        domain: &'static str,
        /// Human-readable text.
        message: String,
    },
}

impl BridgeError {
    /// The error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientInitialization(_) => ErrorKind::ClientInitialization,
            Self::UserCancelled => ErrorKind::UserCancelled,
            Self::FeatureDisabled { .. } => ErrorKind::FeatureDisabled,
            Self::MissingMerchantId => ErrorKind::MissingMerchantId,
            Self::MissingMerchantName => ErrorKind::MissingMerchantName,
            Self::MissingAmount => ErrorKind::MissingAmount,
            Self::Tokenize { .. } => ErrorKind::Tokenize,
            Self::DataCollector(_) => ErrorKind::DataCollector,
            Self::PaymentSheet(_) => ErrorKind::PaymentSheet,
            Self::PaymentRequest(_) => ErrorKind::PaymentRequest,
            Self::PaymentNotSupported { .. } => ErrorKind::PaymentNotSupported,
            Self::GenericPlatform { .. } => ErrorKind::GenericPlatform,
        }
    }

    /// The finer-grained error reason.
    pub fn domain(&self) -> String {
        match self {
            Self::ClientInitialization(_) => domains::API_CLIENT_INITIALIZATION.to_string(),
            Self::UserCancelled => domains::USER_CANCEL_TRANSACTION.to_string(),
            Self::FeatureDisabled { feature } => {
                format!("{}_DISABLED_IN_CONFIGURATION_ERROR", feature.to_uppercase())
            }
            Self::MissingMerchantId => domains::MERCHANT_ID.to_string(),
            Self::MissingMerchantName => domains::MERCHANT_NAME.to_string(),
            Self::MissingAmount => domains::AMOUNT.to_string(),
            Self::Tokenize { flow, .. } => match flow {
                TokenizeFlow::Vault | TokenizeFlow::Checkout => {
                    domains::TOKENIZE_VAULT_PAYMENT.to_string()
                }
                TokenizeFlow::Card => domains::CARD_TOKENIZATION.to_string(),
                TokenizeFlow::ApplePay => domains::APPLE_PAY_TOKEN.to_string(),
            },
            Self::DataCollector(_) => domains::DATA_COLLECTOR.to_string(),
            Self::PaymentSheet(_) => domains::APPLE_PAY_SHEET.to_string(),
            Self::PaymentRequest(_) => domains::APPLE_PAY_REQUEST.to_string(),
            Self::PaymentNotSupported { wallet, .. } => match wallet {
                Wallet::ApplePay => domains::APPLE_PAY_PAYMENT.to_string(),
                Wallet::GooglePay => domains::GPAY.to_string(),
            },
            Self::GenericPlatform { domain, .. } => (*domain).to_string(),
        }
    }

    /// The human-readable message as an owned String.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The literal `(kind, domain, message)` wire shape.
    pub fn triple(&self) -> ErrorTriple {
        ErrorTriple {
            kind: self.kind().as_str().to_string(),
            domain: self.domain(),
            message: self.message(),
        }
    }

    /// Create a client-initialization error.
    pub fn client_initialization(reason: impl Into<String>) -> Self {
        Self::ClientInitialization(reason.into())
    }

    /// Create a generic Google Pay error.
    pub fn google_pay(message: impl Into<String>) -> Self {
        Self::GenericPlatform {
            domain: domains::GPAY,
            message: message.into(),
        }
    }

    /// Error for a request that was replaced by a newer one on the same
    /// bridge before it settled.
    pub fn superseded() -> Self {
        Self::GenericPlatform {
            domain: domains::PLATFORM,
            message: "request superseded by a newer operation".to_string(),
        }
    }

    /// Normalize a vendor failure signal.
    ///
    /// Cancellation and merchant-configuration signals map to their fixed
    /// kinds; anything else goes through `fallback`, the per-operation
    /// generic constructor, with the vendor message untouched.
    pub fn from_vendor(error: VendorError, fallback: impl FnOnce(String) -> Self) -> Self {
        match error {
            VendorError::Canceled => Self::UserCancelled,
            VendorError::Disabled { feature } => Self::FeatureDisabled { feature },
            VendorError::Other(message) => fallback(message),
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientInitialization(reason) => {
                write!(f, "api client initialization failed: {}", reason)
            }
            Self::UserCancelled => write!(f, "user cancelled the transaction"),
            Self::FeatureDisabled { feature } => {
                write!(f, "{} is disabled in the merchant configuration", feature)
            }
            Self::MissingMerchantId => write!(f, "you must provide merchantId"),
            Self::MissingMerchantName => write!(f, "you must provide merchantName"),
            Self::MissingAmount => write!(f, "you must provide a non-empty amount"),
            Self::Tokenize { message, .. } => write!(f, "tokenization failed: {}", message),
            Self::DataCollector(msg) => write!(f, "device data collection failed: {}", msg),
            Self::PaymentSheet(msg) => write!(f, "cannot present payment sheet: {}", msg),
            Self::PaymentRequest(msg) => write!(f, "cannot create a payment request: {}", msg),
            Self::PaymentNotSupported { wallet, message } => {
                let label = match wallet {
                    Wallet::ApplePay => "Apple Pay",
                    Wallet::GooglePay => "Google Pay",
                };
                write!(f, "cannot make {} payments: {}", label, message)
            }
            Self::GenericPlatform { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for BridgeError {}

/// The flattened `(kind, domain, message)` triple handed to host runtimes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorTriple {
    /// Error category identifier.
    pub kind: String,
    /// Finer-grained error reason.
    pub domain: String,
    /// Human-readable text.
    pub message: String,
}
