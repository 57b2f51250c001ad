//! paybridge-mobile: callback-style host bindings for `paybridge-lib`.
//!
//! Host runtimes (iOS, Android, embedded webviews) talk to the bridge
//! through completion callbacks rather than Rust futures. This crate wraps
//! [`paybridge_lib::Bridge`] in a [`BridgeModule`] that owns its own Tokio
//! runtime, exposes one callback-based entry point per operation, and
//! flattens every failure into the literal [`HostError`] triple the host
//! promise layer rejects with.

pub mod async_bridge;
pub mod module;

pub use async_bridge::{AsyncRuntime, FfiCallback, ResultCallback};
pub use module::BridgeModule;

use paybridge_lib::BridgeError;
use serde::{Deserialize, Serialize};

/// Flattened error shape handed to host runtimes.
///
/// `kind` names the exception category, `domain` the finer-grained reason,
/// and `message` carries human-readable text (often the vendor's own
/// wording, untouched).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{kind} [{domain}]: {message}")]
pub struct HostError {
    /// Error category identifier, e.g. `"TokenizeError"`.
    pub kind: String,
    /// Finer-grained reason, e.g. `"CARD_TOKENIZATION_ERROR"`.
    pub domain: String,
    /// Human-readable text.
    pub message: String,
}

impl From<BridgeError> for HostError {
    fn from(error: BridgeError) -> Self {
        let triple = error.triple();
        Self {
            kind: triple.kind,
            domain: triple.domain,
            message: triple.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_carries_the_full_triple() {
        let err = HostError::from(BridgeError::MissingMerchantName);
        assert_eq!(err.kind, "MissingMerchantName");
        assert_eq!(err.domain, "MERCHANT_NAME_ERROR");
        assert!(err.message.contains("merchantName"));
    }

    #[test]
    fn host_error_serializes_flat() {
        let err = HostError::from(BridgeError::UserCancelled);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "UserCancelled");
        assert_eq!(json["domain"], "USER_CANCEL_TRANSACTION_ERROR");
    }
}
