//! paybridge-lib: single-flight asynchronous bridge over native payment SDKs.
//!
//! The crate drives PayPal vault/checkout tokenization, raw card
//! tokenization, device-data collection, and the Apple Pay / Google Pay
//! wallet sheets through one vendor-agnostic seam, with three load-bearing
//! guarantees:
//!
//! - **Single flight.** A bridge holds at most one pending request; starting
//!   a new one abandons the previous, which settles with a platform error.
//! - **Exactly-once settlement.** Vendor SDKs fire duplicate and racing
//!   completion signals; the first terminal signal wins, every later one is
//!   absorbed. See [`settlement`].
//! - **Closed error taxonomy.** Every failure is a `(kind, domain, message)`
//!   triple from a fixed vocabulary. See [`errors`].
//!
//! Validation happens in pure [`adapters`] before any vendor client exists.
//! Out-of-process round trips (the PayPal browser switch) are re-entered
//! through [`Bridge::on_host_resume`]; Google Pay results arrive through a
//! registered [`GooglePayListener`] rather than the launching call.
//!
//! ```no_run
//! use std::sync::Arc;
//! use paybridge_lib::{Bridge, ClientToken};
//! # use paybridge_lib::host::{HostContextProvider, HostHandle};
//! # struct Host;
//! # impl HostContextProvider for Host {
//! #     fn current(&self) -> Option<HostHandle> { Some(HostHandle::new("main")) }
//! # }
//! # async fn run(vendor: Arc<dyn paybridge_lib::vendor::VendorSdk>) -> paybridge_lib::Result<()> {
//! let bridge = Bridge::new(vendor, Arc::new(Host));
//! let device_data = bridge
//!     .collect_device_data(ClientToken::new("sandbox_abc123"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod adapters;
pub mod bridge;
pub mod config;
pub mod errors;
pub mod host;
pub mod results;
pub mod settlement;
pub mod vendor;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use bridge::{Bridge, GooglePayListener};
pub use config::{
    ApplePayConfig, BillingAgreementConfig, CardConfig, CheckoutIntent, GooglePayConfig,
    GooglePayEnvironment, OneTimePaymentConfig, UserAction,
};
pub use errors::{BridgeError, ErrorKind, ErrorTriple, TokenizeFlow, Wallet};
pub use host::{HostContextProvider, HostHandle};
pub use results::{
    ApplePayOutcome, CardNonce, DeviceData, GooglePayNonce, PayPalAccountNonce, PostalAddress,
};
pub use settlement::{Completion, SettleOnce};

/// Convenience alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Opaque authorization obtained from the merchant server.
///
/// Every operation carries its own token; the bridge never caches one
/// across operations. The only local inspection is an emptiness check —
/// everything else is the vendor's business.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(String);

impl ClientToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty and therefore unusable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ClientToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClientToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}
