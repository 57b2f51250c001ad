//! Shared test helpers.
//!
//! Enabled for this crate's own tests and, behind the `test-utils` feature,
//! for downstream crates that want a scripted vendor without touching real
//! payment SDKs.

pub mod fixtures;
mod mock_vendor;

pub use mock_vendor::{
    ApplePayScript, CardScript, DeviceDataScript, MockVendor, PayPalScript, StaticHostContext,
};
