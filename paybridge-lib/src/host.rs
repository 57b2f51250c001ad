//! Host UI context abstraction.
//!
//! Vendor flows need a foreground UI context to present payment sheets and
//! browser tabs. The host can destroy and recreate that context between
//! operations, so the bridge never caches it: the provider is asked again at
//! the start of every operation.

/// Opaque identifier for the current foreground UI context.
///
/// The bridge never looks inside; it only hands the handle to the vendor
/// and uses it to key browser-switch result delivery.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostHandle(pub String);

impl HostHandle {
    /// Create a handle from a host-specific identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HostHandle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for HostHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves the current foreground UI context on demand.
///
/// Implemented by the embedding host runtime. Returning `None` means no UI
/// is available and the operation fails with a client-initialization error
/// before any vendor interaction.
pub trait HostContextProvider: Send + Sync {
    /// The current foreground context, if any.
    fn current(&self) -> Option<HostHandle>;
}
