//! Async-to-callback plumbing for host platforms.
//!
//! Host runtimes deliver results through completion handlers, not Rust
//! futures. [`AsyncRuntime`] owns a Tokio runtime and runs bridge futures to
//! completion, forwarding the outcome to a [`ResultCallback`] implemented on
//! the host side of the boundary.

use std::sync::Arc;

use crate::HostError;

/// Result callback implemented by host code.
///
/// Exactly one of the two methods is invoked per operation, matching the
/// exactly-once settlement guarantee of the underlying bridge.
pub trait ResultCallback<T>: Send + Sync {
    /// The operation settled successfully.
    fn on_success(&self, value: T);

    /// The operation settled with a normalized failure.
    fn on_error(&self, error: HostError);
}

/// Tokio runtime wrapper for host threads.
///
/// Host platform threads are not Tokio worker threads, so the module owns
/// its own runtime and drives bridge futures on it.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
}

impl AsyncRuntime {
    /// Create a multi-threaded runtime.
    pub fn new() -> Result<Self, HostError> {
        tokio::runtime::Runtime::new()
            .map(|runtime| Self { runtime })
            .map_err(|e| HostError {
                kind: "GenericPlatformError".to_string(),
                domain: "PLATFORM_ERROR".to_string(),
                message: format!("failed to create runtime: {}", e),
            })
    }

    /// Run a future to completion, blocking the calling thread.
    ///
    /// Must only be called from host threads that are not managed by Tokio;
    /// calling it from within a runtime context panics.
    pub fn block_on<F, T>(&self, future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        self.runtime.block_on(future)
    }

    /// Spawn a bridge future and route its outcome to the callback.
    pub fn spawn_with_callback<F, T, C>(&self, future: F, callback: Arc<C>)
    where
        F: std::future::Future<Output = Result<T, HostError>> + Send + 'static,
        T: Send + 'static,
        C: ResultCallback<T> + ?Sized + 'static,
    {
        self.runtime.spawn(async move {
            match future.await {
                Ok(value) => callback.on_success(value),
                Err(error) => callback.on_error(error),
            }
        });
    }

    /// Spawn a fire-and-forget future.
    pub fn spawn<F>(&self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(future);
    }
}

/// Closure-backed callback for FFI shims.
#[derive(Clone)]
pub struct FfiCallback<T> {
    success_fn: Arc<dyn Fn(T) + Send + Sync>,
    error_fn: Arc<dyn Fn(HostError) + Send + Sync>,
}

impl<T> FfiCallback<T> {
    /// Build a callback from a pair of closures.
    pub fn new<S, E>(success_fn: S, error_fn: E) -> Self
    where
        S: Fn(T) + Send + Sync + 'static,
        E: Fn(HostError) + Send + Sync + 'static,
    {
        Self {
            success_fn: Arc::new(success_fn),
            error_fn: Arc::new(error_fn),
        }
    }
}

impl<T: Send + Sync + 'static> ResultCallback<T> for FfiCallback<T> {
    fn on_success(&self, value: T) {
        (self.success_fn)(value);
    }

    fn on_error(&self, error: HostError) {
        (self.error_fn)(error);
    }
}
