//! Exactly-once settlement primitives.
//!
//! A pending request is settled by the first of success, failure, or
//! cancellation to arrive; every later signal must be a no-op. Vendor SDKs
//! are observed to fire more than one completion signal for a single
//! request, so the guard is explicit — a consumed one-shot sender for
//! promise-shaped flows ([`Completion`]) and an atomic latch for
//! event-listener flows ([`SettleOnce`]).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::debug;

use crate::vendor::VendorError;

/// Outcome carried from a vendor flow to the awaiting bridge.
pub type FlowOutcome<T> = Result<T, VendorError>;

/// Create a pending request: a settle handle for the vendor side and a
/// receiver for the bridge side.
pub fn pending<T: Send>() -> (Completion<T>, oneshot::Receiver<FlowOutcome<T>>) {
    let (tx, rx) = oneshot::channel();
    (
        Completion {
            tx: Arc::new(Mutex::new(Some(tx))),
        },
        rx,
    )
}

/// Settle handle for one pending request.
///
/// Cloneable so it can be handed to several racing callback sources; the
/// underlying sender is consumed by the first settlement, which makes a
/// second settlement structurally impossible. `success`/`failure` return
/// whether this call was the one that settled, so callers can stop
/// immediately after a losing race.
pub struct Completion<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<FlowOutcome<T>>>>>,
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Send> Completion<T> {
    /// Settle with a success payload. Returns `false` if already settled.
    pub fn success(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle with a vendor failure. Returns `false` if already settled.
    pub fn failure(&self, error: VendorError) -> bool {
        self.settle(Err(error))
    }

    /// Whether a settlement already happened (or the request was abandoned).
    pub fn is_settled(&self) -> bool {
        self.tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }

    /// Drop the request without settling it. The awaiting side observes the
    /// closed channel; used when a newer operation replaces this one.
    pub(crate) fn abandon(&self) {
        let _ = self
            .tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
    }

    fn settle(&self, outcome: FlowOutcome<T>) -> bool {
        let sender = self
            .tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        match sender {
            Some(tx) => {
                // Receiver may already be gone (caller dropped the future);
                // the settlement still counts as consumed.
                let _ = tx.send(outcome);
                true
            }
            None => {
                debug!("late settlement signal ignored");
                false
            }
        }
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}

/// Atomic one-shot latch for event-listener settlement paths.
///
/// `settle` flips the latch and reports whether this call won; only the
/// winner may forward the event.
#[derive(Debug, Default)]
pub struct SettleOnce(AtomicBool);

impl SettleOnce {
    /// Create an unsettled latch.
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Attempt to settle. Returns `true` exactly once.
    pub fn settle(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the latch has been consumed.
    pub fn is_settled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
