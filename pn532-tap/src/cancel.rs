// pn532-tap/src/cancel.rs

//! Cooperative cancellation shared between the signal handler and the
//! worker loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::{Error, Result};

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    reason: OnceLock<String>,
}

/// Cloneable shutdown flag. Cancelling is idempotent: the first reason
/// wins and later calls are no-ops.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Returns `true` only for the call that actually
    /// flipped the flag.
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        let _ = self.inner.reason.set(reason.into());
        !self.inner.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    pub fn reason(&self) -> Option<String> {
        self.inner.reason.get().cloned()
    }

    /// `Err(Error::Cancelled)` once shutdown has been requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
