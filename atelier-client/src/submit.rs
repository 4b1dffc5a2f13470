//! Single in-flight submission guard
//!
//! A save button stays disabled while its request is pending. `SubmitGate`
//! is that rule without a UI: one gate per user action, at most one
//! submission through it at a time.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    busy: Arc<AtomicBool>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Fails with [`ClientError::Busy`] while another
    /// submission holds it.
    pub fn try_begin(&self) -> ClientResult<SubmitGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                tracing::debug!("Submission rejected, gate busy");
                ClientError::Busy
            })?;

        Ok(SubmitGuard {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run `submission` while holding the gate
    pub async fn submit<T, Fut>(&self, submission: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let _guard = self.try_begin()?;
        submission.await
    }
}

/// Releases the gate on drop, also when the submission future is cancelled
#[derive(Debug)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
