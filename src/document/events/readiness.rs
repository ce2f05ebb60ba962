//! # Readiness
//!
//! One-shot completion signal used for context readiness and for
//! collaborative-session connection. The owner keeps the [`ReadySignal`];
//! anyone interested takes a [`ReadyWaiter`].

use thiserror::Error;
use tokio::sync::watch;

/// Returned when the owning signal is dropped before it resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadyError {
    #[error("readiness was abandoned before it resolved")]
    Abandoned,
}

/// Owner side of a one-shot readiness flag
#[derive(Debug)]
pub struct ReadySignal {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Resolve the signal. Only the first call has an effect.
    pub fn resolve(&self) -> bool {
        self.tx.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }

    pub fn is_resolved(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn waiter(&self) -> ReadyWaiter {
        ReadyWaiter {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Waiting side of a [`ReadySignal`]
#[derive(Debug, Clone)]
pub struct ReadyWaiter {
    rx: watch::Receiver<bool>,
}

impl ReadyWaiter {
    /// Completes once the signal resolves, immediately if it already has
    pub async fn wait(mut self) -> Result<(), ReadyError> {
        self.rx
            .wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| ReadyError::Abandoned)
    }

    pub fn is_resolved(&self) -> bool {
        *self.rx.borrow()
    }
}
