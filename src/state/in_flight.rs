//! Single-flight gate for user-triggered operations.

use crate::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag marking an operation as outstanding.
///
/// While a guard from [`InFlight::try_acquire`] is alive, further acquisitions
/// fail with [`Error::Busy`]. Clones share the same flag.
#[derive(Debug, Clone)]
pub struct InFlight {
    operation: &'static str,
    active: Arc<AtomicBool>,
}

impl InFlight {
    /// Creates an idle flag for the named operation.
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns whether an operation is currently outstanding.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks the operation as started.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] if the operation is already in flight.
    pub fn try_acquire(&self) -> Result<InFlightGuard> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy {
                operation: self.operation,
            })?;

        tracing::trace!(operation = self.operation, "Operation started");
        Ok(InFlightGuard {
            operation: self.operation,
            active: Arc::clone(&self.active),
        })
    }
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
#[must_use = "the operation is only marked in flight while the guard is held"]
pub struct InFlightGuard {
    operation: &'static str,
    active: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        tracing::trace!(operation = self.operation, "Operation finished");
    }
}
