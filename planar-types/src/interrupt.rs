//! Cooperative cancellation of long-running geometric operations.
//!
//! The host owns the flag: [`request`] asks the in-progress operation to
//! abort, and deeply recursive traversals (index construction, tree
//! distance, serialization) poll [`check`] at bounded intervals. A set flag
//! makes the polling operation free its partial result and return
//! [`Error::Interrupted`]. The flag is a single process-wide cell; the host
//! is responsible for single-threading access around it.

use crate::Error;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Ask the currently running operation to abort.
pub fn request() {
    INTERRUPT_REQUESTED.store(true, Ordering::Relaxed);
}

/// Withdraw a pending interrupt request.
pub fn clear() {
    INTERRUPT_REQUESTED.store(false, Ordering::Relaxed);
}

/// Poll the flag. Consumes a pending request and reports it as
/// [`Error::Interrupted`].
pub fn check() -> Result<(), Error> {
    if INTERRUPT_REQUESTED.swap(false, Ordering::Relaxed) {
        Err(Error::Interrupted)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn request_is_consumed_by_check() {
        clear();
        assert_eq!(check(), Ok(()));
        request();
        assert_eq!(check(), Err(Error::Interrupted));
        // The request was consumed.
        assert_eq!(check(), Ok(()));
    }
}
