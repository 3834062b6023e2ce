//! RAII guard for one held reference.

use super::counter::ReferenceCounter;
use crate::error::Result;
use tracing::warn;

/// One reference held on a [`ReferenceCounter`].
///
/// When dropped without an explicit [`release`](Self::release), the
/// reference is given back automatically. If that fails, a warning is logged
/// but no panic occurs.
#[must_use = "dropping the guard releases the reference immediately"]
pub struct ActiveReference<'a> {
    counter: &'a dyn ReferenceCounter,

    /// Whether the reference has been released manually.
    released: bool,
}

impl<'a> ActiveReference<'a> {
    /// Take a reference, incrementing the counter.
    pub fn acquire(counter: &'a dyn ReferenceCounter) -> Result<Self> {
        counter.increment()?;
        Ok(Self {
            counter,
            released: false,
        })
    }

    /// Give the reference back now and report any error.
    ///
    /// Returns the count after the decrement.
    pub fn release(mut self) -> Result<u32> {
        self.released = true;
        self.counter.decrement()
    }
}

impl Drop for ActiveReference<'_> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.counter.decrement()
        {
            warn!(error = %e, "failed to release reference");
        }
    }
}

impl std::fmt::Debug for ActiveReference<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveReference")
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
