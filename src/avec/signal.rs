//! Cross-call abort signal shared with the owning scheduler.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

extern crate std;

/// A flag raised when decoding hits a fault it cannot recover from.
///
/// Clones share the same flag. Once raised, it stays raised.
#[derive(Debug, Default, Clone)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
