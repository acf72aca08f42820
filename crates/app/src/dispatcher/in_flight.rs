//! In-flight operation keys.

use parking_lot::Mutex;
use petgo::mutations::OperationKey;
use rustc_hash::FxHashSet;

/// Operation keys with a request currently in flight.
///
/// The lock is only held to insert, remove or copy keys, never across an
/// await.
#[derive(Debug, Default)]
pub struct InFlight {
    keys: Mutex<FxHashSet<OperationKey>>,
}

impl InFlight {
    /// Mark `key` busy, or return `None` if it already is.
    ///
    /// The key is released when the guard drops.
    pub fn try_acquire(&self, key: OperationKey) -> Option<InFlightGuard<'_>> {
        let inserted = self.keys.lock().insert(key);

        inserted.then(|| InFlightGuard { set: self, key })
    }

    /// Check if `key` is busy.
    pub fn contains(&self, key: OperationKey) -> bool {
        self.keys.lock().contains(&key)
    }

    /// Copy of the busy keys.
    pub fn snapshot(&self) -> FxHashSet<OperationKey> {
        self.keys.lock().clone()
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    set: &'a InFlight,
    key: OperationKey,
}

impl InFlightGuard<'_> {
    /// The guarded key
    pub fn key(&self) -> OperationKey {
        self.key
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.keys.lock().remove(&self.key);
    }
}
