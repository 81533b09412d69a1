//! Per-key mutual exclusion for read-check-write sequences.

use std::sync::{Mutex, MutexGuard, PoisonError};

use census_core::PersonId;

const DEFAULT_STRIPES: usize = 64;

/// Striped lock table keyed by person id.
///
/// Two operations on the same id always contend for the same stripe; operations
/// on different ids usually proceed in parallel.
#[derive(Debug)]
pub struct KeyLocks {
    stripes: Box<[Mutex<()>]>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::with_stripes(DEFAULT_STRIPES)
    }

    /// `stripes` is clamped to at least 1.
    pub fn with_stripes(stripes: usize) -> Self {
        let stripes = (0..stripes.max(1)).map(|_| Mutex::new(())).collect();
        Self { stripes }
    }

    /// Lock the stripe guarding `id` until the guard is dropped.
    pub fn lock(&self, id: PersonId) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned stripe carries no broken state.
        self.stripes[self.stripe_of(id)]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn stripe_of(&self, id: PersonId) -> usize {
        id.get().unsigned_abs() as usize % self.stripes.len()
    }
}

impl Default for KeyLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_maps_to_same_stripe() {
        let locks = KeyLocks::with_stripes(8);
        assert_eq!(locks.stripe_of(PersonId::new(3)), locks.stripe_of(PersonId::new(3)));
        assert_eq!(locks.stripe_of(PersonId::new(-3)), locks.stripe_of(PersonId::new(3)));
        assert!(locks.stripe_of(PersonId::new(i32::MIN)) < 8);
    }

    #[test]
    fn zero_stripes_is_clamped() {
        let locks = KeyLocks::with_stripes(0);
        let _guard = locks.lock(PersonId::new(42));
    }
}
