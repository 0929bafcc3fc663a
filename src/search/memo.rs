//! Single-slot memoization for pipeline stages.

use std::sync::{Mutex, PoisonError};

/// Remembers the last `(key, value)` pair computed by a pipeline stage.
///
/// A new key replaces the previous pair wholesale; nothing else is cached.
#[derive(Debug)]
pub struct Memo<K, V> {
    last: Mutex<Option<(K, V)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    /// Returns the value for `key`, computing it only if the last key differs.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_key, value)) = last.as_ref()
            && *cached_key == key
        {
            return value.clone();
        }

        let value = compute(&key);
        *last = Some((key, value.clone()));
        value
    }

    /// Drops the remembered pair.
    pub fn clear(&self) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
