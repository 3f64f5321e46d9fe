//! Single-slot memoization keyed on explicit inputs.

/// Caches the last computed value together with the key it was computed for.
///
/// A lookup with a different key recomputes and replaces the slot.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Create an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, computing it only when the cached key differs.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if !self.is_cached(&key) {
            self.slot = None;
        }
        let (_, value) = self.slot.get_or_insert_with(|| (key, compute()));
        value
    }

    /// Whether the slot currently holds the value for `key`.
    #[must_use]
    pub fn is_cached(&self, key: &K) -> bool {
        self.slot.as_ref().is_some_and(|(cached, _)| cached == key)
    }

    /// Drop the cached value.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_same_key_computes_once() {
        let calls = Cell::new(0);
        let mut memo = Memo::new();

        for _ in 0..3 {
            let value = memo.get_or_compute(7, || {
                calls.set(calls.get() + 1);
                49
            });
            assert_eq!(*value, 49);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_new_key_recomputes() {
        let mut memo = Memo::new();
        assert_eq!(*memo.get_or_compute("a", || 1), 1);
        assert_eq!(*memo.get_or_compute("b", || 2), 2);
        assert!(memo.is_cached(&"b"));
        assert!(!memo.is_cached(&"a"));
    }

    #[test]
    fn test_invalidate() {
        let mut memo = Memo::new();
        memo.get_or_compute(1, || "one");
        memo.invalidate();
        assert!(!memo.is_cached(&1));
        assert_eq!(*memo.get_or_compute(1, || "uno"), "uno");
    }
}
