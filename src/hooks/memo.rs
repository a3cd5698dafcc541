//! Memoized computation

/// Caches one value, recomputed only when its dependencies change
#[derive(Debug, Clone)]
pub struct Memo<D, V> {
    cached: Option<(D, V)>,
    recomputations: u64,
}

impl<D, V> Default for Memo<D, V> {
    fn default() -> Self {
        Self {
            cached: None,
            recomputations: 0,
        }
    }
}

impl<D: PartialEq + Clone, V: Clone> Memo<D, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `deps`, computing it first if the deps changed.
    ///
    /// The flag is `true` when `compute` ran.
    pub fn get_or_compute<F: FnOnce(&D) -> V>(&mut self, deps: D, compute: F) -> (V, bool) {
        if let Some((cached_deps, value)) = &self.cached {
            if *cached_deps == deps {
                return (value.clone(), false);
            }
        }
        let value = compute(&deps);
        self.recomputations += 1;
        self.cached = Some((deps, value.clone()));
        (value, true)
    }

    /// Dependencies of the cached value
    pub fn deps(&self) -> Option<&D> {
        self.cached.as_ref().map(|(deps, _)| deps)
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_deps_hit_cache() {
        let mut memo = Memo::new();
        assert_eq!(memo.get_or_compute(3, |n| n * 2), (6, true));
        assert_eq!(memo.get_or_compute(3, |_| unreachable!()), (6, false));
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn test_changed_deps_recompute() {
        let mut memo = Memo::new();
        memo.get_or_compute(1, |n| n + 1);
        assert_eq!(memo.get_or_compute(2, |n| n + 1), (3, true));
        assert_eq!(memo.deps(), Some(&2));
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn test_invalidate() {
        let mut memo = Memo::new();
        memo.get_or_compute("a".to_string(), |s| s.len());
        memo.invalidate();
        assert_eq!(memo.get_or_compute("a".to_string(), |s| s.len()), (1, true));
    }
}
