use std::marker::PhantomData;

/// Vec wrapper that uses typed indexes.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct IdVec<K, V> {
    vec: Vec<V>,
    _phantom: PhantomData<K>,
}

impl<K, V> IdVec<K, V> {
    /// Create a new `IdVec` with the given capacity.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            vec: Vec::with_capacity(cap),
            _phantom: PhantomData,
        }
    }

    /// Get the current length
    #[inline]
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// True if len == 0
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Iterate through values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.vec.iter()
    }
}

impl<K: Into<usize>, V> IdVec<K, V> {
    /// Get the value with id `k`.
    /// Ids handed out by `push` on this `IdVec` are always valid.
    #[inline]
    pub fn get(&self, k: K) -> &V {
        &self.vec[k.into()]
    }
}

impl<K: From<usize>, V> IdVec<K, V> {
    /// Push `v` into the underlying vec, and return an id that can be used to retrieve it later.
    #[inline]
    pub fn push(&mut self, v: V) -> K {
        let id = self.vec.len().into();
        self.vec.push(v);
        id
    }
}

#[cfg(test)]
mod test {
    use super::IdVec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Key(u8);

    impl From<usize> for Key {
        fn from(val: usize) -> Self {
            Self(val as u8)
        }
    }

    impl From<Key> for usize {
        fn from(k: Key) -> usize {
            k.0 as usize
        }
    }

    #[test]
    fn test_push_get() {
        let mut v: IdVec<Key, &str> = IdVec::with_capacity(2);
        assert!(v.is_empty());
        let a = v.push("a");
        let b = v.push("b");
        assert_eq!(Key(0), a);
        assert_eq!(Key(1), b);
        assert_eq!("b", *v.get(b));
        assert_eq!(vec!["a", "b"], v.iter().copied().collect::<Vec<_>>());
        assert_eq!(2, v.len());
    }
}
