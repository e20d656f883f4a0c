//! Pluggable equality + hash contract used by set operations, grouping,
//! joins and keyed materialization.
//!
//! Implementations MUST be consistent: `equals(a, b)` implies
//! `hash(a) == hash(b)`. The engine buckets by `hash` and only calls
//! `equals` inside a bucket, so an inconsistent comparer silently splits
//! groups that should have merged.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;

    fn hash(&self, value: &T) -> u64;
}

impl<T: ?Sized, C: EqualityComparer<T> + ?Sized> EqualityComparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (**self).hash(value)
    }
}

/// Hash a value with the std SipHash hasher (zero keys, so stable within a build).
pub fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

/// Natural equality: `Eq + Hash`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultComparer;

impl<T: Eq + Hash + ?Sized> EqualityComparer<T> for DefaultComparer {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash(&self, value: &T) -> u64 {
        hash_of(value)
    }
}

/// Compares composite values by a projected key, e.g. `KeyComparer::new(|p: &Person| p.id)`.
pub struct KeyComparer<F, K> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> KeyComparer<F, K> {
    pub fn new<T>(key: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        Self {
            key,
            _key: PhantomData,
        }
    }
}

impl<F: Clone, K> Clone for KeyComparer<F, K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _key: PhantomData,
        }
    }
}

impl<T, K, F> EqualityComparer<T> for KeyComparer<F, K>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash(&self, value: &T) -> u64 {
        hash_of(&(self.key)(value))
    }
}

/// Comparer assembled from an equality closure and a hash closure.
#[derive(Clone, Copy)]
pub struct FnComparer<E, H> {
    eq: E,
    hash: H,
}

impl<E, H> FnComparer<E, H> {
    pub fn new(eq: E, hash: H) -> Self {
        Self { eq, hash }
    }
}

impl<T, E, H> EqualityComparer<T> for FnComparer<E, H>
where
    T: ?Sized,
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}

/// ASCII case-insensitive string equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreAsciiCase;

impl EqualityComparer<str> for IgnoreAsciiCase {
    fn equals(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    fn hash(&self, value: &str) -> u64 {
        let mut h = DefaultHasher::new();
        for b in value.bytes() {
            h.write_u8(b.to_ascii_lowercase());
        }
        h.finish()
    }
}

impl EqualityComparer<&str> for IgnoreAsciiCase {
    fn equals(&self, a: &&str, b: &&str) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    fn hash(&self, value: &&str) -> u64 {
        EqualityComparer::<str>::hash(self, value)
    }
}

impl EqualityComparer<String> for IgnoreAsciiCase {
    fn equals(&self, a: &String, b: &String) -> bool {
        EqualityComparer::<str>::equals(self, a, b)
    }

    fn hash(&self, value: &String) -> u64 {
        EqualityComparer::<str>::hash(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_comparer_agrees_with_eq() {
        let c = DefaultComparer;
        assert!(c.equals(&(1, "a"), &(1, "a")));
        assert!(!c.equals(&(1, "a"), &(1, "b")));
        assert_eq!(
            EqualityComparer::<(i32, &str)>::hash(&c, &(1, "a")),
            EqualityComparer::<(i32, &str)>::hash(&c, &(1, "a"))
        );
    }

    #[test]
    fn key_comparer_ignores_other_fields() {
        let c = KeyComparer::new(|p: &(u32, String)| p.0);
        let bob = (7, "Bob".to_string());
        let robert = (7, "Robert".to_string());
        assert!(c.equals(&bob, &robert));
        assert_eq!(c.hash(&bob), c.hash(&robert));
        assert!(!c.equals(&bob, &(8, "Bob".to_string())));
    }

    #[test]
    fn ignore_ascii_case_is_consistent() {
        let c = IgnoreAsciiCase;
        let a = String::from("Bob");
        let b = String::from("bOB");
        assert!(c.equals(&a, &b));
        assert_eq!(c.hash(&a), c.hash(&b));
        assert!(!c.equals(&a, &String::from("Bobby")));
    }
}
