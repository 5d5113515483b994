//! Key derivation: the default key of each argument type, and free functions
//! that can be handed to a memoizer as its key function.

use itertools::Itertools;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The single key shared by every call of a memoizer without arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StaticKey;

impl fmt::Display for StaticKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "static")
    }
}

/// Key for a floating point argument, compared by bit pattern.
///
/// `-0.0` and `0.0` map to the same key, and so do all NaNs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        let canonical = if value == 0.0 {
            0.0
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        FloatKey(canonical.to_bits())
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<f64> for FloatKey {
    fn from(value: f64) -> Self {
        FloatKey::new(value)
    }
}

impl From<f32> for FloatKey {
    fn from(value: f32) -> Self {
        FloatKey::new(f64::from(value))
    }
}

impl From<FloatKey> for f64 {
    fn from(key: FloatKey) -> Self {
        key.value()
    }
}

impl fmt::Display for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Arguments that know how to key themselves.
pub trait DefaultKey {
    type Key: Eq + Hash + Clone + Send + Sync + 'static;

    fn default_key(&self) -> Self::Key;
}

macro_rules! self_keyed {
    ($($t:ty),*) => {
        $(
            impl DefaultKey for $t {
                type Key = $t;

                fn default_key(&self) -> $t {
                    self.clone()
                }
            }
        )*
    };
}

self_keyed!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String, &'static str);

impl DefaultKey for f64 {
    type Key = FloatKey;

    fn default_key(&self) -> FloatKey {
        FloatKey::new(*self)
    }
}

impl DefaultKey for f32 {
    type Key = FloatKey;

    fn default_key(&self) -> FloatKey {
        FloatKey::from(*self)
    }
}

impl DefaultKey for () {
    type Key = StaticKey;

    fn default_key(&self) -> StaticKey {
        StaticKey
    }
}

impl<T: DefaultKey, U: DefaultKey> DefaultKey for (T, U) {
    type Key = (T::Key, U::Key);

    fn default_key(&self) -> Self::Key {
        (self.0.default_key(), self.1.default_key())
    }
}

pub fn default_key<T: DefaultKey>(value: &T) -> T::Key {
    value.default_key()
}

pub fn identity<T: Clone>(value: &T) -> T {
    value.clone()
}

/// Ignores the arguments: every call shares one cache entry.
pub fn static_key<T: ?Sized>(_: &T) -> StaticKey {
    StaticKey
}

/// Hash code of `value`. Stable for the lifetime of the process only.
pub fn hash_code<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Joins hash codes into a single string key, separated by spaces.
pub fn hash_concat(codes: impl IntoIterator<Item = u64>) -> String {
    codes.into_iter().join(" ")
}

/// String key built from the hash codes of both arguments.
///
/// Unequal arguments with colliding hash codes share an entry, so prefer the
/// tuple key of [`DefaultKey`] when the arguments are cloneable.
pub fn hash_pair<T: Hash, U: Hash>(first: &T, second: &U) -> String {
    hash_concat([hash_code(first), hash_code(second)])
}

/// `"{first} {second}"`.
pub fn space_joined<T: fmt::Display, U: fmt::Display>(first: &T, second: &U) -> String {
    format!("{} {}", first, second)
}
