//! Memoizers for actions that return nothing.
//!
//! The action runs at most once per key. The cache stores the key itself as
//! the value of each entry, only to record that the action already ran.

use crate::cache::{Cache, ConcurrentCache, IntoSharedCache};
use crate::keys::DefaultKey;
use crate::memoizer::{compute_if_absent, KeyFn};
use std::convert::Infallible;
use std::hash::Hash;
use std::sync::Arc;

type Action<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Runs the action unless its key was seen before.
fn accept_once<A, K, C>(name: &str, cache: &C, key_fn: &KeyFn<A, K>, action: &Action<A>, args: A)
where
    K: Clone,
    C: Cache<K, K> + ?Sized,
{
    let key = key_fn(&args);
    let sentinel = key.clone();
    let ran = compute_if_absent(name, cache, key, || {
        action(args);
        Ok::<K, Infallible>(sentinel)
    });
    if let Err(never) = ran {
        match never {}
    }
}

pub struct MemoizedConsumer<T, K, C = ConcurrentCache<K, K>> {
    name: Arc<str>,
    cache: Arc<C>,
    key_fn: KeyFn<T, K>,
    action: Action<T>,
}

impl<T, K> MemoizedConsumer<T, K>
where
    T: DefaultKey<Key = K> + 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn with_default_key(action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(ConcurrentCache::new(), T::default_key, action)
    }
}

impl<T, K, C> MemoizedConsumer<T, K, C>
where
    T: 'static,
    K: Clone + 'static,
    C: Cache<K, K>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, K, Cache = C>,
        key_fn: impl Fn(&T) -> K + Send + Sync + 'static,
        action: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        MemoizedConsumer {
            name: Arc::from("consumer"),
            cache: cache.into_shared(),
            key_fn: Arc::new(key_fn),
            action: Arc::new(action),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Arc::from(name);
        self
    }

    pub fn accept(&self, value: T) {
        accept_once(&self.name, self.cache.as_ref(), &self.key_fn, &self.action, value);
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }
}

impl<T, K, C> Clone for MemoizedConsumer<T, K, C> {
    fn clone(&self) -> Self {
        MemoizedConsumer {
            name: Arc::clone(&self.name),
            cache: Arc::clone(&self.cache),
            key_fn: Arc::clone(&self.key_fn),
            action: Arc::clone(&self.action),
        }
    }
}

pub struct MemoizedBiConsumer<T, U, K, C = ConcurrentCache<K, K>> {
    name: Arc<str>,
    cache: Arc<C>,
    key_fn: KeyFn<(T, U), K>,
    action: Action<(T, U)>,
}

impl<T, U, K> MemoizedBiConsumer<T, U, K>
where
    (T, U): DefaultKey<Key = K>,
    T: 'static,
    U: 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn with_default_key(action: impl Fn(T, U) + Send + Sync + 'static) -> Self {
        MemoizedBiConsumer {
            name: Arc::from("bi-consumer"),
            cache: Arc::new(ConcurrentCache::new()),
            key_fn: Arc::new(<(T, U)>::default_key),
            action: Arc::new(move |(t, u): (T, U)| action(t, u)),
        }
    }
}

impl<T, U, K, C> MemoizedBiConsumer<T, U, K, C>
where
    T: 'static,
    U: 'static,
    K: Clone + 'static,
    C: Cache<K, K>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, K, Cache = C>,
        key_fn: impl Fn(&T, &U) -> K + Send + Sync + 'static,
        action: impl Fn(T, U) + Send + Sync + 'static,
    ) -> Self {
        MemoizedBiConsumer {
            name: Arc::from("bi-consumer"),
            cache: cache.into_shared(),
            key_fn: Arc::new(move |(t, u): &(T, U)| key_fn(t, u)),
            action: Arc::new(move |(t, u): (T, U)| action(t, u)),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Arc::from(name);
        self
    }

    pub fn accept(&self, first: T, second: U) {
        accept_once(&self.name, self.cache.as_ref(), &self.key_fn, &self.action, (first, second));
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }
}

impl<T, U, K, C> Clone for MemoizedBiConsumer<T, U, K, C> {
    fn clone(&self) -> Self {
        MemoizedBiConsumer {
            name: Arc::clone(&self.name),
            cache: Arc::clone(&self.cache),
            key_fn: Arc::clone(&self.key_fn),
            action: Arc::clone(&self.action),
        }
    }
}
