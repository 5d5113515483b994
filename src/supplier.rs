//! Memoizers for callables without arguments.
//!
//! With the default [`StaticKey`] every call shares one cached value, no matter
//! when or from where it is made. A custom key function (reading a clock, a
//! thread-local, ...) splits the calls into several entries.

use crate::cache::{Cache, ConcurrentCache, IntoSharedCache};
use crate::keys::StaticKey;
use crate::memoizer::Memoizer;
use std::convert::Infallible;
use std::sync::Arc;

pub struct MemoizedSupplier<V, K = StaticKey, C = ConcurrentCache<K, V>> {
    memoizer: Memoizer<(), K, V, Infallible, C>,
}

impl<V> MemoizedSupplier<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn with_default_key(supplier: impl Fn() -> V + Send + Sync + 'static) -> Self {
        Self::with_cache(ConcurrentCache::new(), supplier)
    }
}

impl<V, C> MemoizedSupplier<V, StaticKey, C>
where
    V: 'static,
    C: Cache<StaticKey, V>,
{
    pub fn with_cache(
        cache: impl IntoSharedCache<StaticKey, V, Cache = C>,
        supplier: impl Fn() -> V + Send + Sync + 'static,
    ) -> Self {
        Self::new(cache, || StaticKey, supplier)
    }
}

impl<V, K, C> MemoizedSupplier<V, K, C>
where
    V: 'static,
    K: 'static,
    C: Cache<K, V>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, V, Cache = C>,
        key_fn: impl Fn() -> K + Send + Sync + 'static,
        supplier: impl Fn() -> V + Send + Sync + 'static,
    ) -> Self {
        MemoizedSupplier {
            memoizer: Memoizer::new(cache, move |_: &()| key_fn(), move |()| supplier()),
        }
    }

    pub fn get(&self) -> V {
        self.memoizer.call(())
    }

    pub fn cache(&self) -> &Arc<C> {
        self.memoizer.cache()
    }

    pub fn memoizer(&self) -> &Memoizer<(), K, V, Infallible, C> {
        &self.memoizer
    }
}

impl<V, K, C> From<Memoizer<(), K, V, Infallible, C>> for MemoizedSupplier<V, K, C> {
    fn from(memoizer: Memoizer<(), K, V, Infallible, C>) -> Self {
        MemoizedSupplier { memoizer }
    }
}

impl<V, K, C> Clone for MemoizedSupplier<V, K, C> {
    fn clone(&self) -> Self {
        MemoizedSupplier {
            memoizer: self.memoizer.clone(),
        }
    }
}

/// A supplier whose computation can fail.
///
/// The error is returned to the caller exactly as produced and no value is
/// cached, so the next call tries again.
pub struct MemoizedCallable<V, E, K = StaticKey, C = ConcurrentCache<K, V>> {
    memoizer: Memoizer<(), K, V, E, C>,
}

impl<V, E> MemoizedCallable<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: 'static,
{
    pub fn with_default_key(callable: impl Fn() -> Result<V, E> + Send + Sync + 'static) -> Self {
        Self::new(ConcurrentCache::new(), || StaticKey, callable)
    }
}

impl<V, E, K, C> MemoizedCallable<V, E, K, C>
where
    V: 'static,
    E: 'static,
    K: 'static,
    C: Cache<K, V>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, V, Cache = C>,
        key_fn: impl Fn() -> K + Send + Sync + 'static,
        callable: impl Fn() -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        MemoizedCallable {
            memoizer: Memoizer::fallible(cache, move |_: &()| key_fn(), move |()| callable()),
        }
    }

    pub fn call(&self) -> Result<V, E> {
        self.memoizer.try_call(())
    }

    pub fn cache(&self) -> &Arc<C> {
        self.memoizer.cache()
    }

    pub fn memoizer(&self) -> &Memoizer<(), K, V, E, C> {
        &self.memoizer
    }
}

impl<V, E, K, C> From<Memoizer<(), K, V, E, C>> for MemoizedCallable<V, E, K, C> {
    fn from(memoizer: Memoizer<(), K, V, E, C>) -> Self {
        MemoizedCallable { memoizer }
    }
}

impl<V, E, K, C> Clone for MemoizedCallable<V, E, K, C> {
    fn clone(&self) -> Self {
        MemoizedCallable {
            memoizer: self.memoizer.clone(),
        }
    }
}
