//! The generic memoizing wrapper every callable shape is built on.

use crate::cache::{Cache, ConcurrentCache, IntoSharedCache};
use crate::error::MemoizeError;
use crate::keys::DefaultKey;
use log::{debug, trace};
use std::cell::Cell;
use std::convert::Infallible;
use std::hash::Hash;
use std::sync::Arc;

pub type KeyFn<A, K> = Arc<dyn Fn(&A) -> K + Send + Sync>;
pub type Body<A, V, E> = Arc<dyn Fn(A) -> Result<V, E> + Send + Sync>;

const DEFAULT_NAME: &str = "memoizer";

/// Looks `key` up in `cache`, running `body` and storing its result on a miss.
///
/// This is the only place a memoized computation is started. A failing `body`
/// stores nothing, so the next call with the same key runs it again.
pub(crate) fn compute_if_absent<K, V, E, C, F>(name: &str, cache: &C, key: K, body: F) -> Result<V, E>
where
    C: Cache<K, V> + ?Sized,
    F: FnOnce() -> Result<V, E>,
{
    let computed = Cell::new(false);
    let result = cache.get_or_try_insert_with(key, || {
        computed.set(true);
        debug!("[{}] cache miss, invoking callable", name);
        body()
    });
    match (&result, computed.get()) {
        (Ok(_), false) => trace!("[{}] cache hit", name),
        (Err(_), _) => debug!("[{}] callable failed, nothing cached", name),
        _ => {}
    }
    result
}

/// Caches the results of `body`, keyed by `key_fn` applied to the arguments.
///
/// `A` is the argument list as one value: `()` for no argument, `T` for one,
/// `(T, U)` for two. The three collaborators are shared, so clones of a
/// memoizer use the same cache.
pub struct Memoizer<A, K, V, E = Infallible, C = ConcurrentCache<K, V>> {
    name: Arc<str>,
    cache: Arc<C>,
    key_fn: KeyFn<A, K>,
    body: Body<A, V, E>,
}

impl<A, K, V, E, C> Clone for Memoizer<A, K, V, E, C> {
    fn clone(&self) -> Self {
        Memoizer {
            name: Arc::clone(&self.name),
            cache: Arc::clone(&self.cache),
            key_fn: Arc::clone(&self.key_fn),
            body: Arc::clone(&self.body),
        }
    }
}

impl<A, K, V, E, C> Memoizer<A, K, V, E, C>
where
    A: 'static,
    K: 'static,
    V: 'static,
    E: 'static,
    C: Cache<K, V>,
{
    /// Memoizes a callable that may fail. Failures are returned as they are
    /// and never cached.
    pub fn fallible(
        cache: impl IntoSharedCache<K, V, Cache = C>,
        key_fn: impl Fn(&A) -> K + Send + Sync + 'static,
        body: impl Fn(A) -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        Memoizer {
            name: Arc::from(DEFAULT_NAME),
            cache: cache.into_shared(),
            key_fn: Arc::new(key_fn),
            body: Arc::new(body),
        }
    }

    pub fn builder() -> MemoizerBuilder<A, K, V, E, C> {
        MemoizerBuilder::new()
    }

    /// Same memoizer, logging under `name`.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Arc::from(name);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    /// Key the arguments would be cached under.
    pub fn key_of(&self, args: &A) -> K {
        (self.key_fn)(args)
    }

    pub fn try_call(&self, args: A) -> Result<V, E> {
        let key = (self.key_fn)(&args);
        compute_if_absent(&self.name, self.cache.as_ref(), key, || (self.body)(args))
    }
}

impl<A, K, V, C> Memoizer<A, K, V, Infallible, C>
where
    A: 'static,
    K: 'static,
    V: 'static,
    C: Cache<K, V>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, V, Cache = C>,
        key_fn: impl Fn(&A) -> K + Send + Sync + 'static,
        body: impl Fn(A) -> V + Send + Sync + 'static,
    ) -> Self {
        Self::fallible(cache, key_fn, move |args| Ok(body(args)))
    }

    pub fn call(&self, args: A) -> V {
        match self.try_call(args) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<A, K, V> Memoizer<A, K, V>
where
    A: DefaultKey<Key = K> + 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Memoizes `body` in a fresh [`ConcurrentCache`], keyed by the arguments.
    pub fn with_default_key(body: impl Fn(A) -> V + Send + Sync + 'static) -> Self {
        Self::new(ConcurrentCache::new(), A::default_key, body)
    }
}

/// Assembles a [`Memoizer`] from collaborators that may or may not be supplied.
///
/// [`build`](MemoizerBuilder::build) reports the first missing collaborator,
/// checking the cache, then the key function, then the callable.
pub struct MemoizerBuilder<A, K, V, E = Infallible, C = ConcurrentCache<K, V>> {
    name: Option<Arc<str>>,
    cache: Option<Arc<C>>,
    key_fn: Option<KeyFn<A, K>>,
    body: Option<Body<A, V, E>>,
}

impl<A, K, V, E, C> Default for MemoizerBuilder<A, K, V, E, C> {
    fn default() -> Self {
        MemoizerBuilder {
            name: None,
            cache: None,
            key_fn: None,
            body: None,
        }
    }
}

impl<A, K, V, E, C> MemoizerBuilder<A, K, V, E, C>
where
    A: 'static,
    K: 'static,
    V: 'static,
    E: 'static,
    C: Cache<K, V>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(Arc::from(name));
        self
    }

    pub fn cache(mut self, cache: impl IntoSharedCache<K, V, Cache = C>) -> Self {
        self.cache = Some(cache.into_shared());
        self
    }

    pub fn key_function(mut self, key_fn: impl Fn(&A) -> K + Send + Sync + 'static) -> Self {
        self.key_fn = Some(Arc::new(key_fn));
        self
    }

    pub fn callable(mut self, body: impl Fn(A) -> Result<V, E> + Send + Sync + 'static) -> Self {
        self.body = Some(Arc::new(body));
        self
    }

    pub fn build(self) -> Result<Memoizer<A, K, V, E, C>, MemoizeError> {
        let cache = self.cache.ok_or_else(MemoizeError::missing_cache)?;
        let key_fn = self.key_fn.ok_or_else(MemoizeError::missing_key_function)?;
        let body = self.body.ok_or_else(MemoizeError::missing_callable)?;
        Ok(Memoizer {
            name: self.name.unwrap_or_else(|| Arc::from(DEFAULT_NAME)),
            cache,
            key_fn,
            body,
        })
    }
}

impl<A, K, V, E, C> MemoizerBuilder<A, K, V, E, C>
where
    A: DefaultKey<Key = K> + 'static,
    K: 'static,
    V: 'static,
    E: 'static,
    C: Cache<K, V>,
{
    /// Keys every call by its arguments.
    pub fn default_key(self) -> Self {
        self.key_function(A::default_key)
    }
}

impl<A, K, V, C> MemoizerBuilder<A, K, V, Infallible, C>
where
    A: 'static,
    K: 'static,
    V: 'static,
    C: Cache<K, V>,
{
    /// Callable that cannot fail.
    pub fn function(self, body: impl Fn(A) -> V + Send + Sync + 'static) -> Self {
        self.callable(move |args| Ok(body(args)))
    }
}

impl<A, K, V, E> MemoizerBuilder<A, K, V, E, ConcurrentCache<K, V>>
where
    A: 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: 'static,
{
    /// Fresh, empty, unbounded cache.
    pub fn default_cache(self) -> Self {
        self.cache(ConcurrentCache::new())
    }
}
