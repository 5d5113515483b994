//! Memoizing wrappers for functions, predicates, suppliers and consumers.
//!
//! Every wrapper computes a key from the call's arguments and looks it up in a
//! shared [`Cache`]. On a miss the wrapped callable runs once and its result is
//! stored; on a hit the stored value is returned and the callable is skipped.
//!
//! ```
//! use memoization::{Cache, MemoizedFunction};
//!
//! let length = MemoizedFunction::with_default_key(|s: String| s.len());
//! assert_eq!(length.apply("ab".to_string()), 2);
//! assert_eq!(length.apply("ab".to_string()), 2);
//! assert_eq!(length.cache().get(&"ab".to_string()), Some(2));
//! ```

pub mod cache;
pub mod consumer;
pub mod error;
pub mod function;
pub mod keys;
pub mod memoizer;
pub mod predicate;
pub mod primitive;
pub mod store;
pub mod supplier;

pub use cache::{as_shared_cache, Cache, ConcurrentCache, IntoSharedCache};
pub use consumer::{MemoizedBiConsumer, MemoizedConsumer};
pub use error::MemoizeError;
pub use function::{MemoizedBiFunction, MemoizedFunction};
pub use keys::{DefaultKey, FloatKey, StaticKey};
pub use memoizer::{Memoizer, MemoizerBuilder};
pub use predicate::{MemoizedBiPredicate, MemoizedPredicate};
pub use store::LockedCache;
pub use supplier::{MemoizedCallable, MemoizedSupplier};
