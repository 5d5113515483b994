//! Errors raised while assembling a memoizer.
//!
//! Failures of the memoized callable itself are never wrapped here: they are
//! returned to the caller exactly as the callable produced them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoizeError {
    /// A required collaborator was not supplied to the builder.
    #[error("invalid argument `{argument}`: {hint}")]
    InvalidArgument {
        argument: &'static str,
        hint: &'static str,
    },
}

impl MemoizeError {
    pub(crate) fn missing_cache() -> Self {
        MemoizeError::InvalidArgument {
            argument: "cache",
            hint: "provide a cache, e.g. `default_cache()` for an unbounded ConcurrentCache",
        }
    }

    pub(crate) fn missing_key_function() -> Self {
        MemoizeError::InvalidArgument {
            argument: "key_function",
            hint: "provide a key function, e.g. `default_key()` to key by the arguments",
        }
    }

    pub(crate) fn missing_callable() -> Self {
        MemoizeError::InvalidArgument {
            argument: "callable",
            hint: "provide the callable to memoize with `callable()` or `function()`",
        }
    }

    /// Name of the collaborator that was missing.
    pub fn argument(&self) -> &'static str {
        match self {
            MemoizeError::InvalidArgument { argument, .. } => argument,
        }
    }
}
