//! Shorthands for memoizers over primitive arguments and results.
//!
//! "Double" is `f64`, "int" is `i32`, "long" is `i64`. Floating point
//! arguments are keyed by [`FloatKey`]; the other primitives key themselves.
//! These aliases carry no behavior of their own.

use crate::consumer::{MemoizedBiConsumer, MemoizedConsumer};
use crate::function::{MemoizedBiFunction, MemoizedFunction};
use crate::keys::{FloatKey, StaticKey};
use crate::predicate::MemoizedPredicate;
use crate::supplier::MemoizedSupplier;

pub type DoubleSupplier<K = StaticKey> = MemoizedSupplier<f64, K>;
pub type IntSupplier<K = StaticKey> = MemoizedSupplier<i32, K>;
pub type LongSupplier<K = StaticKey> = MemoizedSupplier<i64, K>;
pub type BooleanSupplier<K = StaticKey> = MemoizedSupplier<bool, K>;

pub type DoubleFunction<V, K = FloatKey> = MemoizedFunction<f64, V, K>;
pub type IntFunction<V, K = i32> = MemoizedFunction<i32, V, K>;
pub type LongFunction<V, K = i64> = MemoizedFunction<i64, V, K>;

pub type ToDoubleFunction<T, K> = MemoizedFunction<T, f64, K>;
pub type ToIntFunction<T, K> = MemoizedFunction<T, i32, K>;
pub type ToLongFunction<T, K> = MemoizedFunction<T, i64, K>;

pub type DoubleUnaryOperator<K = FloatKey> = MemoizedFunction<f64, f64, K>;
pub type IntUnaryOperator<K = i32> = MemoizedFunction<i32, i32, K>;
pub type LongUnaryOperator<K = i64> = MemoizedFunction<i64, i64, K>;

pub type DoubleToIntFunction<K = FloatKey> = MemoizedFunction<f64, i32, K>;
pub type DoubleToLongFunction<K = FloatKey> = MemoizedFunction<f64, i64, K>;
pub type IntToDoubleFunction<K = i32> = MemoizedFunction<i32, f64, K>;
pub type IntToLongFunction<K = i32> = MemoizedFunction<i32, i64, K>;
pub type LongToDoubleFunction<K = i64> = MemoizedFunction<i64, f64, K>;
pub type LongToIntFunction<K = i64> = MemoizedFunction<i64, i32, K>;

pub type DoubleBinaryOperator<K = (FloatKey, FloatKey)> = MemoizedBiFunction<f64, f64, f64, K>;
pub type IntBinaryOperator<K = (i32, i32)> = MemoizedBiFunction<i32, i32, i32, K>;
pub type LongBinaryOperator<K = (i64, i64)> = MemoizedBiFunction<i64, i64, i64, K>;

pub type ToDoubleBiFunction<T, U, K> = MemoizedBiFunction<T, U, f64, K>;
pub type ToIntBiFunction<T, U, K> = MemoizedBiFunction<T, U, i32, K>;
pub type ToLongBiFunction<T, U, K> = MemoizedBiFunction<T, U, i64, K>;

pub type DoublePredicate<K = FloatKey> = MemoizedPredicate<f64, K>;
pub type IntPredicate<K = i32> = MemoizedPredicate<i32, K>;
pub type LongPredicate<K = i64> = MemoizedPredicate<i64, K>;

pub type DoubleConsumer<K = FloatKey> = MemoizedConsumer<f64, K>;
pub type IntConsumer<K = i32> = MemoizedConsumer<i32, K>;
pub type LongConsumer<K = i64> = MemoizedConsumer<i64, K>;

pub type ObjDoubleConsumer<T, K> = MemoizedBiConsumer<T, f64, K>;
pub type ObjIntConsumer<T, K> = MemoizedBiConsumer<T, i32, K>;
pub type ObjLongConsumer<T, K> = MemoizedBiConsumer<T, i64, K>;

pub type UnaryOperator<T, K> = MemoizedFunction<T, T, K>;
pub type BinaryOperator<T, K> = MemoizedBiFunction<T, T, T, K>;
