//! Dynamic-programming algorithms
//!
//! Tracing for these is not implemented yet; each records a labelled
//! placeholder trace over its input. The memoized Fibonacci helper computes
//! values through a caller-owned [`Memo`].

use log::debug;

use super::memo::Memo;
use super::placeholder_sequence;
use crate::trace::{SequenceTracer, TraceError};

pub fn fibonacci(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    placeholder_sequence("Fibonacci", values)
}

pub fn knapsack(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    placeholder_sequence("Knapsack", values)
}

pub fn longest_common_subsequence(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    placeholder_sequence("Longest common subsequence", values)
}

/// Largest `n` whose Fibonacci number fits in a `u64`.
pub const FIBONACCI_MAX_INDEX: u64 = 93;

/// `n`-th Fibonacci number, saturating at `u64::MAX`.
///
/// Fills `memo` bottom-up so repeated calls with the same cache only pay
/// for indices they have not seen. Indices past [`FIBONACCI_MAX_INDEX`]
/// return `u64::MAX` without touching the cache.
pub fn fibonacci_memoized(n: u64, memo: &mut Memo<u64, u64>) -> u64 {
    if n < 2 {
        return n;
    }
    if n > FIBONACCI_MAX_INDEX {
        debug!("fibonacci({}) saturates at u64::MAX", n);
        return u64::MAX;
    }

    let (mut previous, mut current) = (0u64, 1u64);
    for k in 2..=n {
        let next = memo.get_or_insert_with(k, || previous + current);
        previous = current;
        current = next;
    }
    debug!("fibonacci({}) = {} ({} cache hits)", n, current, memo.hits());
    current
}
