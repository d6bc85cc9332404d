//! Traced sorting algorithms

use log::debug;

use super::{first_non_finite, placeholder_sequence, rejected_sequence};
use crate::trace::{SequenceTracer, TraceError};

/// Pseudocode listing that bubble sort steps point into via `line_number`.
pub const BUBBLE_SORT_SOURCE: &[&str] = &[
    "for i in 0..n-1:",
    "  for j in 0..n-1-i:",
    "    if a[j] > a[j+1]:",
    "      swap(a[j], a[j+1])",
    "  # a[n-1-i..] is sorted",
    "return a",
];

/// Bubble sort, recording every adjacent comparison and swap.
///
/// Only strictly greater pairs are swapped, so equal values keep their
/// input order. Every pass runs to completion; there is no early exit.
pub fn bubble_sort(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    if let Some(index) = first_non_finite(values) {
        return rejected_sequence(values, format!("Cannot sort: value at index {index} is not a finite number"));
    }

    let mut tracer = SequenceTracer::new();
    tracer.init(values)?;

    let n = values.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - i {
            let (left, right) = (tracer.values()[j], tracer.values()[j + 1]);
            tracer
                .at_line(2)
                .compare(j, j + 1, format!("Compare a[{j}] = {left} with a[{}] = {right}", j + 1))?;
            if left > right {
                tracer
                    .at_line(3)
                    .swap(j, j + 1, format!("{left} > {right}, swap them"))?;
            }
        }
        let boundary = n - 1 - i;
        tracer
            .at_line(4)
            .note(format!("Pass {} complete: a[{boundary}..] is sorted", i + 1), &[boundary])?;
    }

    tracer.at_line(5).end("Array sorted")?;
    debug!("bubble sort traced {} steps for {} values", tracer.steps().len(), n);
    Ok(tracer)
}

pub fn selection_sort(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    placeholder_sequence("Selection sort", values)
}

pub fn insertion_sort(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    placeholder_sequence("Insertion sort", values)
}
