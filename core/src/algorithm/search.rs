//! Traced search algorithms

use log::debug;

use super::{first_non_finite, placeholder_sequence, rejected_sequence};
use crate::trace::{SequenceTracer, TraceError};

/// Iterative binary search over an ascending copy of `values`.
///
/// The midpoint is `floor((low + high) / 2)` over an inclusive range. The
/// final step states the outcome as `found = true` with the index into the
/// sorted copy, or `found = false`.
pub fn binary_search(values: &[f64], target: f64) -> Result<SequenceTracer, TraceError> {
    if !target.is_finite() {
        return rejected_sequence(values, "Cannot search: target is not a finite number");
    }
    if let Some(index) = first_non_finite(values) {
        return rejected_sequence(values, format!("Cannot search: value at index {index} is not a finite number"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut tracer = SequenceTracer::new();
    tracer.init(&sorted)?;
    tracer.note(format!("Searching for target {target}"), &[])?;

    let mut low = 0usize;
    let mut high = sorted.len().checked_sub(1);
    let mut probes = 0usize;

    while let Some(h) = high.filter(|&h| low <= h) {
        let mid = low + (h - low) / 2;
        let value = sorted[mid];
        probes += 1;

        if value == target {
            tracer.note(format!("Match: a[{mid}] = {value} equals target {target}"), &[mid])?;
            tracer.end(format!("Target {target} found at index {mid} (found = true)"))?;
            debug!("binary search found {} after {} probes", target, probes);
            return Ok(tracer);
        }

        if value < target {
            tracer.note(
                format!("low = {low}, high = {h}, mid = {mid}: a[{mid}] = {value} < {target}, search right half"),
                &[mid],
            )?;
            low = mid + 1;
        } else {
            tracer.note(
                format!("low = {low}, high = {h}, mid = {mid}: a[{mid}] = {value} > {target}, search left half"),
                &[mid],
            )?;
            high = mid.checked_sub(1);
        }
    }

    tracer.end(format!("Target {target} not found (found = false)"))?;
    debug!("binary search exhausted after {} probes", probes);
    Ok(tracer)
}

pub fn bst_insert(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    placeholder_sequence("BST insert", values)
}

pub fn bst_search(values: &[f64]) -> Result<SequenceTracer, TraceError> {
    placeholder_sequence("BST search", values)
}
