//! Sequence (array) tracer
//!
//! Owns a working copy of the values being visualized. Mutating operations
//! change that copy first and then record a value snapshot of the result,
//! so later mutations never reach steps that were already recorded.

use super::recorder::{Phase, StepLog};
use super::{SequenceStep, Step, StepKind, Trace, TraceError};

#[derive(Debug, Clone)]
pub struct SequenceTracer {
    values: Vec<f64>,
    log: StepLog<SequenceStep>,
    pending_line: Option<usize>,
}

impl SequenceTracer {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            log: StepLog::new(),
            pending_line: None,
        }
    }

    /// Copies `values` and records the `init` step. Must be the first call.
    pub fn init(&mut self, values: &[f64]) -> Result<(), TraceError> {
        let line = self.pending_line.take();
        self.log.check_init()?;
        self.values = values.to_vec();
        let step = self.capture(StepKind::Init, "Initial array".to_string(), Vec::new(), line);
        self.log.begin(step)
    }

    /// Records a comparison of `i` and `j` without touching the data.
    pub fn compare(&mut self, i: usize, j: usize, message: impl Into<String>) -> Result<(), TraceError> {
        let line = self.pending_line.take();
        self.log.check_recording("compare")?;
        self.check_index("compare", i)?;
        self.check_index("compare", j)?;
        let step = self.capture(StepKind::Compare, message.into(), vec![i, j], line);
        self.log.record("compare", step)
    }

    /// Exchanges `i` and `j` in the working copy, then records the result.
    pub fn swap(&mut self, i: usize, j: usize, message: impl Into<String>) -> Result<(), TraceError> {
        let line = self.pending_line.take();
        self.log.check_recording("swap")?;
        self.check_index("swap", i)?;
        self.check_index("swap", j)?;
        self.values.swap(i, j);
        let step = self.capture(StepKind::Swap, message.into(), vec![i, j], line);
        self.log.record("swap", step)
    }

    /// Writes `value` at `index` in the working copy, then records the result.
    pub fn set(&mut self, index: usize, value: f64, message: impl Into<String>) -> Result<(), TraceError> {
        let line = self.pending_line.take();
        self.log.check_recording("set")?;
        self.check_index("set", index)?;
        self.values[index] = value;
        let step = self.capture(StepKind::Set, message.into(), vec![index], line);
        self.log.record("set", step)
    }

    /// Records a narrative step with arbitrary highlights and no data change.
    pub fn note(&mut self, message: impl Into<String>, highlights: &[usize]) -> Result<(), TraceError> {
        let line = self.pending_line.take();
        self.log.check_recording("note")?;
        for &index in highlights {
            self.check_index("note", index)?;
        }
        let step = self.capture(StepKind::Note, message.into(), highlights.to_vec(), line);
        self.log.record("note", step)
    }

    /// Records the terminal step and closes the tracer.
    pub fn end(&mut self, message: impl Into<String>) -> Result<(), TraceError> {
        let line = self.pending_line.take();
        self.log.check_recording("end")?;
        let step = self.capture(StepKind::End, message.into(), Vec::new(), line);
        self.log.close(step)
    }

    /// Attaches a source line number to the next recording call. The line is
    /// consumed by that call even when it fails.
    pub fn at_line(&mut self, line: usize) -> &mut Self {
        self.pending_line = Some(line);
        self
    }

    /// Current contents of the working copy.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Steps recorded so far; a partial trace if called before `end`.
    pub fn steps(&self) -> &[SequenceStep] {
        self.log.steps()
    }

    pub fn is_closed(&self) -> bool {
        self.log.phase() == Phase::Closed
    }

    /// Copies the recorded steps into a shareable trace.
    pub fn trace(&self) -> Trace {
        Trace::new(self.steps().iter().cloned().map(Step::Sequence).collect())
    }

    pub fn into_trace(self) -> Trace {
        Trace::new(self.log.into_steps().into_iter().map(Step::Sequence).collect())
    }

    fn check_index(&self, op: &'static str, index: usize) -> Result<(), TraceError> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(TraceError::IndexOutOfBounds {
                op,
                index,
                len: self.values.len(),
            })
        }
    }

    fn capture(
        &self,
        kind: StepKind,
        message: String,
        highlighted_indices: Vec<usize>,
        line_number: Option<usize>,
    ) -> SequenceStep {
        SequenceStep {
            kind,
            snapshot: self.values.clone(),
            message,
            highlighted_indices,
            line_number,
        }
    }
}

impl Default for SequenceTracer {
    fn default() -> Self {
        Self::new()
    }
}
