//! Recording phase machine shared by the tracers
//!
//! A tracer moves `Pending -> Recording -> Closed` exactly once. Every
//! recording operation is checked against the current phase so that an
//! out-of-sequence call surfaces as an error instead of a corrupted trace.

use log::{debug, trace};

use super::TraceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Pending,
    Recording,
    Closed,
}

#[derive(Debug, Clone)]
pub(crate) struct StepLog<T> {
    steps: Vec<T>,
    phase: Phase,
}

impl<T> StepLog<T> {
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            phase: Phase::Pending,
        }
    }

    /// Checks that `init` may run now.
    pub(crate) fn check_init(&self) -> Result<(), TraceError> {
        match self.phase {
            Phase::Pending => Ok(()),
            Phase::Recording => Err(TraceError::AlreadyInitialized),
            Phase::Closed => Err(TraceError::Closed { op: "init" }),
        }
    }

    /// Checks that a recording operation other than `init` may run now.
    pub(crate) fn check_recording(&self, op: &'static str) -> Result<(), TraceError> {
        match self.phase {
            Phase::Pending => Err(TraceError::NotInitialized { op }),
            Phase::Recording => Ok(()),
            Phase::Closed => Err(TraceError::Closed { op }),
        }
    }

    pub(crate) fn begin(&mut self, step: T) -> Result<(), TraceError> {
        self.check_init()?;
        self.phase = Phase::Recording;
        self.steps.push(step);
        trace!("trace started");
        Ok(())
    }

    pub(crate) fn record(&mut self, op: &'static str, step: T) -> Result<(), TraceError> {
        self.check_recording(op)?;
        self.steps.push(step);
        trace!("recorded {} step #{}", op, self.steps.len() - 1);
        Ok(())
    }

    pub(crate) fn close(&mut self, step: T) -> Result<(), TraceError> {
        self.check_recording("end")?;
        self.steps.push(step);
        self.phase = Phase::Closed;
        debug!("trace closed with {} steps", self.steps.len());
        Ok(())
    }

    pub(crate) fn steps(&self) -> &[T] {
        &self.steps
    }

    pub(crate) fn into_steps(self) -> Vec<T> {
        self.steps
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }
}
