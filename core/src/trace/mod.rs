//! Step-trace recording
//!
//! Tracers give algorithms a small vocabulary (`init`, `compare`, `swap`,
//! `set`, `note`, `end` and the graph equivalents) for declaring what
//! changed, and hand back an immutable [`Trace`] once the run finishes.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub(crate) mod recorder;
pub mod sequence;
pub mod step;

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::graph::GraphTracer;
pub use self::sequence::SequenceTracer;
pub use self::step::*;

/// Errors raised by tracer misuse or by trace validation
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("`{op}` called before `init`")]
    NotInitialized { op: &'static str },

    #[error("`init` called more than once")]
    AlreadyInitialized,

    #[error("`{op}` called after the trace was ended")]
    Closed { op: &'static str },

    #[error("`{op}` index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        op: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),

    #[error("Trace has {0} steps, at least 2 are required")]
    TooShort(usize),

    #[error("Step {index} has kind `{found}`, expected `{expected}`")]
    UnexpectedKind {
        index: usize,
        expected: StepKind,
        found: StepKind,
    },

    #[error("Step {index} repeats the `{kind}` marker")]
    RepeatedMarker { index: usize, kind: StepKind },

    #[error("Step {index} carries highlights on a `{kind}` marker")]
    HighlightedMarker { index: usize, kind: StepKind },

    #[error("Step {index} has a different shape than the first step")]
    MixedShapes { index: usize },

    #[error("Step {index} snapshot has {actual} elements, expected {expected}")]
    SnapshotLength {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Step {index} has kind `{kind}`, which its shape does not record")]
    KindNotAllowed { index: usize, kind: StepKind },

    #[error("Step {index} snapshot holds a non-finite value at position {position}")]
    NonFiniteValue { index: usize, position: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Finished, immutable sequence of steps
///
/// Cloning a trace shares the underlying steps; nothing can mutate them
/// after the tracer hands them off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Arc<[Step]>,
}

impl Trace {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    /// A trace with no steps, used by players before anything is loaded
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Checks the structural invariants every complete trace satisfies.
    pub fn validate(&self) -> Result<(), TraceError> {
        let steps = self.steps();
        if steps.len() < 2 {
            return Err(TraceError::TooShort(steps.len()));
        }

        let last = steps.len() - 1;
        let first = &steps[0];
        let expected_len = first.as_sequence().map(|step| step.snapshot.len());

        for (index, step) in steps.iter().enumerate() {
            let kind = step.kind();
            let expected = match index {
                0 => Some(StepKind::Init),
                i if i == last => Some(StepKind::End),
                _ => None,
            };

            match expected {
                Some(expected) if kind != expected => {
                    return Err(TraceError::UnexpectedKind {
                        index,
                        expected,
                        found: kind,
                    });
                }
                None if matches!(kind, StepKind::Init | StepKind::End) => {
                    return Err(TraceError::RepeatedMarker { index, kind });
                }
                _ => {}
            }

            if matches!(kind, StepKind::Init | StepKind::End) && step.has_highlights() {
                return Err(TraceError::HighlightedMarker { index, kind });
            }

            match (step, expected_len) {
                (Step::Sequence(seq), Some(expected)) => {
                    if matches!(kind, StepKind::Visit | StepKind::Traverse) {
                        return Err(TraceError::KindNotAllowed { index, kind });
                    }
                    if seq.snapshot.len() != expected {
                        return Err(TraceError::SnapshotLength {
                            index,
                            expected,
                            actual: seq.snapshot.len(),
                        });
                    }
                    if let Some(position) = seq.snapshot.iter().position(|value| !value.is_finite()) {
                        return Err(TraceError::NonFiniteValue { index, position });
                    }
                }
                (Step::Graph(_), None) => {
                    if matches!(kind, StepKind::Compare | StepKind::Swap | StepKind::Set) {
                        return Err(TraceError::KindNotAllowed { index, kind });
                    }
                }
                _ => return Err(TraceError::MixedShapes { index }),
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Deref for Trace {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.steps
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Step>> for Trace {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(kind: StepKind, snapshot: &[f64], highlights: &[usize]) -> Step {
        Step::Sequence(SequenceStep {
            kind,
            snapshot: snapshot.to_vec(),
            message: kind.to_string(),
            highlighted_indices: highlights.to_vec(),
            line_number: None,
        })
    }

    #[test]
    fn test_minimal_trace_is_valid() {
        let trace = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_malformed_traces() {
        let short = Trace::new(vec![seq(StepKind::Init, &[1.0], &[])]);
        assert!(matches!(short.validate(), Err(TraceError::TooShort(1))));

        let no_init = Trace::new(vec![
            seq(StepKind::Note, &[1.0], &[]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        assert!(matches!(
            no_init.validate(),
            Err(TraceError::UnexpectedKind { index: 0, .. })
        ));

        let grown = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[]),
            seq(StepKind::Note, &[1.0, 2.0], &[]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        assert!(matches!(
            grown.validate(),
            Err(TraceError::SnapshotLength { index: 1, expected: 1, actual: 2 })
        ));

        let double_end = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[]),
            seq(StepKind::End, &[1.0], &[]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        assert!(matches!(
            double_end.validate(),
            Err(TraceError::RepeatedMarker { index: 1, .. })
        ));

        let highlighted_init = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[0]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        assert!(matches!(
            highlighted_init.validate(),
            Err(TraceError::HighlightedMarker { index: 0, .. })
        ));
    }

    #[test]
    fn test_mixed_shapes_are_rejected() {
        let trace = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[]),
            Step::Graph(GraphStep {
                kind: StepKind::End,
                snapshot: GraphSnapshot::default(),
                message: String::new(),
                highlighted_node_ids: Vec::new(),
                highlighted_edge_ids: Vec::new(),
            }),
        ]);
        assert!(matches!(trace.validate(), Err(TraceError::MixedShapes { index: 1 })));
    }

    #[test]
    fn test_kinds_are_restricted_to_their_shape() {
        let visit_in_sequence = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[]),
            seq(StepKind::Visit, &[1.0], &[0]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        assert!(matches!(
            visit_in_sequence.validate(),
            Err(TraceError::KindNotAllowed { index: 1, kind: StepKind::Visit })
        ));

        let traverse_in_sequence = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[]),
            seq(StepKind::Traverse, &[1.0], &[]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        assert!(matches!(
            traverse_in_sequence.validate(),
            Err(TraceError::KindNotAllowed { index: 1, kind: StepKind::Traverse })
        ));

        let graph = |kind: StepKind| {
            Step::Graph(GraphStep {
                kind,
                snapshot: GraphSnapshot::default(),
                message: String::new(),
                highlighted_node_ids: Vec::new(),
                highlighted_edge_ids: Vec::new(),
            })
        };
        let swap_in_graph = Trace::new(vec![
            graph(StepKind::Init),
            graph(StepKind::Swap),
            graph(StepKind::End),
        ]);
        assert!(matches!(
            swap_in_graph.validate(),
            Err(TraceError::KindNotAllowed { index: 1, kind: StepKind::Swap })
        ));
    }

    #[test]
    fn test_non_finite_snapshots_are_rejected() {
        let trace = Trace::new(vec![
            seq(StepKind::Init, &[1.0, f64::NAN], &[]),
            seq(StepKind::End, &[1.0, f64::NAN], &[]),
        ]);
        assert!(matches!(
            trace.validate(),
            Err(TraceError::NonFiniteValue { index: 0, position: 1 })
        ));
    }

    #[test]
    fn test_json_export_round_trips() {
        let trace = Trace::new(vec![
            seq(StepKind::Init, &[2.0, 1.0], &[]),
            seq(StepKind::Swap, &[1.0, 2.0], &[0, 1]),
            seq(StepKind::End, &[1.0, 2.0], &[]),
        ]);
        let json = trace.to_json().unwrap();
        let restored = Trace::from_json(&json).unwrap();
        assert_eq!(restored, trace);
    }

    #[test]
    fn test_clones_share_steps() {
        let trace = Trace::new(vec![
            seq(StepKind::Init, &[1.0], &[]),
            seq(StepKind::End, &[1.0], &[]),
        ]);
        let clone = trace.clone();
        assert!(std::ptr::eq(trace.steps().as_ptr(), clone.steps().as_ptr()));
    }
}
