//! Traced algorithm catalogue
//!
//! Each traced algorithm is a deterministic function of its input that
//! drives a tracer and hands it back finished. Bad input data never makes
//! an algorithm fail: it produces a two-step `init`/`end` trace whose final
//! message says what was wrong. Only tracer misuse surfaces as an error.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod dynamic;
pub mod graph;
pub mod memo;
pub mod search;
pub mod sorting;

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::trace::{GraphEdge, GraphNode, SequenceTracer, Trace, TraceError};

pub use self::memo::Memo;

/// Graph handed to graph traversals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

/// Input for any registered algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum AlgorithmInput {
    Sequence {
        values: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<f64>,
    },
    Graph(GraphInput),
}

impl AlgorithmInput {
    pub fn sequence(values: impl Into<Vec<f64>>) -> Self {
        AlgorithmInput::Sequence {
            values: values.into(),
            target: None,
        }
    }

    pub fn search(values: impl Into<Vec<f64>>, target: f64) -> Self {
        AlgorithmInput::Sequence {
            values: values.into(),
            target: Some(target),
        }
    }

    pub fn shape(&self) -> InputShape {
        match self {
            AlgorithmInput::Sequence { .. } => InputShape::Sequence,
            AlgorithmInput::Graph(_) => InputShape::Graph,
        }
    }
}

/// Which tracer variant an algorithm records with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputShape {
    Sequence,
    Graph,
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputShape::Sequence => f.write_str("sequence"),
            InputShape::Graph => f.write_str("graph"),
        }
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub best_case: &'static str,
    pub average_case: &'static str,
    pub worst_case: &'static str,
}

impl AlgorithmComplexity {
    const fn new(best: &'static str, average: &'static str, worst: &'static str, space: &'static str) -> Self {
        Self {
            time_complexity: worst,
            space_complexity: space,
            best_case: best,
            average_case: average,
            worst_case: worst,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

/// Every traced algorithm the catalogue knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    BinarySearch,
    Fibonacci,
    Bfs,
    Dfs,
    Knapsack,
    Lcs,
    BstInsert,
    BstSearch,
}

impl AlgorithmKind {
    pub fn all() -> &'static [AlgorithmKind] {
        use AlgorithmKind::*;
        &[
            BubbleSort,
            SelectionSort,
            InsertionSort,
            BinarySearch,
            Fibonacci,
            Bfs,
            Dfs,
            Knapsack,
            Lcs,
            BstInsert,
            BstSearch,
        ]
    }

    /// Stable kebab-case identifier
    pub fn id(self) -> &'static str {
        match self {
            AlgorithmKind::BubbleSort => "bubble-sort",
            AlgorithmKind::SelectionSort => "selection-sort",
            AlgorithmKind::InsertionSort => "insertion-sort",
            AlgorithmKind::BinarySearch => "binary-search",
            AlgorithmKind::Fibonacci => "fibonacci",
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dfs => "dfs",
            AlgorithmKind::Knapsack => "knapsack",
            AlgorithmKind::Lcs => "lcs",
            AlgorithmKind::BstInsert => "bst-insert",
            AlgorithmKind::BstSearch => "bst-search",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::BubbleSort => "Bubble sort",
            AlgorithmKind::SelectionSort => "Selection sort",
            AlgorithmKind::InsertionSort => "Insertion sort",
            AlgorithmKind::BinarySearch => "Binary search",
            AlgorithmKind::Fibonacci => "Fibonacci",
            AlgorithmKind::Bfs => "Breadth-first search",
            AlgorithmKind::Dfs => "Depth-first search",
            AlgorithmKind::Knapsack => "Knapsack",
            AlgorithmKind::Lcs => "Longest common subsequence",
            AlgorithmKind::BstInsert => "BST insert",
            AlgorithmKind::BstSearch => "BST search",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            AlgorithmKind::BubbleSort | AlgorithmKind::SelectionSort | AlgorithmKind::InsertionSort => "sorting",
            AlgorithmKind::BinarySearch => "searching",
            AlgorithmKind::Fibonacci | AlgorithmKind::Knapsack | AlgorithmKind::Lcs => "dynamic-programming",
            AlgorithmKind::Bfs | AlgorithmKind::Dfs => "graph",
            AlgorithmKind::BstInsert | AlgorithmKind::BstSearch => "tree",
        }
    }

    pub fn complexity(self) -> AlgorithmComplexity {
        match self {
            AlgorithmKind::BubbleSort | AlgorithmKind::SelectionSort | AlgorithmKind::InsertionSort => {
                AlgorithmComplexity::new("O(n^2)", "O(n^2)", "O(n^2)", "O(1)")
            }
            AlgorithmKind::BinarySearch => AlgorithmComplexity::new("O(1)", "O(log n)", "O(log n)", "O(1)"),
            AlgorithmKind::Fibonacci => AlgorithmComplexity::new("O(n)", "O(n)", "O(n)", "O(n)"),
            AlgorithmKind::Bfs | AlgorithmKind::Dfs => {
                AlgorithmComplexity::new("O(V + E)", "O(V + E)", "O(V + E)", "O(V)")
            }
            AlgorithmKind::Knapsack => AlgorithmComplexity::new("O(nW)", "O(nW)", "O(nW)", "O(nW)"),
            AlgorithmKind::Lcs => AlgorithmComplexity::new("O(mn)", "O(mn)", "O(mn)", "O(mn)"),
            AlgorithmKind::BstInsert | AlgorithmKind::BstSearch => {
                AlgorithmComplexity::new("O(log n)", "O(log n)", "O(n)", "O(1)")
            }
        }
    }

    pub fn input_shape(self) -> InputShape {
        match self {
            AlgorithmKind::Bfs | AlgorithmKind::Dfs => InputShape::Graph,
            _ => InputShape::Sequence,
        }
    }

    /// Whether the algorithm records real per-step tracing
    pub fn is_implemented(self) -> bool {
        matches!(self, AlgorithmKind::BubbleSort | AlgorithmKind::BinarySearch)
    }

    /// Runs the traced algorithm and returns its finished trace.
    pub fn run(self, input: &AlgorithmInput) -> Result<Trace, TraceError> {
        debug!("running {} on {} input", self.id(), input.shape());

        let trace = match (self.input_shape(), input) {
            (InputShape::Sequence, AlgorithmInput::Sequence { values, target }) => {
                self.run_sequence(values, *target)?.into_trace()
            }
            (InputShape::Graph, AlgorithmInput::Graph(graph_input)) => match self {
                AlgorithmKind::Dfs => graph::depth_first_search(graph_input)?.into_trace(),
                _ => graph::breadth_first_search(graph_input)?.into_trace(),
            },
            (InputShape::Sequence, AlgorithmInput::Graph(_)) => {
                rejected_sequence(&[], format!("{} expects a sequence input", self.name()))?.into_trace()
            }
            (InputShape::Graph, AlgorithmInput::Sequence { .. }) => {
                graph::rejected_graph(&GraphInput::default(), format!("{} expects a graph input", self.name()))?
                    .into_trace()
            }
        };

        Ok(trace)
    }

    fn run_sequence(self, values: &[f64], target: Option<f64>) -> Result<SequenceTracer, TraceError> {
        match self {
            AlgorithmKind::BubbleSort => sorting::bubble_sort(values),
            AlgorithmKind::SelectionSort => sorting::selection_sort(values),
            AlgorithmKind::InsertionSort => sorting::insertion_sort(values),
            AlgorithmKind::BinarySearch => match target {
                Some(target) => search::binary_search(values, target),
                None => rejected_sequence(values, "Binary search requires a target"),
            },
            AlgorithmKind::Fibonacci => dynamic::fibonacci(values),
            AlgorithmKind::Knapsack => dynamic::knapsack(values),
            AlgorithmKind::Lcs => dynamic::longest_common_subsequence(values),
            AlgorithmKind::BstInsert => search::bst_insert(values),
            AlgorithmKind::BstSearch => search::bst_search(values),
            AlgorithmKind::Bfs | AlgorithmKind::Dfs => {
                rejected_sequence(values, format!("{} expects a graph input", self.name()))
            }
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        AlgorithmKind::all()
            .iter()
            .copied()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

pub(crate) fn first_non_finite(values: &[f64]) -> Option<usize> {
    values.iter().position(|value| !value.is_finite())
}

/// Degenerate `init` + `end` trace reporting why the input was refused.
///
/// Input holding a non-finite value is recorded as an empty snapshot since
/// JSON has no encoding for NaN or infinities.
pub(crate) fn rejected_sequence(values: &[f64], reason: impl Into<String>) -> Result<SequenceTracer, TraceError> {
    let reason = reason.into();
    warn!("rejecting sequence input: {}", reason);
    let snapshot = match first_non_finite(values) {
        Some(_) => &[][..],
        None => values,
    };
    let mut tracer = SequenceTracer::new();
    tracer.init(snapshot)?;
    tracer.end(reason)?;
    Ok(tracer)
}

/// Labelled placeholder trace for algorithms without real tracing.
pub(crate) fn placeholder_sequence(name: &str, values: &[f64]) -> Result<SequenceTracer, TraceError> {
    let mut tracer = SequenceTracer::new();
    tracer.init(values)?;
    tracer.note(format!("{name} tracing is not yet implemented"), &[])?;
    tracer.end(format!("{name} finished (placeholder trace)"))?;
    Ok(tracer)
}
