//! Step data model
//!
//! A step is one recorded snapshot plus the metadata a renderer needs to
//! draw it. Sequence and graph steps share a kind discriminant and are
//! carried together as the [`Step`] tagged union so consumers can match
//! exhaustively instead of probing which fields exist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened at a recorded step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Init,
    Compare,
    Swap,
    Set,
    Note,
    /// Graph only: a node was marked visited
    Visit,
    /// Graph only: an edge was followed
    Traverse,
    End,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Init => "init",
            StepKind::Compare => "compare",
            StepKind::Swap => "swap",
            StepKind::Set => "set",
            StepKind::Note => "note",
            StepKind::Visit => "visit",
            StepKind::Traverse => "traverse",
            StepKind::End => "end",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Node identifier ensuring type safety and preventing mixing with indices
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edge identity used for highlighting: the ordered `(source, target)` pair
/// joined into a single token.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self(format!("{source}->{target}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Graph vertex as captured in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub visited: bool,
}

impl GraphNode {
    pub fn new(id: usize, label: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            label: label.into(),
            visited: false,
        }
    }
}

/// Directed edge as captured in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
}

impl GraphEdge {
    pub fn new(source: usize, target: usize) -> Self {
        Self {
            source: NodeId(source),
            target: NodeId(target),
        }
    }

    pub fn id(&self) -> EdgeId {
        EdgeId::new(self.source, self.target)
    }
}

/// Full visual state of a graph at one step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
    }
}

/// Step recorded by the sequence (array) tracer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub kind: StepKind,
    pub snapshot: Vec<f64>,
    pub message: String,
    pub highlighted_indices: Vec<usize>,
    /// Source line to highlight alongside this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

/// Step recorded by the graph tracer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStep {
    pub kind: StepKind,
    pub snapshot: GraphSnapshot,
    pub message: String,
    pub highlighted_node_ids: Vec<NodeId>,
    pub highlighted_edge_ids: Vec<EdgeId>,
}

/// A recorded step of either shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Step {
    Sequence(SequenceStep),
    Graph(GraphStep),
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Sequence(step) => step.kind,
            Step::Graph(step) => step.kind,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Step::Sequence(step) => &step.message,
            Step::Graph(step) => &step.message,
        }
    }

    /// Whether the step asks the renderer to emphasize anything
    pub fn has_highlights(&self) -> bool {
        match self {
            Step::Sequence(step) => !step.highlighted_indices.is_empty(),
            Step::Graph(step) => {
                !step.highlighted_node_ids.is_empty() || !step.highlighted_edge_ids.is_empty()
            }
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceStep> {
        match self {
            Step::Sequence(step) => Some(step),
            Step::Graph(_) => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphStep> {
        match self {
            Step::Graph(step) => Some(step),
            Step::Sequence(_) => None,
        }
    }
}

impl From<SequenceStep> for Step {
    fn from(step: SequenceStep) -> Self {
        Step::Sequence(step)
    }
}

impl From<GraphStep> for Step {
    fn from(step: GraphStep) -> Self {
        Step::Graph(step)
    }
}
