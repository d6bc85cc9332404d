//! Graph tracer
//!
//! Same recording contract as the sequence tracer, but the snapshot is the
//! `(nodes, edges)` pair and highlights are node ids and edge tokens.

use super::recorder::{Phase, StepLog};
use super::{EdgeId, GraphEdge, GraphNode, GraphSnapshot, GraphStep, NodeId, Step, StepKind, Trace, TraceError};

#[derive(Debug, Clone)]
pub struct GraphTracer {
    graph: GraphSnapshot,
    log: StepLog<GraphStep>,
}

impl GraphTracer {
    pub fn new() -> Self {
        Self {
            graph: GraphSnapshot::default(),
            log: StepLog::new(),
        }
    }

    /// Copies the graph and records the `init` step. Must be the first call.
    pub fn init(&mut self, nodes: &[GraphNode], edges: &[GraphEdge]) -> Result<(), TraceError> {
        self.log.check_init()?;
        self.graph = GraphSnapshot {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
        };
        let step = self.capture(StepKind::Init, "Initial graph".to_string(), Vec::new(), Vec::new());
        self.log.begin(step)
    }

    /// Marks `id` visited and records the result with the node highlighted.
    pub fn visit_node(&mut self, id: NodeId, message: impl Into<String>) -> Result<(), TraceError> {
        self.log.check_recording("visit_node")?;
        let node = self
            .graph
            .nodes
            .iter_mut()
            .find(|node| node.id == id)
            .ok_or(TraceError::UnknownNode(id))?;
        node.visited = true;
        let step = self.capture(StepKind::Visit, message.into(), vec![id], Vec::new());
        self.log.record("visit_node", step)
    }

    /// Records following the `source -> target` edge.
    pub fn traverse_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        message: impl Into<String>,
    ) -> Result<(), TraceError> {
        self.log.check_recording("traverse_edge")?;
        if !self.graph.has_edge(source, target) {
            return Err(TraceError::UnknownEdge(EdgeId::new(source, target)));
        }
        let step = self.capture(
            StepKind::Traverse,
            message.into(),
            vec![source, target],
            vec![EdgeId::new(source, target)],
        );
        self.log.record("traverse_edge", step)
    }

    /// Records a narrative step with arbitrary highlights and no data change.
    pub fn note(
        &mut self,
        message: impl Into<String>,
        nodes: &[NodeId],
        edges: &[(NodeId, NodeId)],
    ) -> Result<(), TraceError> {
        self.log.check_recording("note")?;
        for &id in nodes {
            if self.graph.node(id).is_none() {
                return Err(TraceError::UnknownNode(id));
            }
        }
        let mut edge_ids = Vec::with_capacity(edges.len());
        for &(source, target) in edges {
            let edge_id = EdgeId::new(source, target);
            if !self.graph.has_edge(source, target) {
                return Err(TraceError::UnknownEdge(edge_id));
            }
            edge_ids.push(edge_id);
        }
        let step = self.capture(StepKind::Note, message.into(), nodes.to_vec(), edge_ids);
        self.log.record("note", step)
    }

    /// Records the terminal step and closes the tracer.
    pub fn end(&mut self, message: impl Into<String>) -> Result<(), TraceError> {
        self.log.check_recording("end")?;
        let step = self.capture(StepKind::End, message.into(), Vec::new(), Vec::new());
        self.log.close(step)
    }

    /// Current working graph.
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.graph
    }

    pub fn steps(&self) -> &[GraphStep] {
        self.log.steps()
    }

    pub fn is_closed(&self) -> bool {
        self.log.phase() == Phase::Closed
    }

    pub fn trace(&self) -> Trace {
        Trace::new(self.steps().iter().cloned().map(Step::Graph).collect())
    }

    pub fn into_trace(self) -> Trace {
        Trace::new(self.log.into_steps().into_iter().map(Step::Graph).collect())
    }

    fn capture(
        &self,
        kind: StepKind,
        message: String,
        highlighted_node_ids: Vec<NodeId>,
        highlighted_edge_ids: Vec<EdgeId>,
    ) -> GraphStep {
        GraphStep {
            kind,
            snapshot: self.graph.clone(),
            message,
            highlighted_node_ids,
            highlighted_edge_ids,
        }
    }
}

impl Default for GraphTracer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphTracer {
        let nodes = vec![GraphNode::new(0, "A"), GraphNode::new(1, "B"), GraphNode::new(2, "C")];
        let edges = vec![GraphEdge::new(0, 1), GraphEdge::new(1, 2), GraphEdge::new(2, 0)];
        let mut tracer = GraphTracer::new();
        tracer.init(&nodes, &edges).unwrap();
        tracer
    }

    #[test]
    fn test_visit_marks_node_and_keeps_history() {
        let mut tracer = triangle();
        tracer.visit_node(NodeId(1), "visit B").unwrap();
        tracer.end("done").unwrap();

        let steps = tracer.steps();
        assert!(!steps[0].snapshot.node(NodeId(1)).unwrap().visited);
        assert!(steps[1].snapshot.node(NodeId(1)).unwrap().visited);
        assert_eq!(steps[1].kind, StepKind::Visit);
        assert_eq!(steps[1].highlighted_node_ids, vec![NodeId(1)]);
        assert!(steps[2].highlighted_node_ids.is_empty());
        assert!(tracer.trace().validate().is_ok());
    }

    #[test]
    fn test_traverse_highlights_edge_token() {
        let mut tracer = triangle();
        tracer.traverse_edge(NodeId(0), NodeId(1), "A to B").unwrap();

        let step = &tracer.steps()[1];
        assert_eq!(step.kind, StepKind::Traverse);
        assert_eq!(step.highlighted_edge_ids, vec![EdgeId::new(NodeId(0), NodeId(1))]);
        assert_eq!(step.highlighted_node_ids, vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut tracer = triangle();
        assert!(matches!(
            tracer.visit_node(NodeId(9), "nope"),
            Err(TraceError::UnknownNode(NodeId(9)))
        ));
        assert!(matches!(
            tracer.traverse_edge(NodeId(1), NodeId(0), "reverse"),
            Err(TraceError::UnknownEdge(_))
        ));
        assert!(matches!(
            tracer.note("bad edge", &[], &[(NodeId(0), NodeId(2))]),
            Err(TraceError::UnknownEdge(_))
        ));
        assert_eq!(tracer.steps().len(), 1);
    }

    #[test]
    fn test_misuse_outside_recording_phase() {
        let mut tracer = GraphTracer::new();
        assert!(matches!(
            tracer.visit_node(NodeId(0), "early"),
            Err(TraceError::NotInitialized { op: "visit_node" })
        ));

        let mut tracer = triangle();
        tracer.end("done").unwrap();
        assert!(matches!(
            tracer.traverse_edge(NodeId(0), NodeId(1), "late"),
            Err(TraceError::Closed { op: "traverse_edge" })
        ));
    }
}
