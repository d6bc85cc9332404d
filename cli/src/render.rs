//! Plain-text rendering of steps for the terminal

use std::fmt::Write as _;

use stepwise_core::trace::{GraphStep, SequenceStep, Step};
use stepwise_core::AlgorithmKind;

/// One status line for the step at `index` of a `total`-step trace.
pub fn render_step(index: usize, total: usize, step: &Step) -> String {
    let body = match step {
        Step::Sequence(step) => render_sequence(step),
        Step::Graph(step) => render_graph(step),
    };
    format!(
        "{:>width$}/{total} {:<8} {body} | {}",
        index + 1,
        step.kind(),
        step.message(),
        width = total.to_string().len()
    )
}

fn render_sequence(step: &SequenceStep) -> String {
    let cells: Vec<String> = step
        .snapshot
        .iter()
        .enumerate()
        .map(|(i, value)| {
            if step.highlighted_indices.contains(&i) {
                format!("[{value}]")
            } else {
                value.to_string()
            }
        })
        .collect();
    format!("({})", cells.join(" "))
}

fn render_graph(step: &GraphStep) -> String {
    let mut out = String::new();
    for (i, node) in step.snapshot.nodes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let name = if node.label.is_empty() {
            node.id.to_string()
        } else {
            node.label.clone()
        };
        let mark = if node.visited { "*" } else { "" };
        if step.highlighted_node_ids.contains(&node.id) {
            let _ = write!(out, "[{name}{mark}]");
        } else {
            let _ = write!(out, "{name}{mark}");
        }
    }
    if !step.highlighted_edge_ids.is_empty() {
        let edges: Vec<&str> = step.highlighted_edge_ids.iter().map(|edge| edge.as_str()).collect();
        let _ = write!(out, " via {}", edges.join(", "));
    }
    format!("{{{out}}}")
}

/// Table of every registered algorithm.
pub fn render_catalogue() -> String {
    let mut out = format!("{:<16} {:<28} {:<20} {:<10} {}\n", "ID", "NAME", "CATEGORY", "WORST", "TRACING");
    for &kind in AlgorithmKind::all() {
        let status = if kind.is_implemented() { "traced" } else { "placeholder" };
        let _ = writeln!(
            out,
            "{:<16} {:<28} {:<20} {:<10} {}",
            kind.id(),
            kind.name(),
            kind.category(),
            kind.complexity().worst_case,
            status
        );
    }
    out
}
