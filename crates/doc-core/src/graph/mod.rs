//! Source dependency graph
//!
//! Nodes are source files of the project, identified by their path relative
//! to the project root. Edges are imports between two tracked files; imports
//! of anything outside the tracked set are dropped.

mod builder;
mod imports;

pub use builder::GraphBuilder;
pub use imports::{extract_imports, is_relative};

use serde::{Deserialize, Serialize};

/// Kind of a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
}

/// Kind of a graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Import,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// The persisted graph (`RELATIONSHIPS.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Targets imported by `source`, in edge order.
    pub fn dependencies_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a str> {
        self.edges
            .iter()
            .filter(move |e| e.source == source)
            .map(|e| e.target.as_str())
    }
}
