//! Mind maps: a central topic, branches, and leaves joined by arrowless edges.

use crate::constants::*;
use crate::edge::Edge;
use crate::error::Result;
use crate::node::{Node, NodeBuilder};
use crate::style::{EdgeStyle, GraphStyle, NodeStyle};

fn rounded_filled() -> String {
    format!("{FILLED},{ROUNDED}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MindLevel {
    Topic,
    Branch,
    Leaf,
}

impl MindLevel {
    pub fn style(self) -> NodeStyle {
        match self {
            MindLevel::Topic => NodeStyle::new()
                .with("shape", ELLIPSE)
                .with("style", rounded_filled())
                .with("fillcolor", LIGHTBLUE)
                .with("fontname", "Helvetica-Bold")
                .with("fontsize", 16)
                .with("penwidth", 2.5),
            MindLevel::Branch => NodeStyle::new()
                .with("shape", BOX)
                .with("style", rounded_filled())
                .with("fillcolor", LIGHTGREEN)
                .with("fontname", HELVETICA)
                .with("fontsize", 12)
                .with("penwidth", 1.5),
            MindLevel::Leaf => NodeStyle::new()
                .with("shape", BOX)
                .with("style", rounded_filled())
                .with("fillcolor", LIGHTYELLOW)
                .with("fontname", HELVETICA)
                .with("fontsize", 10)
                .with("penwidth", 1.0),
        }
    }

    /// A node builder named and labelled `label`, styled for this level.
    pub fn node(self, label: &str) -> NodeBuilder {
        Node::builder().name(label).label(label).style(self.style())
    }
}

pub fn branch_edge() -> EdgeStyle {
    EdgeStyle::new()
        .with("dir", NONE)
        .with("penwidth", 2.0)
        .with("color", "gray40")
}

pub fn mindmap_graph() -> GraphStyle {
    GraphStyle::new()
        .with("rankdir", "LR")
        .with("splines", "curved")
        .with("nodesep", 0.6)
        .with("ranksep", 1.2)
}

/// For the `twopi` radial layout engine.
pub fn radial_mindmap_graph() -> GraphStyle {
    GraphStyle::new()
        .with("layout", "twopi")
        .with("splines", "curved")
        .with("ranksep", 2.0)
        .with("nodesep", 1.0)
}

/// A mind map outline. Node names are the labels, so labels must be unique
/// within a graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MindMap {
    pub label: String,
    pub children: Vec<MindMap>,
}

impl MindMap {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: MindMap) -> Self {
        self.children.push(child);
        self
    }

    pub fn leaf(self, label: impl Into<String>) -> Self {
        self.child(MindMap::new(label))
    }

    pub fn leaves<S: Into<String>>(self, labels: impl IntoIterator<Item = S>) -> Self {
        labels.into_iter().fold(self, |map, label| map.leaf(label))
    }
}

fn level_for(depth: usize, outline: &MindMap) -> MindLevel {
    match depth {
        0 => MindLevel::Topic,
        1 => MindLevel::Branch,
        _ if outline.children.is_empty() => MindLevel::Leaf,
        _ => MindLevel::Branch,
    }
}

fn grow(parent: &Node, outline: &MindMap, depth: usize) -> Result<()> {
    for child in &outline.children {
        let node = level_for(depth, child).node(&child.label).build()?;
        Edge::builder(parent, &node).style(branch_edge()).build();
        grow(&node, child, depth + 1)?;
    }
    Ok(())
}

/// Builds the outline in the current graph and returns the topic node.
///
/// Direct children of the topic are branches; deeper entries are branches
/// when they have children and leaves otherwise.
pub fn mindmap(outline: &MindMap) -> Result<Node> {
    let root = MindLevel::Topic.node(&outline.label).build()?;
    grow(&root, outline, 1)?;
    Ok(root)
}
