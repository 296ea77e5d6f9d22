//! Ready-made styles for common node, edge, and graph looks.

use crate::constants::*;
use crate::graph::RankDir;
use crate::style::{EdgeStyle, GraphStyle, NodeStyle};

pub fn box_node() -> NodeStyle {
    NodeStyle::new()
        .with("shape", BOX)
        .with("style", FILLED)
        .with("fillcolor", LIGHTBLUE)
}

pub fn rounded_box() -> NodeStyle {
    NodeStyle::new()
        .with("shape", BOX)
        .with("style", format!("{FILLED},{ROUNDED}"))
        .with("fillcolor", LIGHTGRAY)
}

pub fn circle_node() -> NodeStyle {
    NodeStyle::new()
        .with("shape", CIRCLE)
        .with("style", FILLED)
        .with("fillcolor", LIGHTBLUE)
}

pub fn diamond_node() -> NodeStyle {
    NodeStyle::new()
        .with("shape", DIAMOND)
        .with("style", FILLED)
        .with("fillcolor", YELLOW)
}

pub fn record_node() -> NodeStyle {
    NodeStyle::new()
        .with("shape", RECORD)
        .with("style", FILLED)
        .with("fillcolor", WHITE)
}

pub fn invisible_node() -> NodeStyle {
    NodeStyle::new().with("style", INVISIBLE)
}

pub fn decision_node() -> NodeStyle {
    diamond_node()
}

pub fn process_node() -> NodeStyle {
    box_node()
}

/// Start/end marker.
pub fn terminal_node() -> NodeStyle {
    NodeStyle::new()
        .with("shape", ELLIPSE)
        .with("style", FILLED)
        .with("fillcolor", LIGHTGRAY)
}

pub fn io_node() -> NodeStyle {
    NodeStyle::new()
        .with("shape", PARALLELOGRAM)
        .with("style", FILLED)
        .with("fillcolor", LIGHTYELLOW)
}

pub fn dashed_edge() -> EdgeStyle {
    EdgeStyle::new().with("style", DASHED)
}

pub fn dotted_edge() -> EdgeStyle {
    EdgeStyle::new().with("style", DOTTED)
}

pub fn bold_edge() -> EdgeStyle {
    EdgeStyle::new().with("style", BOLD).with("penwidth", 2)
}

pub fn red_edge() -> EdgeStyle {
    EdgeStyle::new().with("color", RED)
}

pub fn blue_edge() -> EdgeStyle {
    EdgeStyle::new().with("color", BLUE)
}

pub fn green_edge() -> EdgeStyle {
    EdgeStyle::new().with("color", GREEN)
}

pub fn no_arrow() -> EdgeStyle {
    EdgeStyle::new().with("arrowhead", NONE)
}

pub fn bidirectional() -> EdgeStyle {
    EdgeStyle::new().with("dir", "both")
}

pub fn lr_graph() -> GraphStyle {
    GraphStyle::new().with("rankdir", RankDir::LeftRight.as_str())
}

pub fn tb_graph() -> GraphStyle {
    GraphStyle::new().with("rankdir", RankDir::TopBottom.as_str())
}

pub fn compact_graph() -> GraphStyle {
    GraphStyle::new().with("nodesep", 0.3).with("ranksep", 0.3)
}

pub fn spaced_graph() -> GraphStyle {
    GraphStyle::new().with("nodesep", 1.0).with("ranksep", 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::AttrValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn decision_matches_diamond() {
        assert_eq!(decision_node(), diamond_node());
    }

    #[test]
    fn bold_edge_sets_penwidth() {
        assert_eq!(bold_edge().get("penwidth"), Some(&AttrValue::Int(2)));
    }

    #[test]
    fn lr_graph_sets_rankdir() {
        assert_eq!(lr_graph().get("rankdir"), Some(&AttrValue::from("LR")));
    }
}
