use crate::attrs::AttributeSet;
use crate::edge::Edge;
use crate::graph::{Graph, GraphType, Subgraph};
use crate::node::Node;
use crate::value::AttrValue;

const INDENT: &str = "  ";

/// Escapes backslashes and double quotes; everything else passes through.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", escape(s))
}

/// Formats one attribute value. Markup bodies are wrapped in `<` `>`; all
/// other values are quoted.
pub fn format_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Raw(body) => format!("<{body}>"),
        other => quoted(&other.to_string()),
    }
}

fn format_attr_list(attrs: &AttributeSet) -> String {
    let parts: Vec<String> = attrs
        .iter()
        .map(|(key, value)| format!("{key}={}", format_value(value)))
        .collect();
    format!("[{}]", parts.join(", "))
}

fn render_attr_statements(attrs: &AttributeSet, indent: &str, lines: &mut Vec<String>) {
    for (key, value) in attrs.iter() {
        lines.push(format!("{indent}{key}={};", format_value(value)));
    }
}

fn render_node(node: &Node, indent: &str) -> String {
    let attrs = node.attrs();
    if attrs.is_empty() {
        format!("{indent}{};", quoted(node.name()))
    } else {
        format!("{indent}{} {};", quoted(node.name()), format_attr_list(&attrs))
    }
}

fn render_edge(edge: &Edge, graph_type: GraphType, indent: &str) -> String {
    let head = format!(
        "{indent}{} {} {}",
        quoted(edge.source().name()),
        graph_type.connector(),
        quoted(edge.target().name())
    );
    let attrs = edge.attrs();
    if attrs.is_empty() {
        format!("{head};")
    } else {
        format!("{head} {};", format_attr_list(&attrs))
    }
}

fn render_subgraph(
    subgraph: &Subgraph,
    graph_type: GraphType,
    indent: &str,
    lines: &mut Vec<String>,
) {
    let inner = format!("{indent}{INDENT}");
    subgraph.with_contents(|name, attrs, nodes, edges, children| {
        lines.push(format!("{indent}subgraph {} {{", quoted(name)));
        render_attr_statements(attrs, &inner, lines);
        for node in nodes {
            lines.push(render_node(node, &inner));
        }
        for edge in edges {
            lines.push(render_edge(edge, graph_type, &inner));
        }
        for child in children {
            render_subgraph(child, graph_type, &inner, lines);
        }
        lines.push(format!("{indent}}}"));
    });
}

/// Serializes a graph to DOT text. Never fails.
pub fn render_graph(graph: &Graph) -> String {
    let graph_type = graph.graph_type();
    let mut lines = vec![format!("{} {} {{", graph_type.keyword(), quoted(&graph.name()))];
    render_attr_statements(&graph.attrs(), INDENT, &mut lines);

    graph.with_contents(|subgraphs, nodes, edges| {
        for subgraph in subgraphs {
            render_subgraph(subgraph, graph_type, INDENT, &mut lines);
        }
        for node in nodes {
            lines.push(render_node(node, INDENT));
        }
        for edge in edges {
            lines.push(render_edge(edge, graph_type, INDENT));
        }
    });

    lines.push("}".to_string());
    lines.join("\n")
}
