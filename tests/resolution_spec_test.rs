use pretty_assertions::assert_eq;

use dotweave::context;
use dotweave::{AttrValue, EdgeStyle, Error, Graph, GraphStyle, Node, NodeStyle, Subgraph, Theme};

fn theme(name: &str, fill: &str) -> Theme {
    Theme::new(
        name,
        GraphStyle::new().with("bgcolor", fill),
        NodeStyle::new().with("fillcolor", fill).with("shape", "box"),
        EdgeStyle::new().with("color", fill),
    )
}

fn value(s: &str) -> Option<AttrValue> {
    Some(AttrValue::from(s))
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn spec_direct_beats_explicit_beats_scoped_beats_theme() {
    let g = Graph::builder("G").custom_theme(theme("t", "theme")).build();
    let _scope = g.enter().unwrap();
    let _scoped = NodeStyle::new().with("fillcolor", "scoped").with("color", "scoped").enter();

    let node = Node::builder()
        .name("A")
        .style(NodeStyle::new().with("color", "explicit").with("fontname", "explicit"))
        .attr("fontname", "direct")
        .build()
        .unwrap();

    assert_eq!(node.attr("shape"), value("box"), "theme fills gaps");
    assert_eq!(node.attr("fillcolor"), value("scoped"));
    assert_eq!(node.attr("color"), value("explicit"));
    assert_eq!(node.attr("fontname"), value("direct"));
}

#[test]
fn spec_later_scoped_style_wins() {
    let _outer = NodeStyle::new().with("color", "outer").with("shape", "circle").enter();
    let _inner = NodeStyle::new().with("color", "inner").enter();
    let node = Node::new("A").unwrap();
    assert_eq!(node.attr("color"), value("inner"));
    assert_eq!(node.attr("shape"), value("circle"));
}

#[test]
fn spec_explicit_styles_apply_in_order() {
    let node = Node::builder()
        .name("A")
        .styles([
            NodeStyle::new().with("color", "first"),
            NodeStyle::new().with("color", "second"),
        ])
        .build()
        .unwrap();
    assert_eq!(node.attr("color"), value("second"));
}

#[test]
fn spec_edge_resolution_uses_edge_stack_only() {
    let g = Graph::new("G");
    let _scope = g.enter().unwrap();
    let _node_style = NodeStyle::new().with("color", "node").enter();
    let _edge_style = EdgeStyle::new().with("style", "dashed").enter();
    let a = Node::new("A").unwrap();
    let b = Node::new("B").unwrap();
    let edge = dotweave::Edge::builder(&a, &b).attr("color", "red").build();
    assert_eq!(edge.attr("style"), value("dashed"));
    assert_eq!(edge.attr("color"), value("red"));
}

#[test]
fn spec_graph_rankdir_param_beats_styles_but_not_direct() {
    let g = Graph::builder("G")
        .style(GraphStyle::new().with("rankdir", "BT"))
        .rankdir(dotweave::RankDir::LeftRight)
        .build();
    assert_eq!(g.attr("rankdir"), value("LR"));

    let g = Graph::builder("G")
        .rankdir(dotweave::RankDir::LeftRight)
        .attr("rankdir", "RL")
        .build();
    assert_eq!(g.attr("rankdir"), value("RL"));

    let g = Graph::builder("G").style(GraphStyle::new().with("rankdir", "BT")).build();
    assert_eq!(g.attr("rankdir"), value("BT"), "style value kept when no parameter");
}

// =============================================================================
// Scope restoration
// =============================================================================

#[test]
fn spec_scope_exit_restores_previous_state() {
    {
        let _style = NodeStyle::new().with("color", "red").enter();
        assert_eq!(context::active_node_styles().len(), 1);
    }
    assert!(context::active_node_styles().is_empty());
    assert!(context::is_idle());
}

#[test]
fn spec_scope_restored_when_body_panics() {
    let result = std::panic::catch_unwind(|| {
        let _theme = context::enter_theme(theme("t", "x"));
        let _style = EdgeStyle::new().with("color", "red").enter();
        let g = Graph::new("G");
        let _scope = g.enter().unwrap();
        panic!("boom");
    });
    assert!(result.is_err());
    assert!(context::is_idle(), "every scope entered before the panic is released");
    assert!(context::current_graph().is_none());
}

#[test]
fn spec_graph_scope_ends_graph_context() {
    let g = Graph::new("G");
    {
        let _scope = g.enter().unwrap();
        assert_eq!(context::current_graph().map(|g| g.name()), Some("G".to_string()));
    }
    assert!(context::current_graph().is_none());
    let late = Node::new("late").unwrap();
    assert!(!late.is_attached());
    assert!(g.nodes().is_empty());
}

#[test]
fn spec_nested_graph_is_rejected() {
    let outer = Graph::new("outer");
    let _scope = outer.enter().unwrap();
    match Graph::new("inner").enter().unwrap_err() {
        Error::NestedGraph { outer, inner } => {
            assert_eq!(outer, "outer");
            assert_eq!(inner, "inner");
        }
        other => panic!("expected NestedGraph, got: {other}"),
    }
}

// =============================================================================
// Themes
// =============================================================================

#[test]
fn spec_inner_theme_shadows_outer() {
    let _outer = context::enter_theme(theme("outer", "outer"));
    {
        let _inner = context::enter_theme(theme("inner", "inner"));
        assert_eq!(Node::new("A").unwrap().attr("fillcolor"), value("inner"));
    }
    assert_eq!(Node::new("B").unwrap().attr("fillcolor"), value("outer"));
}

#[test]
fn spec_subgraph_theme_applies_inside_only() {
    let g = Graph::builder("G").custom_theme(theme("graph", "graph")).build();
    let _scope = g.enter().unwrap();
    let sg = Subgraph::builder().name("inner").custom_theme(theme("sub", "sub")).build();
    {
        let _inside = sg.enter();
        assert_eq!(Node::new("A").unwrap().attr("fillcolor"), value("sub"));
    }
    assert_eq!(Node::new("B").unwrap().attr("fillcolor"), value("graph"));
}

#[test]
fn spec_unknown_theme_is_ignored() {
    assert!(context::enter_theme_named("no-such-theme").is_none());
    let g = Graph::builder("G").theme("no-such-theme").build();
    assert!(g.theme().is_none());
    assert_eq!(g.attrs().len(), 1, "only the default rankdir");
    let _scope = g.enter().unwrap();
    assert!(Node::new("A").unwrap().attrs().is_empty());
}

#[test]
fn spec_builtin_theme_by_name() {
    let g = Graph::builder("G").theme("dark").build();
    assert_eq!(g.attr("bgcolor"), value("#2d2d2d"));
    let _scope = g.enter().unwrap();
    assert_eq!(Node::new("A").unwrap().attr("fillcolor"), value("#4d4d4d"));
}

#[test]
fn spec_all_builtin_themes_resolve() {
    for name in dotweave::theme::names() {
        let theme = Theme::by_name(name).unwrap();
        assert_eq!(theme.name, *name);
    }
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn spec_duplicate_node_name_is_error() {
    let g = Graph::new("G");
    let _scope = g.enter().unwrap();
    Node::new("A").unwrap();
    let err = Node::new("A").unwrap_err();
    assert!(matches!(err, Error::DuplicateNode { ref name } if name == "A"), "got: {err}");
    assert_eq!(g.nodes().len(), 1);
}

#[test]
fn spec_duplicate_across_subgraphs_is_error() {
    let g = Graph::new("G");
    let _scope = g.enter().unwrap();
    Node::new("A").unwrap();
    let sg = Subgraph::new("box");
    let _inside = sg.enter();
    assert!(Node::new("A").is_err());
}

#[test]
fn spec_conflicting_label_sources() {
    let err = Node::builder().name("A").html("<B>x</B>").markdown("**x**").build().unwrap_err();
    assert!(matches!(err, Error::ConflictingLabelSource));
}

#[test]
fn spec_anonymous_nodes_get_distinct_names() {
    let a = Node::anonymous().unwrap();
    let b = Node::anonymous().unwrap();
    assert!(a.name().starts_with("node_"));
    assert!(a.name() != b.name());
}
