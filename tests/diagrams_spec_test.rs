use pretty_assertions::assert_eq;

use dotweave::class_ast::RelationKind;
use dotweave::mindmap::{self, MindMap};
use dotweave::uml::{self, ClassNode};
use dotweave::{AttrValue, Graph, Node, NodeGroup, RankDir, RenderOptions, presets};

// =============================================================================
// Class diagram text
// =============================================================================

#[test]
fn spec_class_diagram_renders_tables_and_relations() {
    let input = "@startuml\n\
                 abstract class Shape {\n  + area(): float\n}\n\
                 class Circle {\n  - radius: float\n  + area(): float\n}\n\
                 interface Drawable {\n  + draw()\n}\n\
                 Shape <|-- Circle\n\
                 Circle ..|> Drawable\n\
                 @enduml\n";
    let output = dotweave::render(input).unwrap();

    assert!(output.starts_with("digraph \"classes\" {"), "got: {output}");
    assert!(output.contains("\"Shape\" [shape=\"box\""), "got: {output}");
    assert!(output.contains("label=<<TABLE"), "labels are raw markup: {output}");
    assert!(output.contains("&lt;&lt;abstract&gt;&gt;<BR/>Shape"), "got: {output}");
    assert!(output.contains("&lt;&lt;interface&gt;&gt;<BR/>Drawable"), "got: {output}");
    assert!(output.contains("\"Circle\" -> \"Shape\" [arrowhead=\"empty\""), "got: {output}");
    assert!(
        output.contains("\"Circle\" -> \"Drawable\" [arrowhead=\"empty\", style=\"dashed\""),
        "got: {output}"
    );
}

#[test]
fn spec_undeclared_classes_are_created() {
    let output = dotweave::render("Car *-- Engine : has\n").unwrap();
    assert!(output.contains("<B>Car</B>"), "got: {output}");
    assert!(output.contains("<B>Engine</B>"), "got: {output}");
    assert!(output.contains("label=\"has\""), "got: {output}");
}

#[test]
fn spec_render_options() {
    let options = RenderOptions {
        name: "model".to_string(),
        theme: Some("minimal".to_string()),
        rankdir: Some(RankDir::RightLeft),
    };
    let output = dotweave::render_with_options("class A {\n}\n", &options).unwrap();
    assert!(output.starts_with("digraph \"model\" {"), "got: {output}");
    assert!(output.contains("rankdir=\"RL\";"), "got: {output}");
}

#[test]
fn spec_syntax_error_names_offending_text() {
    let err = dotweave::render("class A {\n}\n!!! nonsense\n").unwrap_err();
    assert!(err.to_string().contains("!!! nonsense"), "got: {err}");
}

// =============================================================================
// Programmatic UML
// =============================================================================

#[test]
fn spec_class_node_builders() {
    let g = Graph::builder("uml").style(uml::uml_graph()).build();
    {
        let _scope = g.enter().unwrap();
        let user = ClassNode::new("User")
            .attribute("+ name: str")
            .method("+ login(): bool")
            .build()
            .unwrap();
        let color = ClassNode::enumeration("Color").attribute("RED").build().unwrap();
        uml::relate(&user, &color, RelationKind::Association, Some("likes"));
    }
    let user = g.node("User").unwrap();
    assert_eq!(user.attr("fillcolor"), Some(AttrValue::from("lightblue")));
    let label = user.attr("label").unwrap();
    assert!(label.is_raw());
    assert!(label.as_str().unwrap().contains("+ login(): bool"));

    let color = g.node("Color").unwrap().attr("label").unwrap();
    assert!(color.as_str().unwrap().contains("&lt;&lt;enumeration&gt;&gt;"));

    let edge = &g.edges()[0];
    assert_eq!(edge.attr("label"), Some(AttrValue::from("likes")));
    assert_eq!(edge.attr("arrowhead"), Some(AttrValue::from("normal")));
}

#[test]
fn spec_interface_hides_attributes() {
    let html = ClassNode::interface("Repo").attribute("hidden").method("save()").label_html();
    assert!(!html.contains("hidden"), "got: {html}");
    assert!(html.contains("save()"), "got: {html}");
}

// =============================================================================
// Mind maps
// =============================================================================

#[test]
fn spec_mindmap_builds_tree() {
    let g = Graph::builder("ideas").style(mindmap::mindmap_graph()).build();
    {
        let _scope = g.enter().unwrap();
        let outline = MindMap::new("Trip")
            .child(MindMap::new("Pack").leaves(["Clothes", "Passport"]))
            .leaf("Book");
        mindmap::mindmap(&outline).unwrap();
    }
    let dot = g.to_dot();
    assert!(dot.contains("rankdir=\"LR\";"), "got: {dot}");
    assert!(dot.contains("\"Trip\" -> \"Pack\" [dir=\"none\""), "got: {dot}");
    assert!(dot.contains("\"Pack\" -> \"Passport\""), "got: {dot}");
    assert_eq!(g.edges().len(), 4);
}

// =============================================================================
// Node groups
// =============================================================================

#[test]
fn spec_node_group_reused_in_two_graphs() {
    let template = NodeGroup::new()
        .node("web", |b| b.label("Web").style(presets::rounded_box()))
        .plain("db")
        .in_subgraph(Some("backend"))
        .subgraph_attr("label", "Backend");

    for name in ["one", "two"] {
        let g = Graph::new(name);
        {
            let _scope = g.enter().unwrap();
            let group = template.build().unwrap();
            let _inside = group.enter();
            let _ = &group.get("web").unwrap() >> &group.get("db").unwrap();
        }
        let dot = g.to_dot();
        assert!(dot.contains("subgraph \"cluster_backend\" {"), "got: {dot}");
        assert!(dot.contains("    label=\"Backend\";"), "got: {dot}");
        assert!(dot.contains("    \"web\" -> \"db\";"), "got: {dot}");
    }
}

// =============================================================================
// Markup labels
// =============================================================================

#[test]
fn spec_html_label_node() {
    let g = Graph::new("G");
    {
        let _scope = g.enter().unwrap();
        Node::builder().name("A").html("<I>x</I>").build().unwrap();
    }
    assert!(g.to_dot().contains("\"A\" [label=<<I>x</I>>];"));
}

#[cfg(feature = "markdown")]
#[test]
fn spec_markdown_label_node() {
    let g = Graph::new("G");
    {
        let _scope = g.enter().unwrap();
        Node::builder().name("doc").markdown("# Notes\n\n- **one**").build().unwrap();
    }
    let dot = g.to_dot();
    assert!(dot.contains("\"doc\" [label=<<TABLE"), "got: {dot}");
    assert!(dot.contains("<FONT POINT-SIZE=\"20\"><B>Notes</B></FONT>"), "got: {dot}");
    assert!(dot.contains("&#8226; <B>one</B>"), "got: {dot}");
}
