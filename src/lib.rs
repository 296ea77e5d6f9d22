pub mod attrs;
pub mod backend;
pub mod class_ast;
pub mod class_parser;
pub mod constants;
pub mod context;
pub mod edge;
pub mod error;
pub mod graph;
pub mod group;
pub mod markup;
pub mod mindmap;
pub mod node;
pub mod presets;
pub mod renderer;
pub mod resolve;
pub mod style;
pub mod theme;
pub mod uml;
pub mod value;

pub use attrs::AttributeSet;
pub use context::ScopeGuard;
pub use edge::{Edge, EdgeBuilder, EdgeChain};
pub use error::{Error, Result};
pub use graph::{
    ContainerScope, Graph, GraphBuilder, GraphType, RankDir, Subgraph, SubgraphBuilder,
};
pub use group::{Group, NodeGroup};
pub use node::{Node, NodeBuilder};
pub use style::{EdgeStyle, GraphStyle, NodeStyle, Style};
pub use theme::Theme;
pub use value::AttrValue;

use class_ast::ClassDiagram;

/// Settings for turning class-diagram text into a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub name: String,
    pub theme: Option<String>,
    pub rankdir: Option<RankDir>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            name: "classes".to_string(),
            theme: None,
            rankdir: None,
        }
    }
}

pub fn render(input: &str) -> Result<String> {
    render_with_options(input, &RenderOptions::default())
}

/// Parses class-diagram text and returns the DOT document.
pub fn render_with_options(input: &str, options: &RenderOptions) -> Result<String> {
    let diagram = class_parser::parse_class_diagram(input)?;
    let graph = build_class_graph(&diagram, options)?;
    Ok(graph.to_dot())
}

pub fn build_class_graph(diagram: &ClassDiagram, options: &RenderOptions) -> Result<Graph> {
    let mut builder = Graph::builder(&options.name).style(uml::uml_graph());
    if let Some(theme) = &options.theme {
        builder = builder.theme(theme);
    }
    if let Some(rankdir) = options.rankdir {
        builder = builder.rankdir(rankdir);
    }
    let graph = builder.build();
    {
        let _scope = graph.enter()?;
        uml::build_class_diagram(diagram)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_reports_syntax_errors() {
        let err = render("classDiagram\n  Foo\n").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got: {err}");
        assert!(
            err.to_string().contains("classDiagram"),
            "error should include the line, got: {err}"
        );
    }

    #[test]
    fn render_empty_input_is_empty_graph() {
        let output = render("").unwrap();
        assert!(output.starts_with("digraph \"classes\" {"), "got: {output}");
        assert!(output.contains("splines=\"ortho\";"), "got: {output}");
    }

    #[test]
    fn render_class_diagram_works() {
        let output = render("class A {\n}\nclass B {\n}\nA --> B\n").unwrap();
        assert!(output.contains("\"A\" -> \"B\""), "got: {output}");
    }

    #[test]
    fn options_override_direction_and_theme() {
        let options = RenderOptions {
            name: "uml".to_string(),
            theme: Some("dark".to_string()),
            rankdir: Some(RankDir::LeftRight),
        };
        let output = render_with_options("class A {\n}\n", &options).unwrap();
        assert!(output.contains("rankdir=\"LR\";"), "got: {output}");
        assert!(output.contains("bgcolor=\"#2d2d2d\";"), "got: {output}");
        assert!(context::is_idle());
    }
}
