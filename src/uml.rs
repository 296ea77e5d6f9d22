//! UML class diagrams: class nodes with HTML table labels and relation edges.

use indexmap::IndexMap;

use crate::attrs::AttributeSet;
use crate::class_ast::{ClassDecl, ClassDiagram, ClassKind, RelationKind};
use crate::constants::*;
use crate::edge::Edge;
use crate::error::Result;
use crate::markup::{self, Section, TableFrame};
use crate::node::Node;
use crate::style::{EdgeStyle, GraphStyle, NodeStyle};
use crate::value::AttrValue;

pub fn class_style() -> NodeStyle {
    NodeStyle::new()
        .with("shape", BOX)
        .with("style", FILLED)
        .with("fillcolor", LIGHTBLUE)
        .with("fontname", HELVETICA)
}

pub fn interface_style() -> NodeStyle {
    NodeStyle::new()
        .with("shape", BOX)
        .with("style", FILLED)
        .with("fillcolor", LIGHTYELLOW)
        .with("fontname", "Helvetica-Oblique")
}

pub fn abstract_style() -> NodeStyle {
    NodeStyle::new()
        .with("shape", BOX)
        .with("style", FILLED)
        .with("fillcolor", LIGHTGRAY)
        .with("fontname", "Helvetica-Oblique")
}

pub fn uml_graph() -> GraphStyle {
    GraphStyle::new()
        .with("rankdir", "TB")
        .with("splines", "ortho")
        .with("nodesep", 0.8)
        .with("ranksep", 1.0)
}

/// Builder for a UML class node.
///
/// The node is named after the class; its label is a table with the
/// (optionally stereotyped) name, then attributes, then methods.
#[derive(Debug, Clone)]
pub struct ClassNode {
    kind: ClassKind,
    name: String,
    stereotype: Option<String>,
    attributes: Vec<String>,
    methods: Vec<String>,
    styles: Vec<NodeStyle>,
    attrs: AttributeSet,
}

impl ClassNode {
    fn with_kind(kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            stereotype: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            styles: Vec::new(),
            attrs: AttributeSet::new(),
        }
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(ClassKind::Class, name)
    }

    /// An `<<interface>>` node. Attributes are not shown.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(ClassKind::Interface, name)
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::with_kind(ClassKind::AbstractClass, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::with_kind(ClassKind::Enum, name)
    }

    pub fn from_decl(decl: &ClassDecl) -> Self {
        let mut node = Self::with_kind(decl.kind, decl.name.clone())
            .attributes(decl.attributes.iter().cloned())
            .methods(decl.methods.iter().cloned());
        node.stereotype = decl.stereotype.clone();
        node
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn attributes(mut self, attributes: impl IntoIterator<Item = String>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = String>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Ignored for interfaces and abstract classes, which carry fixed
    /// stereotypes.
    pub fn stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = Some(stereotype.into());
        self
    }

    pub fn style(mut self, style: NodeStyle) -> Self {
        self.styles.push(style);
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    fn effective_stereotype(&self) -> Option<&str> {
        match self.kind {
            ClassKind::Interface => Some("interface"),
            ClassKind::AbstractClass => Some("abstract"),
            ClassKind::Enum => Some(self.stereotype.as_deref().unwrap_or("enumeration")),
            ClassKind::Class => self.stereotype.as_deref(),
        }
    }

    /// The HTML table body used as the label.
    pub fn label_html(&self) -> String {
        let mut sections = Vec::new();
        if self.kind != ClassKind::Interface && !self.attributes.is_empty() {
            sections.push(Section::left(
                self.attributes.iter().map(|a| markup::escape_html(a)).collect(),
            ));
        }
        if !self.methods.is_empty() {
            sections.push(Section::left(
                self.methods.iter().map(|m| markup::escape_html(m)).collect(),
            ));
        }

        let mut title = markup::escape_html(&self.name);
        if let Some(stereotype) = self.effective_stereotype() {
            title = format!("&lt;&lt;{}&gt;&gt;<BR/>{title}", markup::escape_html(stereotype));
        }
        markup::table_html(&title, &sections, TableFrame::default())
    }

    pub fn build(self) -> Result<Node> {
        let kind_style = match self.kind {
            ClassKind::Interface => Some(interface_style()),
            ClassKind::AbstractClass => Some(abstract_style()),
            ClassKind::Class | ClassKind::Enum => None,
        };
        let html = self.label_html();
        Node::builder()
            .name(self.name)
            .style(class_style())
            .styles(kind_style)
            .styles(self.styles)
            .attrs(&self.attrs)
            .html(html)
            .build()
    }
}

/// Generalization: hollow triangle head.
pub fn inheritance() -> EdgeStyle {
    EdgeStyle::new()
        .with("arrowhead", EMPTY)
        .with("color", BLACK)
        .with("penwidth", 1.5)
}

/// Realization: dashed line, hollow triangle head.
pub fn implements() -> EdgeStyle {
    EdgeStyle::new()
        .with("arrowhead", EMPTY)
        .with("style", DASHED)
        .with("color", BLACK)
        .with("penwidth", 1.5)
}

/// Filled diamond at the owner.
pub fn composition() -> EdgeStyle {
    EdgeStyle::new()
        .with("arrowhead", NORMAL)
        .with("arrowtail", DIAMOND_ARROW)
        .with("dir", "both")
        .with("color", BLACK)
        .with("penwidth", 1.5)
}

/// Hollow diamond at the owner.
pub fn aggregation() -> EdgeStyle {
    EdgeStyle::new()
        .with("arrowhead", NORMAL)
        .with("arrowtail", ODIAMOND_ARROW)
        .with("dir", "both")
        .with("color", BLACK)
        .with("penwidth", 1.5)
}

pub fn association() -> EdgeStyle {
    Association::default().style()
}

pub fn dependency() -> EdgeStyle {
    EdgeStyle::new()
        .with("arrowhead", VEE)
        .with("style", DASHED)
        .with("color", GRAY)
        .with("penwidth", 1.0)
}

/// An association with optional multiplicities at either end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Association {
    pub label: Option<String>,
    pub source_multiplicity: Option<String>,
    pub target_multiplicity: Option<String>,
    pub bidirectional: bool,
}

impl Association {
    pub fn style(&self) -> EdgeStyle {
        let mut style = EdgeStyle::new().with("color", BLACK).with("penwidth", 1.5);
        if let Some(label) = &self.label {
            style = style.with("label", label);
        }
        style = if self.bidirectional {
            style.with("dir", NONE)
        } else {
            style.with("arrowhead", NORMAL)
        };
        if let Some(m) = &self.source_multiplicity {
            style = style.with("taillabel", m);
        }
        if let Some(m) = &self.target_multiplicity {
            style = style.with("headlabel", m);
        }
        style
    }
}

pub fn relation_style(kind: RelationKind) -> EdgeStyle {
    match kind {
        RelationKind::Inheritance => inheritance(),
        RelationKind::Implements => implements(),
        RelationKind::Composition => composition(),
        RelationKind::Aggregation => aggregation(),
        RelationKind::Association => association(),
        RelationKind::Dependency => dependency(),
    }
}

/// Connects two class nodes with a relation style and optional label.
pub fn relate(from: &Node, to: &Node, kind: RelationKind, label: Option<&str>) -> Edge {
    let mut builder = Edge::builder(from, to).style(relation_style(kind));
    if let Some(label) = label {
        builder = builder.label(label);
    }
    builder.build()
}

/// Creates every class and relation of a parsed diagram in the current
/// graph. Relations naming undeclared classes create plain class nodes.
pub fn build_class_diagram(diagram: &ClassDiagram) -> Result<IndexMap<String, Node>> {
    let mut nodes = IndexMap::new();
    for decl in &diagram.classes {
        let node = ClassNode::from_decl(decl).build()?;
        nodes.insert(decl.name.clone(), node);
    }
    for rel in &diagram.relations {
        for name in [&rel.from, &rel.to] {
            if !nodes.contains_key(name.as_str()) {
                let node = ClassNode::new(name.clone()).build()?;
                nodes.insert(name.clone(), node);
            }
        }
        if let (Some(from), Some(to)) = (nodes.get(rel.from.as_str()), nodes.get(rel.to.as_str())) {
            relate(from, to, rel.kind, rel.label.as_deref());
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use pretty_assertions::assert_eq;

    #[test]
    fn class_label_lists_members() {
        let html = ClassNode::new("Animal")
            .attribute("+ name: str")
            .method("+ speak(): void")
            .label_html();
        assert!(html.contains("<TR><TD><B>Animal</B></TD></TR>"), "got: {html}");
        assert!(html.contains("<TD ALIGN=\"LEFT\">+ name: str</TD>"), "got: {html}");
        assert!(html.contains("<TD ALIGN=\"LEFT\">+ speak(): void</TD>"), "got: {html}");
    }

    #[test]
    fn member_text_is_escaped() {
        let html = ClassNode::new("Box").attribute("- items: List<T>").label_html();
        assert!(html.contains("List&lt;T&gt;"), "got: {html}");
    }

    #[test]
    fn interface_has_stereotype_and_hides_attributes() {
        let html = ClassNode::interface("Drawable")
            .attribute("x: int")
            .method("+ draw(): void")
            .label_html();
        assert!(html.contains("&lt;&lt;interface&gt;&gt;<BR/>Drawable"), "got: {html}");
        assert!(!html.contains("x: int"), "got: {html}");
    }

    #[test]
    fn enum_defaults_to_enumeration_stereotype() {
        let html = ClassNode::enumeration("Color").attribute("RED").label_html();
        assert!(html.contains("&lt;&lt;enumeration&gt;&gt;"), "got: {html}");
    }

    #[test]
    fn abstract_node_styles_layer_over_class_style() {
        let node = ClassNode::abstract_class("Shape").build().unwrap();
        assert_eq!(node.attr("fillcolor"), Some(AttrValue::from("lightgray")));
        assert_eq!(node.attr("fontname"), Some(AttrValue::from("Helvetica-Oblique")));
        assert!(node.attr("label").is_some_and(|l| l.is_raw()));
    }

    #[test]
    fn association_multiplicities() {
        let style = Association {
            label: Some("enrolls".into()),
            source_multiplicity: Some("1".into()),
            target_multiplicity: Some("*".into()),
            bidirectional: true,
        }
        .style();
        assert_eq!(style.get("dir"), Some(&AttrValue::from("none")));
        assert_eq!(style.get("headlabel"), Some(&AttrValue::from("*")));
        assert!(style.get("arrowhead").is_none());
    }

    #[test]
    fn diagram_creates_missing_classes() {
        let g = Graph::new("G");
        let _scope = g.enter().unwrap();
        let input = "class Dog {\n}\nAnimal <|-- Dog\n";
        let diagram = crate::class_parser::parse_class_diagram(input).unwrap();
        let nodes = build_class_diagram(&diagram).unwrap();
        let names: Vec<&str> = nodes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Dog", "Animal"]);
        let edges = g.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].key(), ("Dog".to_string(), "Animal".to_string()));
        assert_eq!(edges[0].attr("arrowhead"), Some(AttrValue::from("empty")));
    }
}
