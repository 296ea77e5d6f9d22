use std::cell::{Cell, RefCell};
use std::ops::Shr;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::attrs::AttributeSet;
use crate::edge::EdgeChain;
use crate::error::{Error, Result};
use crate::graph;
use crate::markup;
use crate::resolve::resolve_node;
use crate::style::NodeStyle;
use crate::value::AttrValue;

static NEXT_AUTO_NAME: AtomicU64 = AtomicU64::new(0);

fn auto_name() -> String {
    format!("node_{}", NEXT_AUTO_NAME.fetch_add(1, Ordering::Relaxed))
}

/// A named vertex. Clones share the same underlying node.
#[derive(Debug, Clone)]
pub struct Node {
    name: Rc<str>,
    attrs: Rc<RefCell<AttributeSet>>,
    attached: Rc<Cell<bool>>,
}

#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    name: Option<String>,
    styles: Vec<NodeStyle>,
    attrs: AttributeSet,
    html: Option<String>,
    markdown: Option<String>,
}

impl NodeBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn style(mut self, style: NodeStyle) -> Self {
        self.styles.push(style);
        self
    }

    pub fn styles(mut self, styles: impl IntoIterator<Item = NodeStyle>) -> Self {
        self.styles.extend(styles);
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    pub fn attrs(mut self, attrs: &AttributeSet) -> Self {
        self.attrs.merge(attrs);
        self
    }

    pub fn label(self, label: impl Into<AttrValue>) -> Self {
        self.attr("label", label)
    }

    /// Uses an HTML-like markup body as the label.
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    /// Uses Markdown text, converted to an HTML-like table, as the label.
    pub fn markdown(mut self, text: impl Into<String>) -> Self {
        self.markdown = Some(text.into());
        self
    }

    /// Resolves attributes against the ambient scopes and registers the node.
    pub fn build(mut self) -> Result<Node> {
        let label = match (self.html.take(), self.markdown.take()) {
            (Some(_), Some(_)) => return Err(Error::ConflictingLabelSource),
            (Some(body), None) => Some(markup::html_label(body)),
            (None, Some(text)) => Some(markup::markdown_to_label(&text)?),
            (None, None) => None,
        };
        if let Some(label) = label {
            self.attrs.insert("label", label);
        }

        let name = self.name.unwrap_or_else(auto_name);
        let attrs = resolve_node(&self.styles, &self.attrs);
        let node = Node {
            name: Rc::from(name),
            attrs: Rc::new(RefCell::new(attrs)),
            attached: Rc::new(Cell::new(false)),
        };
        let attached = graph::attach_node(&node)?;
        node.attached.set(attached);
        Ok(node)
    }
}

impl Node {
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    pub fn new(name: impl Into<String>) -> Result<Node> {
        Self::builder().name(name).build()
    }

    /// A node with a generated `node_<n>` name.
    pub fn anonymous() -> Result<Node> {
        Self::builder().build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attrs(&self) -> AttributeSet {
        self.attrs.borrow().clone()
    }

    pub fn attr(&self, key: &str) -> Option<AttrValue> {
        self.attrs.borrow().get(key).cloned()
    }

    /// Whether the node was registered with a graph or subgraph.
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> &Self {
        self.attrs.borrow_mut().insert(key, value);
        self
    }

    /// Overlays a style on the current attributes.
    pub fn apply(&self, style: &NodeStyle) -> &Self {
        self.update(style.attrs())
    }

    pub fn update(&self, attrs: &AttributeSet) -> &Self {
        self.attrs.borrow_mut().merge(attrs);
        self
    }

    pub fn connect(&self, target: &Node) -> EdgeChain {
        EdgeChain::from_source(self).then(target)
    }

    /// One edge per target, in order.
    pub fn connect_all(&self, targets: &[Node]) -> EdgeChain {
        EdgeChain::from_source(self).then_all(targets)
    }
}

impl Shr<&Node> for &Node {
    type Output = EdgeChain;

    fn shr(self, target: &Node) -> EdgeChain {
        self.connect(target)
    }
}

impl Shr<&[Node]> for &Node {
    type Output = EdgeChain;

    fn shr(self, targets: &[Node]) -> EdgeChain {
        self.connect_all(targets)
    }
}

impl<const N: usize> Shr<&[Node; N]> for &Node {
    type Output = EdgeChain;

    fn shr(self, targets: &[Node; N]) -> EdgeChain {
        self.connect_all(targets)
    }
}

impl Shr<&Vec<Node>> for &Node {
    type Output = EdgeChain;

    fn shr(self, targets: &Vec<Node>) -> EdgeChain {
        self.connect_all(targets)
    }
}
