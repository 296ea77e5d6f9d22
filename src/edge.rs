use std::cell::{Cell, RefCell};
use std::ops::{BitOr, Shr};
use std::rc::Rc;

use crate::attrs::AttributeSet;
use crate::graph;
use crate::node::Node;
use crate::resolve::resolve_edge;
use crate::style::EdgeStyle;
use crate::value::AttrValue;

/// A connection between two nodes. Clones share the same underlying edge.
#[derive(Debug, Clone)]
pub struct Edge(Rc<EdgeInner>);

#[derive(Debug)]
struct EdgeInner {
    source: Node,
    target: Node,
    attrs: RefCell<AttributeSet>,
    attached: Cell<bool>,
}

#[derive(Debug, Clone)]
pub struct EdgeBuilder {
    source: Node,
    target: Node,
    styles: Vec<EdgeStyle>,
    attrs: AttributeSet,
}

impl EdgeBuilder {
    pub fn style(mut self, style: EdgeStyle) -> Self {
        self.styles.push(style);
        self
    }

    pub fn styles(mut self, styles: impl IntoIterator<Item = EdgeStyle>) -> Self {
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

    /// Resolves attributes and registers the edge.
    ///
    /// When the owning container already has an edge between the same two
    /// names, the new edge is returned but not registered.
    pub fn build(self) -> Edge {
        let attrs = resolve_edge(&self.styles, &self.attrs);
        let edge = Edge(Rc::new(EdgeInner {
            source: self.source,
            target: self.target,
            attrs: RefCell::new(attrs),
            attached: Cell::new(false),
        }));
        edge.0.attached.set(graph::attach_edge(&edge));
        edge
    }
}

impl Edge {
    pub fn builder(source: &Node, target: &Node) -> EdgeBuilder {
        EdgeBuilder {
            source: source.clone(),
            target: target.clone(),
            styles: Vec::new(),
            attrs: AttributeSet::new(),
        }
    }

    pub fn new(source: &Node, target: &Node) -> Edge {
        Self::builder(source, target).build()
    }

    pub fn source(&self) -> &Node {
        &self.0.source
    }

    pub fn target(&self) -> &Node {
        &self.0.target
    }

    /// The (source name, target name) pair used for deduplication.
    pub fn key(&self) -> (String, String) {
        (self.0.source.name().to_string(), self.0.target.name().to_string())
    }

    pub fn attrs(&self) -> AttributeSet {
        self.0.attrs.borrow().clone()
    }

    pub fn attr(&self, key: &str) -> Option<AttrValue> {
        self.0.attrs.borrow().get(key).cloned()
    }

    pub fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> &Self {
        self.0.attrs.borrow_mut().insert(key, value);
        self
    }

    pub fn apply(&self, style: &EdgeStyle) -> &Self {
        self.update(style.attrs())
    }

    pub fn update(&self, attrs: &AttributeSet) -> &Self {
        self.0.attrs.borrow_mut().merge(attrs);
        self
    }
}

/// The edges produced by one `>>` expression.
///
/// Further connections start from `tail`, the target of the most recent edge.
#[derive(Debug, Clone)]
pub struct EdgeChain {
    tail: Node,
    edges: Vec<Edge>,
}

impl EdgeChain {
    pub(crate) fn from_source(source: &Node) -> Self {
        Self {
            tail: source.clone(),
            edges: Vec::new(),
        }
    }

    pub fn then(mut self, target: &Node) -> Self {
        self.edges.push(Edge::new(&self.tail, target));
        self.tail = target.clone();
        self
    }

    /// Fans out from the current tail; the last target becomes the new tail.
    pub fn then_all(mut self, targets: &[Node]) -> Self {
        for target in targets {
            self.edges.push(Edge::new(&self.tail, target));
        }
        if let Some(last) = targets.last() {
            self.tail = last.clone();
        }
        self
    }

    pub fn tail(&self) -> &Node {
        &self.tail
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn set(self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let value = value.into();
        let key = key.into();
        for edge in &self.edges {
            edge.set(key.clone(), value.clone());
        }
        self
    }

    pub fn apply(self, style: &EdgeStyle) -> Self {
        self.update(style.attrs())
    }

    pub fn update(self, attrs: &AttributeSet) -> Self {
        for edge in &self.edges {
            edge.update(attrs);
        }
        self
    }
}

impl IntoIterator for EdgeChain {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl Shr<&Node> for EdgeChain {
    type Output = EdgeChain;

    fn shr(self, target: &Node) -> EdgeChain {
        self.then(target)
    }
}

impl Shr<&[Node]> for EdgeChain {
    type Output = EdgeChain;

    fn shr(self, targets: &[Node]) -> EdgeChain {
        self.then_all(targets)
    }
}

impl<const N: usize> Shr<&[Node; N]> for EdgeChain {
    type Output = EdgeChain;

    fn shr(self, targets: &[Node; N]) -> EdgeChain {
        self.then_all(targets)
    }
}

impl BitOr<&EdgeStyle> for EdgeChain {
    type Output = EdgeChain;

    fn bitor(self, style: &EdgeStyle) -> EdgeChain {
        self.apply(style)
    }
}

impl BitOr<EdgeStyle> for EdgeChain {
    type Output = EdgeChain;

    fn bitor(self, style: EdgeStyle) -> EdgeChain {
        self.apply(&style)
    }
}

impl BitOr<&AttributeSet> for EdgeChain {
    type Output = EdgeChain;

    fn bitor(self, attrs: &AttributeSet) -> EdgeChain {
        self.update(attrs)
    }
}

impl BitOr<AttributeSet> for EdgeChain {
    type Output = EdgeChain;

    fn bitor(self, attrs: AttributeSet) -> EdgeChain {
        self.update(&attrs)
    }
}
