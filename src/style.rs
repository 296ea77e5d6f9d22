use std::fmt;
use std::marker::PhantomData;

use crate::attrs::AttributeSet;
use crate::context::{self, ScopeGuard};
use crate::value::AttrValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Graph,
    Node,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Graph => "graph",
            ElementKind::Node => "node",
            ElementKind::Edge => "edge",
        })
    }
}

/// Marker trait tying a [`Style`] to the element kind it may be applied to.
pub trait Element: fmt::Debug + Clone + Copy + PartialEq + Default + 'static {
    const KIND: ElementKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeElement;

impl Element for GraphElement {
    const KIND: ElementKind = ElementKind::Graph;
}

impl Element for NodeElement {
    const KIND: ElementKind = ElementKind::Node;
}

impl Element for EdgeElement {
    const KIND: ElementKind = ElementKind::Edge;
}

/// A reusable, immutable bundle of attributes for one element kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style<K: Element> {
    attrs: AttributeSet,
    _kind: PhantomData<K>,
}

pub type GraphStyle = Style<GraphElement>;
pub type NodeStyle = Style<NodeElement>;
pub type EdgeStyle = Style<EdgeElement>;

impl<K: Element> Style<K> {
    pub fn new() -> Self {
        Self::from_attrs(AttributeSet::new())
    }

    pub fn from_attrs(attrs: AttributeSet) -> Self {
        Self {
            attrs,
            _kind: PhantomData,
        }
    }

    /// Returns a copy with one more attribute set.
    pub fn with(self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::from_attrs(self.attrs.with(key, value))
    }

    pub fn kind(&self) -> ElementKind {
        K::KIND
    }

    pub fn attrs(&self) -> &AttributeSet {
        &self.attrs
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Combines two styles; keys from `other` win.
    pub fn merge(&self, other: &Style<K>) -> Style<K> {
        Self::from_attrs(self.attrs.clone().merged(&other.attrs))
    }
}

impl<K: Element> From<AttributeSet> for Style<K> {
    fn from(attrs: AttributeSet) -> Self {
        Self::from_attrs(attrs)
    }
}

impl NodeStyle {
    /// Pushes this style onto the ambient node-style stack until the guard drops.
    pub fn enter(&self) -> ScopeGuard {
        context::enter_node_style(self.clone())
    }
}

impl EdgeStyle {
    /// Pushes this style onto the ambient edge-style stack until the guard drops.
    pub fn enter(&self) -> ScopeGuard {
        context::enter_edge_style(self.clone())
    }
}
