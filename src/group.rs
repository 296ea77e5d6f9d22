//! Declarative node groups.
//!
//! A [`NodeGroup`] is a reusable template: an ordered list of named node
//! factories, optionally wrapped in a cluster. Building it replays every
//! factory against a fresh [`NodeBuilder`] in the current graph.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::graph::{self, ContainerScope, Subgraph};
use crate::node::{Node, NodeBuilder};
use crate::value::AttrValue;

type NodeFactory = Rc<dyn Fn(NodeBuilder) -> NodeBuilder>;

#[derive(Clone, Default)]
pub struct NodeGroup {
    factories: Vec<(String, NodeFactory)>,
    subgraph: Option<String>,
    subgraph_attrs: Vec<(String, AttrValue)>,
}

impl fmt::Debug for NodeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeGroup")
            .field("nodes", &self.names())
            .field("subgraph", &self.subgraph)
            .finish()
    }
}

const DEFAULT_GROUP_NAME: &str = "cluster_group";

impl NodeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for the node `name`. The builder passed to
    /// `factory` is already named.
    pub fn node(
        mut self,
        name: impl Into<String>,
        factory: impl Fn(NodeBuilder) -> NodeBuilder + 'static,
    ) -> Self {
        self.factories.push((name.into(), Rc::new(factory)));
        self
    }

    /// Registers a node built from the default builder.
    pub fn plain(self, name: impl Into<String>) -> Self {
        self.node(name, |b| b)
    }

    /// Wraps the built nodes in a cluster named after `label`, or
    /// `cluster_group` when `None`.
    pub fn in_subgraph(mut self, label: Option<&str>) -> Self {
        self.subgraph = Some(label.unwrap_or(DEFAULT_GROUP_NAME).to_string());
        self
    }

    pub fn subgraph_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.subgraph_attrs.push((key.into(), value.into()));
        self
    }

    /// Prepends `base`'s factories, so base nodes are created first.
    pub fn extend(mut self, base: &NodeGroup) -> Self {
        let mut factories = base.factories.clone();
        factories.append(&mut self.factories);
        self.factories = factories;
        if self.subgraph.is_none() {
            self.subgraph = base.subgraph.clone();
        }
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Creates every node, in declaration order. Names are checked up
    /// front, so a rejected build leaves the current graph untouched.
    pub fn build(&self) -> Result<Group> {
        let mut seen = HashSet::new();
        for (name, _) in &self.factories {
            if !seen.insert(name.as_str()) || graph::node_name_taken(name) {
                return Err(Error::DuplicateNode { name: name.clone() });
            }
        }

        let subgraph = self.subgraph.as_ref().map(|name| {
            let builder = self
                .subgraph_attrs
                .iter()
                .fold(Subgraph::builder().name(name), |b, (k, v)| b.attr(k, v.clone()));
            builder.build()
        });

        let _scope = subgraph.as_ref().map(Subgraph::enter);
        let mut nodes = IndexMap::new();
        for (name, factory) in &self.factories {
            let node = factory(Node::builder().name(name)).build()?;
            nodes.insert(name.clone(), node);
        }
        Ok(Group { nodes, subgraph })
    }
}

/// The nodes created by one [`NodeGroup::build`].
#[derive(Debug, Clone)]
pub struct Group {
    nodes: IndexMap<String, Node>,
    subgraph: Option<Subgraph>,
}

impl Group {
    /// A node by its group key, falling back to the wrapping subgraph.
    pub fn get(&self, name: &str) -> Option<Node> {
        self.nodes
            .get(name)
            .cloned()
            .or_else(|| self.subgraph.as_ref().and_then(|sg| sg.node(name)))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn subgraph(&self) -> Option<&Subgraph> {
        self.subgraph.as_ref()
    }

    /// Enters the wrapping subgraph so further nodes join it.
    pub fn enter(&self) -> Option<ContainerScope> {
        self.subgraph.as_ref().map(Subgraph::enter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::presets;
    use pretty_assertions::assert_eq;

    fn service_group() -> NodeGroup {
        NodeGroup::new()
            .node("api", |b| b.label("API").style(presets::box_node()))
            .node("db", |b| b.style(presets::circle_node()))
    }

    #[test]
    fn builds_nodes_in_order_in_current_graph() {
        let g = Graph::new("G");
        let _scope = g.enter().unwrap();
        let group = service_group().build().unwrap();
        let names: Vec<&str> = group.nodes().map(Node::name).collect();
        assert_eq!(names, vec!["api", "db"]);
        assert_eq!(g.nodes().len(), 2);
        let label = group.get("api").and_then(|n| n.attr("label"));
        assert_eq!(label, Some(AttrValue::from("API")));
    }

    #[test]
    fn subgraph_wrapping_registers_cluster() {
        let g = Graph::new("G");
        let _scope = g.enter().unwrap();
        let group = service_group().in_subgraph(Some("services")).build().unwrap();
        let sg = group.subgraph().unwrap();
        assert_eq!(sg.name(), "cluster_services");
        assert_eq!(sg.nodes().len(), 2);
        assert!(g.nodes().is_empty());
    }

    #[test]
    fn default_subgraph_name() {
        let group = NodeGroup::new().plain("a").in_subgraph(None).build().unwrap();
        assert_eq!(group.subgraph().map(Subgraph::name), Some("cluster_group".to_string()));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = NodeGroup::new().plain("a").plain("a").build().unwrap_err();
        assert!(matches!(err, Error::DuplicateNode { ref name } if name == "a"), "got: {err}");
    }

    #[test]
    fn clash_with_existing_node_leaves_graph_unchanged() {
        let g = Graph::new("G");
        let _scope = g.enter().unwrap();
        Node::new("db").unwrap();
        let before = g.to_dot();

        let err = NodeGroup::new()
            .plain("api")
            .plain("db")
            .in_subgraph(Some("svc"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateNode { ref name } if name == "db"), "got: {err}");
        assert_eq!(g.to_dot(), before);
        assert!(g.subgraphs().is_empty());
        assert!(g.node("api").is_none());

        let group = NodeGroup::new().plain("api").in_subgraph(Some("svc")).build().unwrap();
        assert!(group.get("api").is_some(), "failed build claimed no names");
    }

    #[test]
    fn extend_runs_base_first() {
        let base = NodeGroup::new().plain("base");
        let child = NodeGroup::new().plain("child").extend(&base);
        assert_eq!(child.names(), vec!["base", "child"]);
    }

    #[test]
    fn extended_duplicate_rejected() {
        let base = NodeGroup::new().plain("a");
        let err = NodeGroup::new().plain("a").extend(&base).build().unwrap_err();
        assert!(matches!(err, Error::DuplicateNode { .. }));
    }

    #[test]
    fn enter_group_subgraph_adds_more_nodes() {
        let g = Graph::new("G");
        let _scope = g.enter().unwrap();
        let group = service_group().in_subgraph(Some("svc")).build().unwrap();
        {
            let _inside = group.enter();
            Node::new("cache").unwrap();
        }
        assert!(group.get("cache").is_some());
    }
}
