use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::attrs::AttributeSet;
use crate::backend;
use crate::context::{self, ScopeGuard};
use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::renderer;
use crate::resolve::resolve;
use crate::style::GraphStyle;
use crate::theme::Theme;
use crate::value::AttrValue;

pub const CLUSTER_PREFIX: &str = "cluster_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphType {
    #[default]
    Digraph,
    Graph,
}

impl GraphType {
    pub fn keyword(self) -> &'static str {
        match self {
            GraphType::Digraph => "digraph",
            GraphType::Graph => "graph",
        }
    }

    pub fn connector(self) -> &'static str {
        match self {
            GraphType::Digraph => "->",
            GraphType::Graph => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    #[default]
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

impl RankDir {
    pub fn as_str(self) -> &'static str {
        match self {
            RankDir::TopBottom => "TB",
            RankDir::BottomTop => "BT",
            RankDir::LeftRight => "LR",
            RankDir::RightLeft => "RL",
        }
    }

    pub fn parse(s: &str) -> Option<RankDir> {
        match s.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Some(RankDir::TopBottom),
            "BT" => Some(RankDir::BottomTop),
            "LR" => Some(RankDir::LeftRight),
            "RL" => Some(RankDir::RightLeft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum ThemeChoice {
    Named(String),
    Custom(Theme),
}

impl ThemeChoice {
    fn resolve(self) -> Option<Theme> {
        match self {
            ThemeChoice::Custom(theme) => Some(theme),
            ThemeChoice::Named(name) => {
                let theme = Theme::by_name(&name);
                if theme.is_none() {
                    tracing::warn!(theme = %name, "unknown theme ignored");
                }
                theme
            }
        }
    }
}

/// Guard returned by [`Graph::enter`] and [`Subgraph::enter`].
///
/// While alive, the container receives newly constructed entities and its
/// theme (if any) is the active theme. Scopes close in reverse order of
/// opening across graphs and subgraphs alike; dropping a graph's scope while
/// a subgraph entered inside it is still open panics.
#[must_use = "the container is closed as soon as the scope is dropped"]
#[derive(Debug)]
pub struct ContainerScope {
    _container: ScopeGuard,
    _theme: Option<ScopeGuard>,
}

impl ContainerScope {
    fn open(theme: Option<&Theme>, container: impl FnOnce() -> ScopeGuard) -> Self {
        let theme = theme.map(|t| context::enter_theme(t.clone()));
        Self {
            _container: container(),
            _theme: theme,
        }
    }
}

/// The document root.
#[derive(Debug, Clone)]
pub struct Graph(Rc<RefCell<GraphInner>>);

#[derive(Debug)]
struct GraphInner {
    name: String,
    graph_type: GraphType,
    attrs: AttributeSet,
    theme: Option<Theme>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    subgraphs: Vec<Subgraph>,
    node_names: HashSet<String>,
    edge_keys: HashSet<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct GraphBuilder {
    name: String,
    graph_type: GraphType,
    theme: Option<ThemeChoice>,
    styles: Vec<GraphStyle>,
    rankdir: Option<RankDir>,
    attrs: AttributeSet,
}

impl GraphBuilder {
    pub fn graph_type(mut self, graph_type: GraphType) -> Self {
        self.graph_type = graph_type;
        self
    }

    pub fn undirected(self) -> Self {
        self.graph_type(GraphType::Graph)
    }

    /// Uses a builtin theme; unknown names are ignored with a warning.
    pub fn theme(mut self, name: impl Into<String>) -> Self {
        self.theme = Some(ThemeChoice::Named(name.into()));
        self
    }

    pub fn custom_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(ThemeChoice::Custom(theme));
        self
    }

    pub fn style(mut self, style: GraphStyle) -> Self {
        self.styles.push(style);
        self
    }

    pub fn styles(mut self, styles: impl IntoIterator<Item = GraphStyle>) -> Self {
        self.styles.extend(styles);
        self
    }

    pub fn rankdir(mut self, rankdir: RankDir) -> Self {
        self.rankdir = Some(rankdir);
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

    /// Resolves graph attributes: theme, explicit styles, `rankdir`, direct
    /// attributes. `rankdir` defaults to `TB` when nothing else sets it.
    pub fn build(self) -> Graph {
        let theme = self
            .theme
            .and_then(ThemeChoice::resolve)
            .or_else(context::active_theme);

        let mut attrs = resolve(
            theme.as_ref().map(|t| &t.graph),
            &[],
            &self.styles,
            &AttributeSet::new(),
        );
        match self.rankdir {
            Some(rankdir) => {
                attrs.insert("rankdir", rankdir.as_str());
            }
            None if !attrs.contains_key("rankdir") => {
                attrs.insert("rankdir", RankDir::default().as_str());
            }
            None => {}
        }
        attrs.merge(&self.attrs);

        Graph(Rc::new(RefCell::new(GraphInner {
            name: self.name,
            graph_type: self.graph_type,
            attrs,
            theme,
            nodes: Vec::new(),
            edges: Vec::new(),
            subgraphs: Vec::new(),
            node_names: HashSet::new(),
            edge_keys: HashSet::new(),
        })))
    }
}

impl Graph {
    pub fn builder(name: impl Into<String>) -> GraphBuilder {
        GraphBuilder {
            name: name.into(),
            graph_type: GraphType::default(),
            theme: None,
            styles: Vec::new(),
            rankdir: None,
            attrs: AttributeSet::new(),
        }
    }

    pub fn new(name: impl Into<String>) -> Graph {
        Self::builder(name).build()
    }

    /// Makes this graph current until the returned scope drops.
    ///
    /// Only one graph may be current per thread.
    pub fn enter(&self) -> Result<ContainerScope> {
        if let Some(outer) = context::current_graph() {
            return Err(Error::NestedGraph {
                outer: outer.name(),
                inner: self.name(),
            });
        }
        let theme = self.0.borrow().theme.clone();
        let graph = self.clone();
        Ok(ContainerScope::open(theme.as_ref(), || context::enter_graph(graph)))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn graph_type(&self) -> GraphType {
        self.0.borrow().graph_type
    }

    pub fn theme(&self) -> Option<Theme> {
        self.0.borrow().theme.clone()
    }

    pub fn attrs(&self) -> AttributeSet {
        self.0.borrow().attrs.clone()
    }

    pub fn attr(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow().attrs.get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> &Self {
        self.0.borrow_mut().attrs.insert(key, value);
        self
    }

    /// Top-level nodes, in declaration order.
    pub fn nodes(&self) -> Vec<Node> {
        self.0.borrow().nodes.clone()
    }

    /// Top-level edges, in declaration order.
    pub fn edges(&self) -> Vec<Edge> {
        self.0.borrow().edges.clone()
    }

    /// Direct child subgraphs.
    pub fn subgraphs(&self) -> Vec<Subgraph> {
        self.0.borrow().subgraphs.clone()
    }

    /// Finds a node anywhere in the tree.
    pub fn node(&self, name: &str) -> Option<Node> {
        let inner = self.0.borrow();
        inner
            .nodes
            .iter()
            .find(|n| n.name() == name)
            .cloned()
            .or_else(|| inner.subgraphs.iter().find_map(|sg| sg.find_node(name)))
    }

    pub fn to_dot(&self) -> String {
        renderer::render_graph(self)
    }

    /// Runs the layout program and returns the rendered bytes.
    pub fn render(&self, format: &str) -> Result<Vec<u8>> {
        backend::render(&self.to_dot(), format, backend::DEFAULT_ENGINE)
    }

    pub fn render_to_file(&self, path: &Path, format: &str) -> Result<()> {
        backend::render_to_file(&self.to_dot(), path, format, backend::DEFAULT_ENGINE)
    }

    pub(crate) fn with_contents<R>(&self, f: impl FnOnce(&[Subgraph], &[Node], &[Edge]) -> R) -> R {
        let inner = self.0.borrow();
        f(&inner.subgraphs, &inner.nodes, &inner.edges)
    }

    fn has_node_name(&self, name: &str) -> bool {
        self.0.borrow().node_names.contains(name)
    }

    fn claim_node_name(&self, name: &str) -> bool {
        self.0.borrow_mut().node_names.insert(name.to_string())
    }

    fn claim_edge(&self, key: (String, String)) -> bool {
        self.0.borrow_mut().edge_keys.insert(key)
    }
}

/// A named group of statements; clusters get a visible boundary.
#[derive(Debug, Clone)]
pub struct Subgraph(Rc<RefCell<SubgraphInner>>);

#[derive(Debug)]
struct SubgraphInner {
    name: String,
    cluster: bool,
    attrs: AttributeSet,
    theme: Option<Theme>,
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    subgraphs: Vec<Subgraph>,
}

#[derive(Debug, Clone)]
pub struct SubgraphBuilder {
    name: Option<String>,
    cluster: bool,
    theme: Option<ThemeChoice>,
    styles: Vec<GraphStyle>,
    attrs: AttributeSet,
}

impl SubgraphBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cluster(mut self, cluster: bool) -> Self {
        self.cluster = cluster;
        self
    }

    pub fn theme(mut self, name: impl Into<String>) -> Self {
        self.theme = Some(ThemeChoice::Named(name.into()));
        self
    }

    pub fn custom_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(ThemeChoice::Custom(theme));
        self
    }

    pub fn style(mut self, style: GraphStyle) -> Self {
        self.styles.push(style);
        self
    }

    pub fn label(self, label: impl Into<AttrValue>) -> Self {
        self.attr("label", label)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    pub fn attrs(mut self, attrs: &AttributeSet) -> Self {
        self.attrs.merge(attrs);
        self
    }

    /// Creates the subgraph and attaches it to the innermost open container.
    pub fn build(self) -> Subgraph {
        let name = normalize_name(self.name, self.cluster);
        let theme = self.theme.and_then(ThemeChoice::resolve);
        let attrs = resolve(None, &[], &self.styles, &self.attrs);
        let subgraph = Subgraph(Rc::new(RefCell::new(SubgraphInner {
            name,
            cluster: self.cluster,
            attrs,
            theme,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            subgraphs: Vec::new(),
        })));
        attach_subgraph(&subgraph);
        subgraph
    }
}

fn normalize_name(name: Option<String>, cluster: bool) -> String {
    let name = name.unwrap_or_else(|| format!("subgraph_{}", uuid::Uuid::new_v4().simple()));
    if cluster && !name.starts_with(CLUSTER_PREFIX) {
        format!("{CLUSTER_PREFIX}{name}")
    } else {
        name
    }
}

impl Subgraph {
    pub fn builder() -> SubgraphBuilder {
        SubgraphBuilder {
            name: None,
            cluster: true,
            theme: None,
            styles: Vec::new(),
            attrs: AttributeSet::new(),
        }
    }

    /// A cluster named `name` (prefixed with `cluster_` when missing).
    pub fn new(name: impl Into<String>) -> Subgraph {
        Self::builder().name(name).build()
    }

    /// Makes this subgraph the innermost open container until the scope drops.
    pub fn enter(&self) -> ContainerScope {
        let theme = self.0.borrow().theme.clone();
        let subgraph = self.clone();
        ContainerScope::open(theme.as_ref(), || context::enter_subgraph(subgraph))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn is_cluster(&self) -> bool {
        self.0.borrow().cluster
    }

    pub fn theme(&self) -> Option<Theme> {
        self.0.borrow().theme.clone()
    }

    pub fn attrs(&self) -> AttributeSet {
        self.0.borrow().attrs.clone()
    }

    pub fn attr(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow().attrs.get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> &Self {
        self.0.borrow_mut().attrs.insert(key, value);
        self
    }

    /// A direct child node by name.
    pub fn node(&self, name: &str) -> Option<Node> {
        self.0.borrow().nodes.get(name).cloned()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.0.borrow().nodes.values().cloned().collect()
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.0.borrow().edges.clone()
    }

    pub fn subgraphs(&self) -> Vec<Subgraph> {
        self.0.borrow().subgraphs.clone()
    }

    /// Finds a node in this subgraph or any nested one.
    pub fn find_node(&self, name: &str) -> Option<Node> {
        let inner = self.0.borrow();
        inner
            .nodes
            .get(name)
            .cloned()
            .or_else(|| inner.subgraphs.iter().find_map(|sg| sg.find_node(name)))
    }

    pub(crate) fn with_contents<R>(
        &self,
        f: impl FnOnce(&str, &AttributeSet, &[Node], &[Edge], &[Subgraph]) -> R,
    ) -> R {
        let inner = self.0.borrow();
        let nodes: Vec<Node> = inner.nodes.values().cloned().collect();
        f(&inner.name, &inner.attrs, &nodes, &inner.edges, &inner.subgraphs)
    }

    fn has_edge(&self, key: &(String, String)) -> bool {
        self.0.borrow().edges.iter().any(|e| &e.key() == key)
    }
}

/// Attaches a node to the innermost open subgraph, else the current graph.
///
/// Returns `Ok(false)` when no container is open.
/// Whether [`attach_node`] would reject `name` in the current scope.
pub(crate) fn node_name_taken(name: &str) -> bool {
    match (context::current_graph(), context::current_subgraph()) {
        (Some(graph), _) => graph.has_node_name(name),
        (None, Some(subgraph)) => subgraph.find_node(name).is_some(),
        (None, None) => false,
    }
}

pub(crate) fn attach_node(node: &Node) -> Result<bool> {
    let graph = context::current_graph();
    let subgraph = context::current_subgraph();
    let name = node.name();

    let unique = match (&graph, &subgraph) {
        (Some(graph), _) => graph.claim_node_name(name),
        (None, Some(subgraph)) => subgraph.find_node(name).is_none(),
        (None, None) => {
            debug!(node = name, "no open graph; node left unattached");
            return Ok(false);
        }
    };
    if !unique {
        return Err(Error::DuplicateNode {
            name: name.to_string(),
        });
    }

    match (subgraph, graph) {
        (Some(subgraph), _) => {
            subgraph
                .0
                .borrow_mut()
                .nodes
                .insert(name.to_string(), node.clone());
        }
        (None, Some(graph)) => graph.0.borrow_mut().nodes.push(node.clone()),
        (None, None) => {}
    }
    Ok(true)
}

/// Attaches an edge unless one with the same endpoints already exists.
pub(crate) fn attach_edge(edge: &Edge) -> bool {
    let graph = context::current_graph();
    let subgraph = context::current_subgraph();
    let key = edge.key();

    let fresh = match (&graph, &subgraph) {
        (Some(graph), _) => graph.claim_edge(key.clone()),
        (None, Some(subgraph)) => !subgraph.has_edge(&key),
        (None, None) => {
            debug!(source = %key.0, target = %key.1, "no open graph; edge left unattached");
            return false;
        }
    };
    if !fresh {
        debug!(source = %key.0, target = %key.1, "duplicate edge ignored");
        return false;
    }

    match (subgraph, graph) {
        (Some(subgraph), _) => subgraph.0.borrow_mut().edges.push(edge.clone()),
        (None, Some(graph)) => graph.0.borrow_mut().edges.push(edge.clone()),
        (None, None) => {}
    }
    true
}

fn attach_subgraph(subgraph: &Subgraph) {
    match (context::current_subgraph(), context::current_graph()) {
        (Some(parent), _) => parent.0.borrow_mut().subgraphs.push(subgraph.clone()),
        (None, Some(graph)) => graph.0.borrow_mut().subgraphs.push(subgraph.clone()),
        (None, None) => {
            debug!(subgraph = %subgraph.name(), "no open graph; subgraph left unattached")
        }
    }
}
