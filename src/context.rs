//! Ambient construction state: style stacks, the active theme, and the open
//! graph and subgraph.
//!
//! State is thread-local, so independent threads build independent documents.
//! Every push returns a [`ScopeGuard`]; dropping the guard removes exactly the
//! entry it pushed, including during unwinding.

use std::cell::RefCell;
use std::marker::PhantomData;

use tracing::warn;

use crate::graph::{Graph, Subgraph};
use crate::style::{EdgeStyle, NodeStyle};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    NodeStyle,
    EdgeStyle,
    Theme,
    Graph,
    Subgraph,
}

#[derive(Default)]
struct ScopeState {
    next_id: u64,
    node_styles: Vec<(u64, NodeStyle)>,
    edge_styles: Vec<(u64, EdgeStyle)>,
    themes: Vec<(u64, Theme)>,
    graphs: Vec<(u64, Graph)>,
    subgraphs: Vec<(u64, Subgraph)>,
}

thread_local! {
    static SCOPE: RefCell<ScopeState> = RefCell::new(ScopeState::default());
}

enum Release {
    Popped,
    OutOfOrder,
    Missing,
}

fn release_from<T>(stack: &mut Vec<(u64, T)>, id: u64) -> Release {
    match stack.iter().rposition(|(entry, _)| *entry == id) {
        Some(pos) if pos + 1 == stack.len() => {
            stack.pop();
            Release::Popped
        }
        Some(pos) => {
            stack.remove(pos);
            Release::OutOfOrder
        }
        None => Release::Missing,
    }
}

/// Like [`release_from`], but a container closing while a container of the
/// other kind opened after it is still open counts as out of order.
fn release_container<T, U>(stack: &mut Vec<(u64, T)>, id: u64, other: &[(u64, U)]) -> Release {
    match release_from(stack, id) {
        Release::Popped if other.iter().any(|(entry, _)| *entry > id) => Release::OutOfOrder,
        released => released,
    }
}

impl ScopeState {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn release(&mut self, slot: Slot, id: u64) -> Release {
        match slot {
            Slot::NodeStyle => release_from(&mut self.node_styles, id),
            Slot::EdgeStyle => release_from(&mut self.edge_styles, id),
            Slot::Theme => release_from(&mut self.themes, id),
            Slot::Graph => release_container(&mut self.graphs, id, &self.subgraphs),
            Slot::Subgraph => release_container(&mut self.subgraphs, id, &self.graphs),
        }
    }
}

/// Keeps one ambient entry alive; dropping it restores the previous state.
///
/// Guards must be dropped in reverse order of creation. Dropping one out of
/// order panics. Graphs and subgraphs share one ordering, so closing a graph
/// while a subgraph entered inside it is still open panics too.
#[must_use = "the scope ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard {
    slot: Slot,
    id: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let released = SCOPE
            .try_with(|scope| scope.borrow_mut().release(self.slot, self.id))
            .unwrap_or(Release::Popped);
        match released {
            Release::Popped => {}
            Release::Missing => warn!(slot = ?self.slot, "scope entry already released"),
            Release::OutOfOrder => {
                if !std::thread::panicking() {
                    panic!("{:?} scope released out of order", self.slot);
                }
            }
        }
    }
}

fn push(slot: Slot, f: impl FnOnce(&mut ScopeState, u64)) -> ScopeGuard {
    let id = SCOPE.with(|scope| {
        let mut state = scope.borrow_mut();
        let id = state.allocate();
        f(&mut state, id);
        id
    });
    ScopeGuard {
        slot,
        id,
        _not_send: PhantomData,
    }
}

pub fn enter_node_style(style: NodeStyle) -> ScopeGuard {
    push(Slot::NodeStyle, |state, id| state.node_styles.push((id, style)))
}

pub fn enter_edge_style(style: EdgeStyle) -> ScopeGuard {
    push(Slot::EdgeStyle, |state, id| state.edge_styles.push((id, style)))
}

/// Makes `theme` the active theme until the guard drops, shadowing any outer one.
pub fn enter_theme(theme: Theme) -> ScopeGuard {
    push(Slot::Theme, |state, id| state.themes.push((id, theme)))
}

/// Like [`enter_theme`] for a builtin theme name.
///
/// Unknown names are logged and ignored.
pub fn enter_theme_named(name: &str) -> Option<ScopeGuard> {
    match Theme::by_name(name) {
        Some(theme) => Some(enter_theme(theme)),
        None => {
            warn!(theme = name, "unknown theme ignored");
            None
        }
    }
}

pub(crate) fn enter_graph(graph: Graph) -> ScopeGuard {
    push(Slot::Graph, |state, id| state.graphs.push((id, graph)))
}

pub(crate) fn enter_subgraph(subgraph: Subgraph) -> ScopeGuard {
    push(Slot::Subgraph, |state, id| state.subgraphs.push((id, subgraph)))
}

/// Node styles currently in scope, outermost first.
pub fn active_node_styles() -> Vec<NodeStyle> {
    SCOPE.with(|scope| scope.borrow().node_styles.iter().map(|(_, s)| s.clone()).collect())
}

/// Edge styles currently in scope, outermost first.
pub fn active_edge_styles() -> Vec<EdgeStyle> {
    SCOPE.with(|scope| scope.borrow().edge_styles.iter().map(|(_, s)| s.clone()).collect())
}

/// The innermost active theme.
pub fn active_theme() -> Option<Theme> {
    SCOPE.with(|scope| scope.borrow().themes.last().map(|(_, t)| t.clone()))
}

pub fn current_graph() -> Option<Graph> {
    SCOPE.with(|scope| scope.borrow().graphs.last().map(|(_, g)| g.clone()))
}

/// The innermost open subgraph.
pub fn current_subgraph() -> Option<Subgraph> {
    SCOPE.with(|scope| scope.borrow().subgraphs.last().map(|(_, s)| s.clone()))
}

/// True when nothing is in scope on this thread.
pub fn is_idle() -> bool {
    SCOPE.with(|scope| {
        let state = scope.borrow();
        state.node_styles.is_empty()
            && state.edge_styles.is_empty()
            && state.themes.is_empty()
            && state.graphs.is_empty()
            && state.subgraphs.is_empty()
    })
}
