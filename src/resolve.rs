//! Attribute resolution.
//!
//! Precedence, lowest first: theme, scoped styles (push order), explicit
//! styles (argument order), direct attributes. Each layer overwrites whole
//! keys of the layers beneath it.

use crate::attrs::AttributeSet;
use crate::context;
use crate::style::{EdgeElement, Element, NodeElement, Style};

pub fn resolve<K: Element>(
    theme: Option<&Style<K>>,
    scoped: &[Style<K>],
    explicit: &[Style<K>],
    direct: &AttributeSet,
) -> AttributeSet {
    let mut resolved = AttributeSet::new();
    if let Some(theme) = theme {
        resolved.merge(theme.attrs());
    }
    for style in scoped.iter().chain(explicit) {
        resolved.merge(style.attrs());
    }
    resolved.merge(direct);
    resolved
}

/// Resolves node attributes against the ambient theme and node-style stack.
pub fn resolve_node(explicit: &[Style<NodeElement>], direct: &AttributeSet) -> AttributeSet {
    let theme = context::active_theme();
    resolve(
        theme.as_ref().map(|t| &t.node),
        &context::active_node_styles(),
        explicit,
        direct,
    )
}

/// Resolves edge attributes against the ambient theme and edge-style stack.
pub fn resolve_edge(explicit: &[Style<EdgeElement>], direct: &AttributeSet) -> AttributeSet {
    let theme = context::active_theme();
    resolve(
        theme.as_ref().map(|t| &t.edge),
        &context::active_edge_styles(),
        explicit,
        direct,
    )
}
