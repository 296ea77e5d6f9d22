use crate::constants::*;
use crate::style::{EdgeStyle, GraphStyle, NodeStyle};

/// A named bundle of default graph, node, and edge styles.
///
/// Themes sit underneath every other attribute source: scoped styles,
/// explicit styles, and direct attributes all override them.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub graph: GraphStyle,
    pub node: NodeStyle,
    pub edge: EdgeStyle,
}

const BUILTIN: [&str; 7] = [
    "default",
    "dark",
    "pastel",
    "blueprint",
    "forest",
    "ocean",
    "minimal",
];

/// Names of the builtin themes, in registration order.
pub fn names() -> &'static [&'static str] {
    &BUILTIN
}

impl Theme {
    pub fn new(
        name: impl Into<String>,
        graph: GraphStyle,
        node: NodeStyle,
        edge: EdgeStyle,
    ) -> Self {
        Self {
            name: name.into(),
            graph,
            node,
            edge,
        }
    }

    /// Looks up a builtin theme.
    pub fn by_name(name: &str) -> Option<Theme> {
        let theme = match name {
            "default" => default_theme(),
            "dark" => dark(),
            "pastel" => pastel(),
            "blueprint" => blueprint(),
            "forest" => forest(),
            "ocean" => ocean(),
            "minimal" => minimal(),
            _ => return None,
        };
        Some(theme)
    }
}

fn filled_rounded() -> String {
    format!("{FILLED},{ROUNDED}")
}

pub fn default_theme() -> Theme {
    Theme::new(
        "default",
        GraphStyle::new().with("bgcolor", WHITE).with("fontname", HELVETICA),
        NodeStyle::new()
            .with("shape", BOX)
            .with("style", filled_rounded())
            .with("fillcolor", LIGHTBLUE)
            .with("fontname", HELVETICA)
            .with("penwidth", 1),
        EdgeStyle::new().with("color", GRAY).with("fontname", HELVETICA),
    )
}

pub fn dark() -> Theme {
    Theme::new(
        "dark",
        GraphStyle::new()
            .with("bgcolor", "#2d2d2d")
            .with("fontname", HELVETICA)
            .with("fontcolor", WHITE),
        NodeStyle::new()
            .with("shape", BOX)
            .with("style", filled_rounded())
            .with("fillcolor", "#4d4d4d")
            .with("fontcolor", WHITE)
            .with("color", LIGHTGRAY)
            .with("fontname", HELVETICA),
        EdgeStyle::new()
            .with("color", LIGHTGRAY)
            .with("fontcolor", LIGHTGRAY)
            .with("fontname", HELVETICA),
    )
}

pub fn pastel() -> Theme {
    Theme::new(
        "pastel",
        GraphStyle::new()
            .with("bgcolor", "#fdfbf7")
            .with("fontname", "Comic Sans MS"),
        NodeStyle::new()
            .with("shape", ELLIPSE)
            .with("style", FILLED)
            .with("fillcolor", "#ffb7b2")
            .with("color", "#ffb7b2")
            .with("fontname", "Comic Sans MS"),
        EdgeStyle::new()
            .with("color", "#aac7d8")
            .with("penwidth", 2)
            .with("fontname", "Comic Sans MS"),
    )
}

pub fn blueprint() -> Theme {
    Theme::new(
        "blueprint",
        GraphStyle::new()
            .with("bgcolor", "#1a237e")
            .with("fontcolor", WHITE)
            .with("fontname", COURIER),
        NodeStyle::new()
            .with("shape", BOX)
            .with("style", FILLED)
            .with("fillcolor", "#1a237e")
            .with("color", WHITE)
            .with("fontcolor", WHITE)
            .with("penwidth", 2)
            .with("fontname", COURIER),
        EdgeStyle::new()
            .with("color", WHITE)
            .with("style", DASHED)
            .with("fontcolor", WHITE)
            .with("fontname", COURIER),
    )
}

pub fn forest() -> Theme {
    Theme::new(
        "forest",
        GraphStyle::new().with("bgcolor", "#e8f5e9").with("fontname", TIMES),
        NodeStyle::new()
            .with("shape", CIRCLE)
            .with("style", FILLED)
            .with("fillcolor", "#a5d6a7")
            .with("color", "#2e7d32")
            .with("fontcolor", "#1b5e20")
            .with("fontname", TIMES),
        EdgeStyle::new()
            .with("color", "#5d4037")
            .with("penwidth", 1.5)
            .with("fontname", TIMES),
    )
}

pub fn ocean() -> Theme {
    Theme::new(
        "ocean",
        GraphStyle::new().with("bgcolor", "#e0f7fa").with("fontname", HELVETICA),
        NodeStyle::new()
            .with("shape", BOX)
            .with("style", filled_rounded())
            .with("fillcolor", "#4dd0e1")
            .with("color", "#006064")
            .with("fontcolor", "#006064")
            .with("fontname", HELVETICA),
        EdgeStyle::new()
            .with("color", "#0277bd")
            .with("fontcolor", "#0277bd")
            .with("fontname", HELVETICA),
    )
}

pub fn minimal() -> Theme {
    Theme::new(
        "minimal",
        GraphStyle::new().with("bgcolor", WHITE).with("fontname", HELVETICA),
        NodeStyle::new()
            .with("shape", BOX)
            .with("style", SOLID)
            .with("color", BLACK)
            .with("fontcolor", BLACK)
            .with("penwidth", 1)
            .with("fontname", HELVETICA),
        EdgeStyle::new()
            .with("color", BLACK)
            .with("fontcolor", BLACK)
            .with("fontname", HELVETICA),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::AttrValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_builtin_name_resolves() {
        for name in names() {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(theme.name, *name);
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn dark_values() {
        let theme = dark();
        assert_eq!(theme.node.get("fillcolor"), Some(&AttrValue::from("#4d4d4d")));
        assert_eq!(theme.graph.get("bgcolor"), Some(&AttrValue::from("#2d2d2d")));
        assert_eq!(theme.edge.get("color"), Some(&AttrValue::from("lightgray")));
    }

    #[test]
    fn default_node_style_is_filled_and_rounded() {
        let theme = default_theme();
        assert_eq!(theme.node.get("style"), Some(&AttrValue::from("filled,rounded")));
    }
}
