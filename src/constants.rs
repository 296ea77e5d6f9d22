//! Common attribute values of the DOT language.

// Shapes
pub const RECT: &str = "rect";
pub const BOX: &str = "box";
pub const CIRCLE: &str = "circle";
pub const ELLIPSE: &str = "ellipse";
pub const DIAMOND: &str = "diamond";
pub const PLAINTEXT: &str = "plaintext";
pub const POINT: &str = "point";
pub const RECORD: &str = "record";
pub const POLYGON: &str = "polygon";
pub const TRIANGLE: &str = "triangle";
pub const SQUARE: &str = "square";
pub const STAR: &str = "star";
pub const PARALLELOGRAM: &str = "parallelogram";

// Styles
pub const FILLED: &str = "filled";
pub const SOLID: &str = "solid";
pub const DASHED: &str = "dashed";
pub const DOTTED: &str = "dotted";
pub const BOLD: &str = "bold";
pub const ROUNDED: &str = "rounded";
pub const INVISIBLE: &str = "invis";

// Colors
pub const RED: &str = "red";
pub const BLUE: &str = "blue";
pub const GREEN: &str = "green";
pub const BLACK: &str = "black";
pub const WHITE: &str = "white";
pub const GRAY: &str = "gray";
pub const YELLOW: &str = "yellow";
pub const ORANGE: &str = "orange";
pub const PURPLE: &str = "purple";
pub const CYAN: &str = "cyan";
pub const MAGENTA: &str = "magenta";
pub const LIGHTBLUE: &str = "lightblue";
pub const LIGHTGRAY: &str = "lightgray";
pub const LIGHTYELLOW: &str = "lightyellow";
pub const LIGHTGREEN: &str = "lightgreen";
pub const DARKGRAY: &str = "darkgray";

// Arrows
pub const NORMAL: &str = "normal";
pub const NONE: &str = "none";
pub const VEE: &str = "vee";
pub const EMPTY: &str = "empty";
pub const DIAMOND_ARROW: &str = "diamond";
pub const ODIAMOND_ARROW: &str = "odiamond";
pub const DOT_ARROW: &str = "dot";
pub const OPEN: &str = "open";
pub const BOX_ARROW: &str = "box";

// Fonts
pub const HELVETICA: &str = "Helvetica";
pub const TIMES: &str = "Times-Roman";
pub const COURIER: &str = "Courier";
