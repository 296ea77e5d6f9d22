use std::fmt;

/// A single attribute value.
///
/// `Raw` carries the body of an HTML-like label. The serializer wraps it in
/// `<` `>` and never quotes or escapes it; every other variant is emitted as a
/// quoted, escaped string.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Raw(String),
}

impl AttrValue {
    pub fn raw(body: impl Into<String>) -> Self {
        AttrValue::Raw(body.into())
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, AttrValue::Raw(_))
    }

    /// The string payload of `Str` and `Raw` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) | AttrValue::Raw(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) | AttrValue::Raw(s) => f.write_str(s),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::Float(n) => write!(f, "{n}"),
            AttrValue::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        AttrValue::Str(s.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Float(n)
    }
}

impl From<f32> for AttrValue {
    fn from(n: f32) -> Self {
        AttrValue::Float(f64::from(n))
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttrValue {
                fn from(n: $t) -> Self {
                    AttrValue::Int(i64::from(n))
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_uses_textual_literals() {
        assert_eq!(AttrValue::from(true).to_string(), "true");
        assert_eq!(AttrValue::from(false).to_string(), "false");
        assert_eq!(AttrValue::from(3).to_string(), "3");
        assert_eq!(AttrValue::from(1.5).to_string(), "1.5");
        assert_eq!(AttrValue::from("red").to_string(), "red");
    }

    #[test]
    fn raw_is_marked_structurally() {
        assert!(AttrValue::raw("<B>x</B>").is_raw());
        assert!(!AttrValue::from("<<B>x</B>>").is_raw());
    }

    #[test]
    fn as_str_covers_string_variants() {
        assert_eq!(AttrValue::from("a").as_str(), Some("a"));
        assert_eq!(AttrValue::raw("b").as_str(), Some("b"));
        assert_eq!(AttrValue::from(1).as_str(), None);
    }
}
