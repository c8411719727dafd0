//! The `<esi:include/>` tag.

use std::fmt;

/// An ESI include directive pointing the surrogate at a fragment URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsiInclude {
    src: String,
}

impl EsiInclude {
    /// Create an include for the given source URL.
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }

    /// The unescaped source URL.
    pub fn src(&self) -> &str {
        &self.src
    }
}

impl fmt::Display for EsiInclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<esi:include src=\"{}\"/>", escape_attribute(&self.src))
    }
}

/// Escape a value for use inside a double-quoted XML attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
