//! Resource naming
//!
//! Tag `T` addresses three logical resources: `T.markup`, `T.style` and
//! `T.behavior`. The layout decides the concrete file extension of each.

use serde::Deserialize;

/// One part of a component definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Markup,
    Style,
    Behavior,
}

impl ResourceKind {
    /// All kinds, in fetch order
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Markup, ResourceKind::Style, ResourceKind::Behavior];

    /// Logical name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Markup => "markup",
            ResourceKind::Style => "style",
            ResourceKind::Behavior => "behavior",
        }
    }
}

/// File extensions per resource kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceLayout {
    pub markup: String,
    pub style: String,
    pub behavior: String,
}

impl ResourceLayout {
    /// Extension for a kind
    pub fn extension(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Markup => &self.markup,
            ResourceKind::Style => &self.style,
            ResourceKind::Behavior => &self.behavior,
        }
    }
}

impl Default for ResourceLayout {
    fn default() -> Self {
        Self {
            markup: "html".to_string(),
            style: "css".to_string(),
            behavior: "js".to_string(),
        }
    }
}

/// Address of one component resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    pub tag: String,
    pub kind: ResourceKind,
}

impl ResourcePath {
    pub fn new(tag: &str, kind: ResourceKind) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            kind,
        }
    }

    /// File name under the given layout, e.g. `navbar.html`
    pub fn file_name(&self, layout: &ResourceLayout) -> String {
        format!("{}.{}", self.tag, layout.extension(self.kind))
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.tag, self.kind.as_str())
    }
}
