//! Standard Tag Table
//!
//! Any element whose name is not listed here is treated as a custom
//! component tag by the loader.

/// Placeholder element marking where an element's prior content goes
pub const SURROUND_TAG: &str = "innerhtml";

/// Built-in loader tags that are never fetched as components
const LOADER_TAGS: &[&str] = &["if", "each", SURROUND_TAG];

/// Standard HTML element names (lowercase)
pub const STANDARD_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "applet", "area", "article", "aside", "audio",
    "b", "base", "basefont", "bdi", "bdo", "big", "blockquote", "body", "br", "button",
    "canvas", "caption", "center", "cite", "code", "col", "colgroup",
    "data", "datalist", "dd", "del", "details", "dfn", "dialog", "dir", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "font", "footer", "form", "frame", "frameset",
    "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html",
    "i", "iframe", "img", "input", "ins", "isindex", "kbd", "keygen",
    "label", "legend", "li", "link", "listing", "main", "map", "mark", "marquee", "math",
    "menu", "meta", "meter", "nav", "nextid", "nobr", "noframes", "noscript",
    "object", "ol", "optgroup", "option", "output", "p", "param", "picture", "plaintext", "pre", "progress",
    "q", "rp", "rt", "ruby", "s", "samp", "script", "section", "select", "slot", "small", "source",
    "span", "strike", "strong", "style", "sub", "summary", "sup", "svg",
    "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title",
    "tr", "track", "tt", "u", "ul", "var", "video", "wbr", "x-ms-webview", "xmp",
];

/// Roots of SVG and MathML content; nothing below them is a component
pub const FOREIGN_ROOTS: &[&str] = &["math", "svg"];

/// Check whether `name` opens a foreign-content subtree
pub fn is_foreign_root(name: &str) -> bool {
    FOREIGN_ROOTS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Check whether `name` is a standard (non-component) tag
pub fn is_standard_tag(name: &str) -> bool {
    STANDARD_TAGS
        .iter()
        .chain(LOADER_TAGS.iter())
        .any(|tag| tag.eq_ignore_ascii_case(name))
}
