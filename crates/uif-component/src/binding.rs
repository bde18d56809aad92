//! Event binding attributes
//!
//! An event handler placeholder becomes a native attribute such as
//! `onclick='uif.dispatch(this, event, "open", 1)'`. The value names the
//! member and its literal arguments as JSON; the host's dispatcher finds
//! the owning controller at event time.

use serde_json::Value;

const DISPATCH_CALL: &str = "uif.dispatch(this, event, ";

/// A parsed or generated event binding
#[derive(Debug, Clone, PartialEq)]
pub struct EventBinding {
    pub event_type: String,
    pub member: String,
    pub args: Vec<Value>,
}

impl EventBinding {
    pub fn new(event_type: &str, member: &str, args: Vec<Value>) -> Self {
        Self {
            event_type: event_type.to_ascii_lowercase(),
            member: member.to_string(),
            args,
        }
    }

    /// Attribute name, e.g. `onclick`
    pub fn attribute_name(&self) -> String {
        format!("on{}", self.event_type)
    }

    /// Dispatch expression carried in the attribute value
    pub fn expression(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(Value::String(self.member.clone()).to_string());
        parts.extend(self.args.iter().map(Value::to_string));
        format!("{}{})", DISPATCH_CALL, parts.join(", "))
    }

    /// Full attribute text, single-quoted and escaped
    pub fn to_attribute(&self) -> String {
        let mut out = format!("{}='", self.attribute_name());
        for c in self.expression().chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    /// Read a binding back from a decoded attribute value
    pub fn parse(event_type: &str, expression: &str) -> Option<Self> {
        let inner = expression.trim().strip_prefix(DISPATCH_CALL)?.strip_suffix(')')?;
        let mut values: Vec<Value> = serde_json::from_str(&format!("[{}]", inner)).ok()?;
        if values.is_empty() {
            return None;
        }
        let Value::String(member) = values.remove(0) else {
            return None;
        };
        Some(Self::new(event_type, &member, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expression() {
        let binding = EventBinding::new("click", "open", vec![json!(1), json!("a")]);
        assert_eq!(binding.expression(), r#"uif.dispatch(this, event, "open", 1, "a")"#);
        assert_eq!(binding.attribute_name(), "onclick");
    }

    #[test]
    fn test_attribute_escapes_quotes() {
        let binding = EventBinding::new("click", "say", vec![json!("it's & more")]);
        assert_eq!(
            binding.to_attribute(),
            r#"onclick='uif.dispatch(this, event, "say", "it&#39;s &amp; more")'"#
        );
    }

    #[test]
    fn test_parse_decoded_value() {
        let parsed = EventBinding::parse("click", r#"uif.dispatch(this, event, "say", "it's", [1, 2])"#).unwrap();
        assert_eq!(parsed.member, "say");
        assert_eq!(parsed.args, vec![json!("it's"), json!([1, 2])]);
    }

    #[test]
    fn test_parse_rejects_foreign_handlers() {
        assert!(EventBinding::parse("click", "alert(1)").is_none());
        assert!(EventBinding::parse("click", "uif.dispatch(this, event, 3)").is_none());
    }
}
