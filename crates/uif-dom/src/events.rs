//! DOM Events
//!
//! Native events handed to component controllers by the host.

use crate::NodeId;

/// DOM event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Lowercase event type ("click", "input", ...)
    pub event_type: String,
    /// Element the event was fired on
    pub target: NodeId,
    /// Element whose binding is handling the event
    pub current_target: Option<NodeId>,
    /// Input value carried by input/change events
    pub value: Option<String>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
}

impl Event {
    /// Create an event of the given type
    pub fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_ascii_lowercase(),
            target,
            current_target: None,
            value: None,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
        }
    }

    /// Create an input-change event carrying the new value
    pub fn change(target: NodeId, value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            cancelable: false,
            ..Self::new("change", target)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_event_not_cancelable() {
        let mut event = Event::change(NodeId(3), "abc");
        event.prevent_default();
        assert!(!event.is_default_prevented());
        assert_eq!(event.value.as_deref(), Some("abc"));
        assert_eq!(event.event_type, "change");
    }

    #[test]
    fn test_event_type_normalized() {
        let mut event = Event::new("Click", NodeId(1));
        event.prevent_default();
        assert_eq!(event.event_type, "click");
        assert!(event.is_default_prevented());
    }
}
