//! Member Classifier
//!
//! Maps each declared controller member to one of four substitution kinds.
//! Classification depends only on the member name and whether it is
//! invocable, so it is computed once per tag.

use crate::{Member, match_event_type};

const VALIDATOR_PREFIX: &str = "must";
const EVENT_PREFIX: &str = "on";

/// Substitution kind of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstitutionKind {
    Property,
    MethodInvocation,
    EventHandler,
    Validator,
}

/// Where in the markup a substitution applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `{key}`
    Placeholder(String),
    /// `{key(args)}`, argument list optional
    Call(String),
    /// `key` or `key(args)` (bare or braced) inside a start tag
    Attribute(String),
    /// `key` as a whitespace-bounded word inside a start tag, any case
    Word(String),
}

/// One classified controller member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub key: String,
    pub kind: SubstitutionKind,
    /// Bound event type, for event handlers only
    pub event_type: Option<&'static str>,
}

impl Substitution {
    /// Classify one member
    pub fn of(member: &Member) -> Self {
        let key = member.name.clone();
        if !member.invocable {
            return Self::new(key, SubstitutionKind::Property, None);
        }
        if key.starts_with(VALIDATOR_PREFIX) {
            return Self::new(key, SubstitutionKind::Validator, None);
        }
        let Some(rest) = key.strip_prefix(EVENT_PREFIX) else {
            return Self::new(key, SubstitutionKind::MethodInvocation, None);
        };
        match match_event_type(rest) {
            Some(event) => Self::new(key, SubstitutionKind::EventHandler, Some(event)),
            None => Self::new(key, SubstitutionKind::MethodInvocation, None),
        }
    }

    fn new(key: String, kind: SubstitutionKind, event_type: Option<&'static str>) -> Self {
        Self { key, kind, event_type }
    }

    /// Match pattern for this substitution
    pub fn pattern(&self) -> Pattern {
        let key = self.key.clone();
        match self.kind {
            SubstitutionKind::Property => Pattern::Placeholder(key),
            SubstitutionKind::MethodInvocation => Pattern::Call(key),
            SubstitutionKind::EventHandler => Pattern::Attribute(key),
            SubstitutionKind::Validator => Pattern::Word(key),
        }
    }
}

/// Classify declared members; a repeated name keeps its first declaration
pub fn classify(members: &[Member]) -> Vec<Substitution> {
    let mut out: Vec<Substitution> = Vec::with_capacity(members.len());
    for member in members {
        if out.iter().any(|s| s.key == member.name) {
            tracing::warn!("Member `{}` declared twice, keeping the first", member.name);
            continue;
        }
        out.push(Substitution::of(member));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property() {
        let s = Substitution::of(&Member::property("onClick"));
        assert_eq!(s.kind, SubstitutionKind::Property);
        assert_eq!(s.pattern(), Pattern::Placeholder("onClick".to_string()));
    }

    #[test]
    fn test_validator_before_event() {
        let s = Substitution::of(&Member::method("mustBeAnimal"));
        assert_eq!(s.kind, SubstitutionKind::Validator);
        assert_eq!(s.pattern(), Pattern::Word("mustBeAnimal".to_string()));
    }

    #[test]
    fn test_method() {
        let s = Substitution::of(&Member::method("greet"));
        assert_eq!(s.kind, SubstitutionKind::MethodInvocation);
        assert_eq!(s.pattern(), Pattern::Call("greet".to_string()));
    }

    #[test]
    fn test_event_handler_longest_prefix() {
        let s = Substitution::of(&Member::method("onClickSomething"));
        assert_eq!(s.kind, SubstitutionKind::EventHandler);
        assert_eq!(s.event_type, Some("click"));
        assert_eq!(s.pattern(), Pattern::Attribute("onClickSomething".to_string()));
    }

    #[test]
    fn test_on_without_event_is_method() {
        let s = Substitution::of(&Member::method("onboard"));
        assert_eq!(s.kind, SubstitutionKind::MethodInvocation);
        assert_eq!(s.event_type, None);
    }

    #[test]
    fn test_idempotent() {
        let member = Member::method("onPlayingChange");
        assert_eq!(Substitution::of(&member), Substitution::of(&member));
        assert_eq!(Substitution::of(&member).event_type, Some("playing"));
    }

    #[test]
    fn test_classify_dedupes_in_order() {
        let members = vec![
            Member::property("title"),
            Member::method("open"),
            Member::method("title"),
        ];
        let classified = classify(&members);
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].kind, SubstitutionKind::Property);
        assert_eq!(classified[1].key, "open");
    }
}
