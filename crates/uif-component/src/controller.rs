//! Controller capability declaration
//!
//! A controller declares its bindable members up front instead of being
//! introspected. Classification then only needs each member's name and
//! whether it is invocable.

use std::collections::BTreeMap;
use std::fmt;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde_json::Value;
use uif_dom::{Event, NodeId};

use crate::ControllerError;

/// A bindable controller member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub invocable: bool,
}

impl Member {
    /// A value member, substituted as `{name}`
    pub fn property(name: &str) -> Self {
        Self {
            name: name.to_string(),
            invocable: false,
        }
    }

    /// An invocable member (method, event handler or validator)
    pub fn method(name: &str) -> Self {
        Self {
            name: name.to_string(),
            invocable: true,
        }
    }
}

/// Arguments of a member call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Literal arguments from the markup
    pub args: Vec<Value>,
    /// Native event, for event handlers
    pub event: Option<Event>,
    /// Element the event fired on
    pub target: Option<NodeId>,
}

impl Invocation {
    pub fn with_args(args: Vec<Value>) -> Self {
        Self {
            args,
            ..Self::default()
        }
    }

    /// Argument `index`, or `null`
    pub fn arg(&self, index: usize) -> &Value {
        self.args.get(index).unwrap_or(&Value::Null)
    }
}

/// Outcome of one validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failure, optionally carrying a message
    Fail(Option<String>),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok { Verdict::Pass } else { Verdict::Fail(None) }
    }
}

/// Empty message passes, anything else fails with that message
impl From<String> for Verdict {
    fn from(message: String) -> Self {
        if message.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail(Some(message))
        }
    }
}

impl From<&str> for Verdict {
    fn from(message: &str) -> Self {
        Verdict::from(message.to_string())
    }
}

/// Result of starting a validator: settled now, or later
pub enum Check {
    Ready(Verdict),
    Pending(LocalBoxFuture<'static, Verdict>),
}

impl Check {
    pub fn ready(verdict: impl Into<Verdict>) -> Self {
        Check::Ready(verdict.into())
    }

    pub fn pending<F, V>(future: F) -> Self
    where
        F: Future<Output = V> + 'static,
        V: Into<Verdict> + 'static,
    {
        Check::Pending(future.map(Into::into).boxed_local())
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Ready(verdict) => f.debug_tuple("Ready").field(verdict).finish(),
            Check::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Per-element behavior object
pub trait Controller {
    /// Bindable members, in declaration order
    fn members(&self) -> Vec<Member>;

    /// Current value of a property member
    fn property(&self, key: &str) -> Option<Value>;

    /// Call an invocable member
    fn invoke(&mut self, key: &str, call: Invocation) -> Result<Value, ControllerError>;

    /// Start validator `name` against an input value
    ///
    /// `None` means the controller has no such validator.
    fn validator(&self, _name: &str, _value: &str, _form: Option<NodeId>) -> Option<Check> {
        None
    }
}

/// Controller over a fixed JSON object: every key is a property
#[derive(Debug, Clone, Default)]
pub struct DataController {
    values: BTreeMap<String, Value>,
}

impl DataController {
    pub fn new(values: serde_json::Map<String, Value>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl Controller for DataController {
    fn members(&self) -> Vec<Member> {
        self.values.keys().map(|key| Member::property(key)).collect()
    }

    fn property(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn invoke(&mut self, key: &str, _call: Invocation) -> Result<Value, ControllerError> {
        Err(ControllerError::UnknownMember(key.to_string()))
    }
}
