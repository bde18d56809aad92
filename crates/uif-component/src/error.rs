//! Component errors

use uif_dom::{DomError, NodeId};
use uif_html::ParseError;

/// Error raised by controller code
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("no member named `{0}`")]
    UnknownMember(String),

    #[error("`{member}` rejected its arguments: {reason}")]
    InvalidArguments { member: String, reason: String },

    #[error("{0}")]
    Failed(String),
}

/// Component loader error
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error(
        "behavior for <{tag}> has no usable constructor (exports: [{}]); export `default` or `{expected}`",
        .exports.join(", ")
    )]
    MalformedBehavior {
        tag: String,
        expected: String,
        exports: Vec<String>,
    },

    #[error("failed to construct controller for <{tag}>: {source}")]
    Construction {
        tag: String,
        #[source]
        source: ControllerError,
    },

    #[error("<{tag}> has no controller")]
    NoController { tag: String },

    #[error("no component owns {0}")]
    NoOwner(NodeId),

    #[error("<{tag}>.{member} failed: {source}")]
    Dispatch {
        tag: String,
        member: String,
        #[source]
        source: ControllerError,
    },

    #[error("markup could not be materialized: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Dom(#[from] DomError),
}
