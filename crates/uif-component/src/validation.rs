//! Validation protocol
//!
//! Validators recorded on a wrapper element run against the current input
//! value. Immediate verdicts apply at once; deferred ones bump the
//! `uif-reviewing` counter before anything is awaited and apply as they
//! settle. The aggregate `uif-state` is re-derived from the live marker
//! attributes on every change, never from a snapshot.
//!
//! A deferred verdict from a run that a newer run on the same wrapper has
//! superseded only releases its `uif-reviewing` slot.

use std::cell::RefCell;
use std::collections::HashMap;

use futures::future::{LocalBoxFuture, join_all};
use uif_dom::{DocumentHandle, DomTree, Event, NodeId};

use crate::{Check, OwnershipIndex, Verdict, attrs};

/// Validators available without a controller
pub const BUILTIN_VALIDATORS: &[&str] = &["mustBe"];

const INPUT_TAGS: &[&str] = &["input", "textarea", "select"];

/// Built-in non-empty check
pub fn must_be(value: &str) -> Verdict {
    if value.is_empty() {
        Verdict::Fail(Some("Required".to_string()))
    } else {
        Verdict::Pass
    }
}

/// `mustBeAnimal` -> `must-be-animal`
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `must-be-animal` -> `mustBeAnimal`
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Validator names recorded on `wrapper`, in attribute order
pub(crate) fn recorded_validators(tree: &DomTree, wrapper: NodeId) -> Vec<String> {
    tree.attribute_names(wrapper)
        .iter()
        .filter_map(|name| name.strip_prefix(attrs::CHECK_PREFIX))
        .map(kebab_to_camel)
        .collect()
}

/// The input element a wrapper validates: itself, or its first input
fn input_of(tree: &DomTree, wrapper: NodeId) -> Option<NodeId> {
    let is_input = |node: NodeId| tree.tag_name(node).is_some_and(|tag| INPUT_TAGS.contains(&tag));
    if is_input(wrapper) {
        return Some(wrapper);
    }
    tree.descendants(wrapper).into_iter().find(|&node| is_input(node))
}

struct Request {
    names: Vec<String>,
    value: String,
    form: Option<NodeId>,
}

fn gather(tree: &DomTree, wrapper: NodeId, event: Option<&Event>) -> Request {
    let input = input_of(tree, wrapper);
    let mut names = recorded_validators(tree, wrapper);
    if names.is_empty() {
        let required = tree.has_attribute(wrapper, "required")
            || input.is_some_and(|input| tree.has_attribute(input, "required"));
        if required {
            names.push(BUILTIN_VALIDATORS[0].to_string());
        }
    }

    let value = event
        .and_then(|e| e.value.clone())
        .or_else(|| input.and_then(|input| tree.get_attribute(input, "value")).map(str::to_string))
        .unwrap_or_default();

    let form = tree.closest(wrapper, |_, node| {
        node.as_element().is_some_and(|e| e.name == "form")
    });

    Request { names, value, form }
}

/// Latest run number per wrapper
#[derive(Debug, Default)]
pub(crate) struct RunLedger {
    latest: RefCell<HashMap<NodeId, u64>>,
}

impl RunLedger {
    fn begin(&self, wrapper: NodeId) -> u64 {
        let mut latest = self.latest.borrow_mut();
        let run = latest.entry(wrapper).or_insert(0);
        *run += 1;
        *run
    }

    fn is_current(&self, wrapper: NodeId, run: u64) -> bool {
        self.latest.borrow().get(&wrapper) == Some(&run)
    }
}

/// Run every validator of `wrapper`, resolving once all have settled
pub(crate) async fn run(
    document: &DocumentHandle,
    owners: &OwnershipIndex,
    runs: &RunLedger,
    wrapper: NodeId,
    event: Option<&Event>,
) {
    let (request, owner) = {
        let doc = document.borrow();
        let request = gather(&doc.tree, wrapper, event);
        let owner = owners.nearest(&doc.tree, wrapper);
        (request, owner)
    };
    if request.names.is_empty() {
        tracing::debug!("Nothing to validate on {}", wrapper);
        return;
    }
    let run = runs.begin(wrapper);

    let mut deferred: Vec<(String, LocalBoxFuture<'static, Verdict>)> = Vec::new();
    for name in &request.names {
        let check = owner
            .as_ref()
            .and_then(|owner| owner.with_controller(|c| c.validator(name, &request.value, request.form)))
            .flatten();
        let check = match check {
            Some(check) => check,
            None if name == "mustBe" => Check::Ready(must_be(&request.value)),
            None => {
                let mut available = owner.as_ref().map(|o| o.validator_names()).unwrap_or_default();
                available.extend(BUILTIN_VALIDATORS.iter().map(|s| s.to_string()));
                tracing::warn!(
                    "No validator `{}` for {}; available: {}",
                    name,
                    wrapper,
                    available.join(", ")
                );
                continue;
            }
        };
        match check {
            Check::Ready(verdict) => apply(document, wrapper, name, &verdict),
            Check::Pending(future) => deferred.push((name.clone(), future)),
        }
    }

    if !deferred.is_empty() {
        adjust_reviewing(document, wrapper, deferred.len() as i64);
    }
    update_state(document, wrapper);

    join_all(deferred.into_iter().map(|(name, future)| async move {
        let verdict = future.await;
        if runs.is_current(wrapper, run) {
            apply(document, wrapper, &name, &verdict);
        } else {
            tracing::debug!("Dropping superseded verdict of {} on {}", name, wrapper);
        }
        adjust_reviewing(document, wrapper, -1);
        update_state(document, wrapper);
    }))
    .await;
}

/// Set or clear the failure marker of one validator
fn apply(document: &DocumentHandle, wrapper: NodeId, name: &str, verdict: &Verdict) {
    let marker = format!("{}{}", attrs::FAIL_PREFIX, camel_to_kebab(name));
    let mut doc = document.borrow_mut();
    match verdict {
        Verdict::Pass => {
            doc.tree.remove_attribute(wrapper, &marker);
        }
        Verdict::Fail(message) => {
            tracing::debug!("{} failed {}", wrapper, name);
            if let Err(e) = doc.tree.set_attribute(wrapper, &marker, message.as_deref().unwrap_or("")) {
                tracing::warn!("Cannot mark {}: {}", wrapper, e);
            }
        }
    }
}

/// Current `uif-reviewing` count
pub(crate) fn reviewing(tree: &DomTree, wrapper: NodeId) -> i64 {
    tree.get_attribute(wrapper, attrs::REVIEWING)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn adjust_reviewing(document: &DocumentHandle, wrapper: NodeId, delta: i64) {
    let mut doc = document.borrow_mut();
    let count = (reviewing(&doc.tree, wrapper) + delta).max(0);
    if count == 0 {
        doc.tree.remove_attribute(wrapper, attrs::REVIEWING);
    } else if let Err(e) = doc.tree.set_attribute(wrapper, attrs::REVIEWING, &count.to_string()) {
        tracing::warn!("Cannot count reviews on {}: {}", wrapper, e);
    }
}

/// Re-derive `uif-state` from the markers currently present
fn update_state(document: &DocumentHandle, wrapper: NodeId) {
    let mut doc = document.borrow_mut();
    let failing = doc
        .tree
        .attribute_names(wrapper)
        .iter()
        .any(|name| name.starts_with(attrs::FAIL_PREFIX));
    let state = if failing {
        "bad"
    } else if reviewing(&doc.tree, wrapper) > 0 {
        "reviewing"
    } else {
        "good"
    };
    if let Err(e) = doc.tree.set_attribute(wrapper, attrs::STATE, state) {
        tracing::warn!("Cannot set state on {}: {}", wrapper, e);
    }
}
