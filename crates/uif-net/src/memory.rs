//! In-memory transport
//!
//! Serves resources from a map and counts every fetch. Optional latency
//! (in scheduler yields) lets concurrent callers overlap.

use std::cell::RefCell;
use std::collections::HashMap;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::{FetchResult, NetError, ResourceKind, ResourcePath, TextFetcher};

#[derive(Debug, Clone)]
enum Entry {
    Text(String),
    Fault(String),
}

/// Map-backed fetcher
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    entries: HashMap<ResourcePath, Entry>,
    counts: RefCell<HashMap<ResourcePath, usize>>,
    latency: usize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yield to the executor `ticks` times before answering
    pub fn with_latency(mut self, ticks: usize) -> Self {
        self.latency = ticks;
        self
    }

    /// Serve `text` for `tag.kind`
    pub fn insert(&mut self, tag: &str, kind: ResourceKind, text: &str) -> &mut Self {
        self.entries.insert(ResourcePath::new(tag, kind), Entry::Text(text.to_string()));
        self
    }

    /// Fail `tag.kind` with a transport fault
    pub fn fail(&mut self, tag: &str, kind: ResourceKind, message: &str) -> &mut Self {
        self.entries.insert(ResourcePath::new(tag, kind), Entry::Fault(message.to_string()));
        self
    }

    /// Number of fetches issued for `tag.kind`
    pub fn fetch_count(&self, tag: &str, kind: ResourceKind) -> usize {
        self.counts
            .borrow()
            .get(&ResourcePath::new(tag, kind))
            .copied()
            .unwrap_or(0)
    }

    /// Number of fetches issued overall
    pub fn total_fetches(&self) -> usize {
        self.counts.borrow().values().sum()
    }
}

impl TextFetcher for MemoryFetcher {
    fn fetch<'a>(&'a self, path: &'a ResourcePath) -> LocalBoxFuture<'a, FetchResult> {
        *self.counts.borrow_mut().entry(path.clone()).or_insert(0) += 1;
        async move {
            for _ in 0..self.latency {
                smol::future::yield_now().await;
            }
            match self.entries.get(path) {
                Some(Entry::Text(text)) => Ok(Some(text.clone())),
                Some(Entry::Fault(message)) => Err(NetError::Network(message.clone())),
                None => Ok(None),
            }
        }
        .boxed_local()
    }
}
