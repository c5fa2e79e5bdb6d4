//! Deterministic in-memory intersection source.
//!
//! Events fire synchronously when the test calls [`FakeSource::emit`], so
//! every transition can be asserted step by step without a browser.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::error::SourceError;
use crate::source::{
    IntersectionCallback, IntersectionEntry, IntersectionSource, ObserveOptions, SubscriptionId,
};

struct FakeSubscription<N> {
    node: N,
    options: ObserveOptions,
    callback: IntersectionCallback,
}

/// In-memory [`IntersectionSource`] driven by explicit `emit` calls.
pub struct FakeSource<N> {
    available: bool,
    next_id: Cell<u64>,
    subscriptions: RefCell<BTreeMap<SubscriptionId, FakeSubscription<N>>>,
    delivered: Cell<usize>,
    released: Cell<usize>,
}

impl<N: Clone + PartialEq> FakeSource<N> {
    pub fn new() -> Self {
        Self {
            available: true,
            next_id: Cell::new(1),
            subscriptions: RefCell::new(BTreeMap::new()),
            delivered: Cell::new(0),
            released: Cell::new(0),
        }
    }

    /// A source that behaves like an environment without intersection support.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Deliver `entry` to every live subscription on `node`, in subscription
    /// order. Returns how many callbacks ran.
    pub fn emit(&self, node: &N, entry: IntersectionEntry) -> usize {
        let targets: Vec<(SubscriptionId, IntersectionCallback)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|(_, sub)| sub.node == *node)
            .map(|(id, sub)| (*id, sub.callback.clone()))
            .collect();

        let mut ran = 0;
        for (id, callback) in targets {
            // An earlier callback in this batch may have released this one.
            if !self.subscriptions.borrow().contains_key(&id) {
                continue;
            }
            callback(entry);
            ran += 1;
        }
        self.delivered.set(self.delivered.get() + ran);
        ran
    }

    pub fn enter(&self, node: &N, ratio: f64) -> usize {
        self.emit(node, IntersectionEntry::entering(ratio))
    }

    pub fn leave(&self, node: &N) -> usize {
        self.emit(node, IntersectionEntry::leaving())
    }

    pub fn active(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    pub fn is_active(&self, id: SubscriptionId) -> bool {
        self.subscriptions.borrow().contains_key(&id)
    }

    /// Options of the live subscription for `node`, if any.
    pub fn options_for(&self, node: &N) -> Option<ObserveOptions> {
        self.subscriptions
            .borrow()
            .values()
            .find(|sub| sub.node == *node)
            .map(|sub| sub.options.clone())
    }

    /// Total callbacks run since creation.
    pub fn delivered(&self) -> usize {
        self.delivered.get()
    }

    /// Total subscriptions actually removed by `unsubscribe`.
    pub fn released(&self) -> usize {
        self.released.get()
    }
}

impl<N: Clone + PartialEq> Default for FakeSource<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + PartialEq> IntersectionSource for FakeSource<N> {
    type Node = N;

    fn subscribe(
        &self,
        node: &N,
        options: &ObserveOptions,
        callback: IntersectionCallback,
    ) -> Result<SubscriptionId, SourceError> {
        if !self.available {
            return Err(SourceError::Unsupported);
        }
        let id = SubscriptionId::new(self.next_id.get());
        self.next_id.set(id.get() + 1);
        self.subscriptions.borrow_mut().insert(
            id,
            FakeSubscription {
                node: node.clone(),
                options: options.clone(),
                callback,
            },
        );
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.subscriptions.borrow_mut().remove(&id).is_some() {
            self.released.set(self.released.get() + 1);
        }
    }
}
