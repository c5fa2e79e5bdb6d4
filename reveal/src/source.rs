//! The intersection-signal seam.
//!
//! A source is a process-wide facility shared by every attached target. The
//! browser implementation wraps `IntersectionObserver`; tests use
//! [`crate::fake::FakeSource`].

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::config::RootMargin;
use crate::error::SourceError;

/// Identifies one subscription inside one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// A single intersection observation for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Fraction of the node's area inside the (margin-adjusted) viewport.
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entering(ratio: f64) -> Self {
        Self {
            ratio,
            is_intersecting: true,
        }
    }

    pub fn leaving() -> Self {
        Self {
            ratio: 0.0,
            is_intersecting: false,
        }
    }

    /// True when this entry counts as "in view" for `threshold`.
    pub fn meets(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// Options handed to the source for one subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

/// Invoked by the source for every entry concerning the subscribed node.
pub type IntersectionCallback = Rc<dyn Fn(IntersectionEntry)>;

/// Viewport-intersection facility.
///
/// Contract:
/// - `subscribe` never delivers synchronously into a caller-held borrow; it
///   may deliver later, from the event loop, any number of times.
/// - `unsubscribe` is safe for unknown or already released ids, and safe to
///   call from inside the subscription's own callback.
/// - Subscriptions are independent; releasing one never affects another.
pub trait IntersectionSource {
    type Node;

    fn subscribe(
        &self,
        node: &Self::Node,
        options: &ObserveOptions,
        callback: IntersectionCallback,
    ) -> Result<SubscriptionId, SourceError>;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// A source for environments without any intersection facility, such as
/// server-side rendering. Every subscription is refused as unsupported.
pub struct UnsupportedSource<N> {
    _node: PhantomData<fn(&N)>,
}

impl<N> UnsupportedSource<N> {
    pub fn new() -> Self {
        Self { _node: PhantomData }
    }
}

impl<N> Default for UnsupportedSource<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> IntersectionSource for UnsupportedSource<N> {
    type Node = N;

    fn subscribe(
        &self,
        _node: &N,
        _options: &ObserveOptions,
        _callback: IntersectionCallback,
    ) -> Result<SubscriptionId, SourceError> {
        Err(SourceError::Unsupported)
    }

    fn unsubscribe(&self, _id: SubscriptionId) {}
}
