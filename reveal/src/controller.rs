//! Attaching targets to an intersection source and owning their lifecycle.
//!
//! A [`RevealTarget`] is the state of one rendered node. The controller binds
//! it to at most one subscription at a time; callbacks only hold a weak
//! reference to the target, and the binding is released on latch, on
//! [`ObservationHandle::release`], on [`RevealTarget::unmount`], or when the
//! last clone of the target is dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::RevealConfig;
use crate::source::{IntersectionEntry, IntersectionSource, ObserveOptions, SubscriptionId};
use crate::state::{RevealState, Step, Trigger};

/// Class applied to every reveal wrapper.
pub const REVEAL_CLASS: &str = "reveal";

/// Marker class present while the target is visible.
pub const VISIBLE_CLASS: &str = "is-visible";

type SharedSource<N> = Rc<dyn IntersectionSource<Node = N>>;
type Listener = Rc<dyn Fn(Presentation)>;

/// What the render layer should show for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub visible: bool,
    /// Delay before the reveal transition starts. Always zero while hidden.
    pub delay: Duration,
}

impl Presentation {
    pub const HIDDEN: Presentation = Presentation {
        visible: false,
        delay: Duration::ZERO,
    };

    pub fn visible(delay: Duration) -> Self {
        Self {
            visible: true,
            delay,
        }
    }

    /// `reveal [is-visible] [extra]`
    pub fn class_name(&self, extra: &str) -> String {
        let mut class = String::from(REVEAL_CLASS);
        if self.visible {
            class.push(' ');
            class.push_str(VISIBLE_CLASS);
        }
        let extra = extra.trim();
        if !extra.is_empty() {
            class.push(' ');
            class.push_str(extra);
        }
        class
    }

    /// Inline style carrying the transition delay, followed by `extra`.
    pub fn style(&self, extra: &str) -> String {
        let extra = extra.trim();
        if self.delay.is_zero() {
            return extra.to_string();
        }
        let delay = format!("transition-delay: {}ms;", self.delay.as_millis());
        if extra.is_empty() {
            delay
        } else {
            format!("{delay} {extra}")
        }
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::HIDDEN
    }
}

struct Binding<N> {
    id: SubscriptionId,
    source: SharedSource<N>,
}

impl<N> Binding<N> {
    fn release(self) {
        trace!(subscription = %self.id, "releasing subscription");
        self.source.unsubscribe(self.id);
    }
}

struct TargetInner<N> {
    node: N,
    state: RevealState,
    mounted: bool,
    listener: Option<Listener>,
    binding: Option<Binding<N>>,
}

impl<N> Drop for TargetInner<N> {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.release();
        }
    }
}

/// A rendered node under reveal observation.
///
/// Cheap to clone; clones share state.
pub struct RevealTarget<N> {
    inner: Rc<RefCell<TargetInner<N>>>,
}

impl<N> Clone for RevealTarget<N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<N: Clone + 'static> RevealTarget<N> {
    /// Wrap a freshly mounted node.
    pub fn new(node: N) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TargetInner {
                node,
                state: RevealState::Hidden,
                mounted: true,
                listener: None,
                binding: None,
            })),
        }
    }

    /// Called with the new presentation after every visible change.
    pub fn with_listener(self, listener: impl Fn(Presentation) + 'static) -> Self {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
        self
    }

    pub fn node(&self) -> N {
        self.inner.borrow().node.clone()
    }

    pub fn state(&self) -> RevealState {
        self.inner.borrow().state
    }

    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().mounted
    }

    /// Whether a subscription is currently bound.
    pub fn is_observed(&self) -> bool {
        self.inner.borrow().binding.is_some()
    }

    /// The node left the render tree: release unconditionally. Idempotent.
    pub fn unmount(&self) {
        let binding = {
            let mut inner = self.inner.borrow_mut();
            if !inner.mounted {
                return;
            }
            inner.mounted = false;
            inner.state.release();
            inner.binding.take()
        };
        debug!(observed = binding.is_some(), "reveal target unmounted");
        if let Some(binding) = binding {
            binding.release();
        }
    }

    fn apply(&self, delay: Duration, change: impl FnOnce(&mut RevealState) -> Step) -> Step {
        apply_step(&self.inner, delay, change)
    }
}

/// Run `change` against the target state, then notify outside the borrow and
/// release the binding on latch.
fn apply_step<N>(
    inner: &Rc<RefCell<TargetInner<N>>>,
    delay: Duration,
    change: impl FnOnce(&mut RevealState) -> Step,
) -> Step {
    let (step, listener, latched) = {
        let mut target = inner.borrow_mut();
        let step = change(&mut target.state);
        let latched = match step {
            Step::ShowAndRelease => target.binding.take(),
            _ => None,
        };
        (step, target.listener.clone(), latched)
    };

    let presentation = match step {
        Step::Show | Step::ShowAndRelease => Some(Presentation::visible(delay)),
        Step::Hide => Some(Presentation::HIDDEN),
        Step::Unchanged => None,
    };
    if let (Some(presentation), Some(listener)) = (presentation, listener) {
        listener(presentation);
    }
    if let Some(binding) = latched {
        binding.release();
    }
    step
}

/// Handle to one attachment. Releasing it is idempotent.
pub struct ObservationHandle<N> {
    target: Weak<RefCell<TargetInner<N>>>,
    subscription: Option<SubscriptionId>,
    released: Cell<bool>,
}

impl<N> ObservationHandle<N> {
    fn inert() -> Self {
        Self {
            target: Weak::new(),
            subscription: None,
            released: Cell::new(true),
        }
    }

    /// The subscription created by this attachment, if the source accepted it.
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Stop delivering events for this attachment and move the target to its
    /// terminal state. Safe to call any number of times.
    pub fn release(&self) {
        if self.released.replace(true) {
            trace!("observation handle already released");
            return;
        }
        let Some(id) = self.subscription else {
            return;
        };

        // A dropped target released its binding on drop.
        let Some(inner) = self.target.upgrade() else {
            return;
        };

        let binding = {
            let mut target = inner.borrow_mut();
            // Latched, unmounted or re-attached since: nothing of ours left.
            if target.binding.as_ref().is_some_and(|b| b.id == id) {
                target.state.release();
                target.binding.take()
            } else {
                None
            }
        };
        if let Some(binding) = binding {
            debug!(subscription = %id, "observation released by handle");
            binding.release();
        }
    }
}

/// Binds reveal targets to a shared intersection source.
pub struct RevealController<N> {
    source: SharedSource<N>,
    defaults: RevealConfig,
}

impl<N> Clone for RevealController<N> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

impl<N: Clone + 'static> RevealController<N> {
    pub fn new(source: impl IntersectionSource<Node = N> + 'static) -> Self {
        Self::from_shared(Rc::new(source))
    }

    /// Use a source that other code also holds.
    pub fn from_shared(source: Rc<dyn IntersectionSource<Node = N>>) -> Self {
        Self {
            source,
            defaults: RevealConfig::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: RevealConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Settings used by [`RevealController::attach_default`] and as the base
    /// for per-wrapper overrides.
    pub fn defaults(&self) -> &RevealConfig {
        &self.defaults
    }

    /// Start observing `target`. Never blocks; transitions happen later from
    /// source callbacks.
    ///
    /// Attaching a torn-down target is a no-op returning an inert handle.
    /// Attaching an already observed target replaces its subscription. If the
    /// source cannot observe, the target is shown immediately.
    pub fn attach(&self, target: &RevealTarget<N>, config: &RevealConfig) -> ObservationHandle<N> {
        let (node, previous) = {
            let mut inner = target.inner.borrow_mut();
            if !inner.mounted || inner.state.is_released() {
                debug!(state = ?inner.state, "attach ignored: target already torn down");
                return ObservationHandle::inert();
            }
            (inner.node.clone(), inner.binding.take())
        };
        if let Some(previous) = previous {
            debug!(subscription = %previous.id, "re-attach replaces existing subscription");
            previous.release();
        }

        let trigger = Trigger {
            threshold: config.effective_threshold(),
            once: config.once,
        };
        let delay = config.effective_delay();
        let options = ObserveOptions {
            threshold: trigger.threshold,
            root_margin: config.root_margin,
        };

        let weak = Rc::downgrade(&target.inner);
        let callback = Rc::new(move |entry: IntersectionEntry| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let step = apply_step(&inner, delay, |state| state.on_entry(entry, trigger));
            trace!(?entry, ?step, "intersection event");
        });

        match self.source.subscribe(&node, &options, callback) {
            Ok(id) => {
                let stale = {
                    let mut inner = target.inner.borrow_mut();
                    if inner.state.is_released() {
                        // Released while subscribing; do not keep the binding.
                        true
                    } else {
                        inner.binding = Some(Binding {
                            id,
                            source: self.source.clone(),
                        });
                        false
                    }
                };
                if stale {
                    self.source.unsubscribe(id);
                }
                debug!(
                    subscription = %id,
                    threshold = trigger.threshold,
                    root_margin = %options.root_margin,
                    once = trigger.once,
                    delay_ms = delay.as_millis() as u64,
                    "reveal target attached"
                );
                ObservationHandle {
                    target: Rc::downgrade(&target.inner),
                    subscription: Some(id),
                    released: Cell::new(stale),
                }
            }
            Err(err) => {
                debug!(error = %err, "intersection source unavailable, showing target");
                target.apply(delay, RevealState::fail_open);
                ObservationHandle::inert()
            }
        }
    }

    /// [`RevealController::attach`] with the controller defaults.
    pub fn attach_default(&self, target: &RevealTarget<N>) -> ObservationHandle<N> {
        self.attach(target, &self.defaults)
    }

    /// Same as [`ObservationHandle::release`].
    pub fn release(&self, handle: &ObservationHandle<N>) {
        handle.release();
    }
}
