//! # reveal-core
//!
//! Scroll-reveal visibility engine.
//!
//! A [`RevealController`] binds a rendered node ([`RevealTarget`]) to a shared
//! viewport-intersection facility ([`IntersectionSource`]) and flips the node
//! between hidden and visible as it crosses a threshold:
//!
//! - **once** targets latch visible on first sight and stop observing,
//! - **repeat** targets toggle every time they enter or leave the viewport,
//! - **unmount** always releases the subscription,
//! - a missing intersection facility **fails open**: content is shown at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use reveal_core::{fake::FakeSource, RevealConfig, RevealController, RevealTarget};
//! use std::rc::Rc;
//!
//! let source: Rc<FakeSource<&str>> = Rc::new(FakeSource::new());
//! let controller = RevealController::from_shared(source.clone());
//!
//! let target = RevealTarget::new("pricing");
//! let handle = controller.attach(&target, &RevealConfig::default().with_delay_ms(200));
//!
//! source.enter(&"pricing", 0.6);
//! assert!(target.is_visible());
//! assert!(!target.is_observed()); // latched
//!
//! handle.release(); // idempotent
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - thresholds, root margin parsing, delay clamping
//! - [`source`] - the intersection seam and its contract
//! - [`state`] - the per-target state machine
//! - [`controller`] - attach/release and target lifecycle
//! - [`fake`] - deterministic source for tests
//!
//! Everything here is single-threaded: sources deliver on the event loop and
//! state lives behind `Rc<RefCell<_>>`.

pub mod config;
pub mod controller;
pub mod error;
pub mod fake;
pub mod source;
pub mod state;

pub use config::{MarginLength, RevealConfig, RootMargin, clamp_delay};
pub use controller::{ObservationHandle, Presentation, RevealController, RevealTarget};
pub use error::{ConfigError, SourceError};
pub use source::{
    IntersectionCallback, IntersectionEntry, IntersectionSource, ObserveOptions, SubscriptionId,
    UnsupportedSource,
};
pub use state::{RevealState, Step, Trigger};
