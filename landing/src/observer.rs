//! Browser intersection source backed by `IntersectionObserver`.
//!
//! One observer per subscription, so releasing a subscription is a plain
//! `disconnect()` and never touches other targets.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use js_sys::{Array, Reflect};
use reveal_core::{
    IntersectionCallback, IntersectionEntry, IntersectionSource, ObserveOptions, SourceError,
    SubscriptionId,
};
use tracing::{debug, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Observation {
    observer: IntersectionObserver,
    _callback: ObserverClosure,
}

pub struct DomIntersectionSource {
    next_id: Cell<u64>,
    observations: RefCell<HashMap<SubscriptionId, Observation>>,
}

impl DomIntersectionSource {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            observations: RefCell::new(HashMap::new()),
        }
    }

    /// Whether `window.IntersectionObserver` exists.
    pub fn is_supported() -> bool {
        web_sys::window()
            .map(|window| {
                Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
            })
            .unwrap_or(false)
    }

    pub fn active(&self) -> usize {
        self.observations.borrow().len()
    }
}

impl Default for DomIntersectionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionSource for DomIntersectionSource {
    type Node = Element;

    fn subscribe(
        &self,
        node: &Element,
        options: &ObserveOptions,
        callback: IntersectionCallback,
    ) -> Result<SubscriptionId, SourceError> {
        if !Self::is_supported() {
            return Err(SourceError::Unsupported);
        }

        let closure = ObserverClosure::new(move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                callback(IntersectionEntry {
                    ratio: entry.intersection_ratio(),
                    is_intersecting: entry.is_intersecting(),
                });
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_string());

        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
                .map_err(|err| SourceError::Rejected(format!("{err:?}")))?;
        observer.observe(node);

        let id = SubscriptionId::new(self.next_id.get());
        self.next_id.set(id.get() + 1);
        self.observations.borrow_mut().insert(
            id,
            Observation {
                observer,
                _callback: closure,
            },
        );
        debug!(subscription = %id, "intersection observer connected");
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let Some(observation) = self.observations.borrow_mut().remove(&id) else {
            trace!(subscription = %id, "unsubscribe for unknown subscription");
            return;
        };
        observation.observer.disconnect();
        debug!(subscription = %id, remaining = self.active(), "intersection observer disconnected");
        // May run inside this observer's own callback (once-latch); the
        // closure must outlive the current invocation.
        wasm_bindgen_futures::spawn_local(async move {
            drop(observation);
        });
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use reveal_core::{RevealConfig, RevealController, RevealTarget};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element() -> Element {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("document");
        let el = document.create_element("div").expect("div");
        document
            .body()
            .expect("body")
            .append_child(&el)
            .expect("append");
        el
    }

    #[wasm_bindgen_test]
    fn test_browser_supports_intersection_observer() {
        assert!(DomIntersectionSource::is_supported());
    }

    #[wasm_bindgen_test]
    fn test_unmount_disconnects_observer() {
        let source = std::rc::Rc::new(DomIntersectionSource::new());
        let controller = RevealController::from_shared(source.clone());
        let target = RevealTarget::new(element());

        let handle = controller.attach(&target, &RevealConfig::default());
        assert!(handle.subscription().is_some());
        assert_eq!(source.active(), 1);

        target.unmount();
        assert_eq!(source.active(), 0);
        handle.release();
    }

    #[wasm_bindgen_test]
    fn test_unknown_unsubscribe_is_ignored() {
        let source = DomIntersectionSource::new();
        source.unsubscribe(SubscriptionId::new(42));
        assert_eq!(source.active(), 0);
    }
}
