//! Scroll-reveal wrapper component.

use leptos::html::Div;
use leptos::prelude::*;
use reveal_core::{Presentation, RevealController, RevealTarget};
use web_sys::Element;

use crate::observer::DomIntersectionSource;

/// Shared controller for every `<Reveal>` rendered below the provider.
#[derive(Clone, Copy)]
pub struct RevealHost {
    controller: StoredValue<RevealController<Element>, LocalStorage>,
}

impl RevealHost {
    pub fn provide(controller: RevealController<Element>) {
        provide_context(Self {
            controller: StoredValue::new_local(controller),
        });
    }

    /// The provided controller, or a standalone one when rendered outside `App`.
    fn controller() -> RevealController<Element> {
        use_context::<Self>()
            .and_then(|host| host.controller.try_get_value())
            .unwrap_or_else(|| RevealController::new(DomIntersectionSource::new()))
    }
}

/// Wraps children in a container that fades in when scrolled into view.
///
/// Threshold and root margin come from the host controller's defaults; each
/// wrapper picks its own delay and latch.
#[component]
pub fn Reveal(
    /// Transition delay in milliseconds. Negative values act as zero.
    #[prop(optional)]
    delay: i64,
    /// Stay visible after the first reveal instead of toggling.
    #[prop(default = true)]
    once: bool,
    /// Extra classes for the wrapper.
    #[prop(optional, into)]
    class: String,
    /// Extra inline style for the wrapper.
    #[prop(optional, into)]
    style: String,
    children: Children,
) -> impl IntoView {
    let controller = RevealHost::controller();
    let config = controller
        .defaults()
        .clone()
        .with_once(once)
        .with_delay_ms(delay);
    let (presentation, set_presentation) = signal(Presentation::HIDDEN);
    let node_ref = NodeRef::<Div>::new();
    let target = StoredValue::new_local(None::<RevealTarget<Element>>);

    Effect::new(move |_| {
        let Some(node) = node_ref.get() else {
            return;
        };
        if target.with_value(Option::is_some) {
            return;
        }
        let element: Element = node.into();
        let mounted =
            RevealTarget::new(element).with_listener(move |next| set_presentation.set(next));
        controller.attach(&mounted, &config);
        target.set_value(Some(mounted));
    });

    on_cleanup(move || {
        target.try_update_value(|slot| {
            if let Some(mounted) = slot.take() {
                mounted.unmount();
            }
        });
    });

    view! {
        <div
            node_ref=node_ref
            class=move || presentation.get().class_name(&class)
            style=move || presentation.get().style(&style)
        >
            {children()}
        </div>
    }
}
