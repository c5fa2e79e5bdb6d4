use leptos::prelude::*;

use super::Reveal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Leptos,
    WasmBindgen,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Leptos, Platform::WasmBindgen];

    fn label(self) -> &'static str {
        match self {
            Platform::Leptos => "LEPTOS",
            Platform::WasmBindgen => "WASM-BINDGEN",
        }
    }

    fn snippet(self) -> &'static str {
        match self {
            Platform::Leptos => {
                r#"// Wrap anything; it fades in once it scrolls into view.
view! {
    <Reveal delay=150>
        <PricingTable />
    </Reveal>

    // Toggle every time it enters or leaves the viewport
    <Reveal once=false class="stats">
        <Counters />
    </Reveal>
}"#
            }
            Platform::WasmBindgen => {
                r#"let controller = RevealController::new(DomIntersectionSource::new());

let target = RevealTarget::new(element)
    .with_listener(|p| apply_classes(&p.class_name(""), &p.style("")));
let handle = controller.attach(&target, &RevealConfig::default().with_delay_ms(150));

// On teardown: always release
target.unmount();"#
            }
        }
    }
}

#[component]
pub fn PlatformToggle() -> impl IntoView {
    let (active, set_active) = signal(Platform::Leptos);
    let (copied, set_copied) = signal(false);

    let copy_snippet = move |_| {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            let _ = clipboard.write_text(active.get().snippet());
            set_copied.set(true);
            set_timeout(
                move || set_copied.set(false),
                std::time::Duration::from_millis(2000),
            );
        }
    };

    view! {
        <section id="platforms" class="platform-section">
            <div class="container">
                <Reveal class="section-header">
                    <p class="section-eyebrow">"Use it"</p>
                    <h2 class="section-title">"Pick your platform"</h2>
                </Reveal>
                <Reveal delay=100 class="platform-toggle">
                    // Tab switcher
                    <div class="hero-tabs">
                        {Platform::ALL
                            .into_iter()
                            .map(|platform| {
                                view! {
                                    <button
                                        class=move || {
                                            if active.get() == platform {
                                                "hero-tab active"
                                            } else {
                                                "hero-tab"
                                            }
                                        }
                                        on:click=move |_| set_active.set(platform)
                                    >
                                        {platform.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>

                    <pre class="platform-snippet">{move || active.get().snippet()}</pre>

                    <button class="copy-btn" on:click=copy_snippet>
                        {move || if copied.get() { "COPIED" } else { "COPY TO CLIPBOARD" }}
                    </button>
                </Reveal>
            </div>
        </section>
    }
}
