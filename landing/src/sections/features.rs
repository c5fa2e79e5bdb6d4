use leptos::prelude::*;

use super::Reveal;

/// Delay step between consecutive cards.
const STAGGER_MS: i64 = 80;

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "[1]",
        "Once-latching",
        "Reveal on first sight, then stop observing. The target never flickers back to hidden.",
    ),
    (
        "[2]",
        "Re-toggling",
        "Set once=false and the block fades in and out as often as it crosses the viewport.",
    ),
    (
        "[3]",
        "Leak-free lifecycle",
        "Unmounting releases the observation unconditionally. Releasing twice is harmless.",
    ),
    (
        "[4]",
        "Fail-open",
        "No IntersectionObserver? Content is shown immediately instead of staying invisible.",
    ),
    (
        "[5]",
        "Clamped delays",
        "Negative delays become zero. The delay shapes the transition, never the state.",
    ),
    (
        "[6]",
        "Testable",
        "Inject a fake intersection source and drive every transition synchronously.",
    ),
];

#[component]
pub fn Features() -> impl IntoView {
    view! {
        <section id="features" class="features">
            <div class="container">
                <Reveal class="section-header">
                    <p class="section-eyebrow">"Features"</p>
                    <h2 class="section-title">"Small surface, strict lifecycle."</h2>
                </Reveal>
                <div class="features-grid">
                    {FEATURES
                        .iter()
                        .enumerate()
                        .map(|(idx, &(icon, title, description))| {
                            let delay = idx as i64 * STAGGER_MS;
                            view! {
                                <Reveal delay=delay>
                                    <FeatureCard icon=icon title=title description=description />
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn FeatureCard(
    icon: &'static str,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    view! {
        <article class="feature-card">
            <div class="feature-icon">{icon}</div>
            <h3 class="feature-title">{title}</h3>
            <p class="feature-description">{description}</p>
        </article>
    }
}
