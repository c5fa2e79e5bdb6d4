use leptos::prelude::*;

use super::Reveal;

/// Bridge between the hero and the feature grid.
#[component]
pub fn TransitionSection() -> impl IntoView {
    view! {
        <section id="how-it-works" class="transition-section">
            <div class="container">
                <Reveal class="section-header">
                    <p class="section-eyebrow">"How it works"</p>
                    <h2 class="section-title">"Content first. Motion second."</h2>
                    <p class="section-description">
                        "Every block starts hidden and is revealed the moment it crosses into view. "
                        "No observer support? The content simply shows up."
                    </p>
                </Reveal>
                // Repeating reveal: fades back out when scrolled away
                <Reveal once=false delay=120 class="transition-steps">
                    <ol class="steps">
                        <li>"Mount: the wrapper attaches one observation."</li>
                        <li>"Scroll: crossing the threshold adds the visible marker."</li>
                        <li>"Unmount: the observation is released, always."</li>
                    </ol>
                </Reveal>
            </div>
        </section>
    }
}
