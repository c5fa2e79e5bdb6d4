use leptos::prelude::*;

use super::{CtaButtons, Reveal, VERSION};
use crate::config::CtaConfig;

#[component]
pub fn Hero(cta: CtaConfig) -> impl IntoView {
    let badge_text = format!("{} | Leptos 0.8 Edition", VERSION);
    view! {
        <section class="hero">
            <div class="container">
                <Reveal class="hero-content">
                    <div class="hero-badge">
                        <span class="hero-badge-dot"></span>
                        {badge_text}
                    </div>
                    <h1 class="hero-title">
                        <span class="hero-title-accent">"Reveal on scroll,"</span>
                        <br />
                        "never lose the content."
                    </h1>
                    <p class="hero-description">
                        "A tiny visibility engine for Rust front-ends. Latches once, toggles on demand, "
                        "releases every observer on unmount and fails open when the browser can't watch."
                    </p>
                </Reveal>
                <Reveal delay=200>
                    <CtaButtons cta=cta />
                </Reveal>
            </div>
        </section>
    }
}
