use leptos::prelude::*;

use super::VERSION;

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="nav">
            <div class="nav-inner">
                <a href="/" class="nav-brand">
                    <span class="nav-title">"reveal"</span>
                    <span class="nav-version">{VERSION}</span>
                </a>
                <div class="nav-links">
                    <a href="#how-it-works" class="nav-link">"How it works"</a>
                    <a href="#features" class="nav-link">"Features"</a>
                    <a href="#platforms" class="nav-cta">"Use it"</a>
                </div>
            </div>
        </nav>
    }
}
