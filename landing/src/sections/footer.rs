use leptos::prelude::*;

use super::Reveal;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="container">
                <Reveal class="footer-brand">
                    <span class="footer-title">"reveal"</span>
                </Reveal>
                <p class="footer-copyright">"MIT OR Apache-2.0"</p>
            </div>
        </footer>
    }
}
