// reveal landing page, Leptos 0.8 CSR

mod config;
mod logging;
mod observer;
mod sections;

use config::SiteConfig;
use leptos::prelude::*;
use observer::DomIntersectionSource;
use reveal_core::RevealController;
use sections::*;
use tracing::{info, warn};

fn main() {
    console_error_panic_hook::set_once();

    let (config, parse_error) = match SiteConfig::embedded() {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err)),
    };
    logging::init(config.log.max_level());
    if let Some(err) = parse_error {
        warn!("Failed to parse site.toml, using defaults: {}", err);
    }
    if !DomIntersectionSource::is_supported() {
        info!("IntersectionObserver unavailable, content is shown without reveal transitions");
    }

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}

#[component]
fn App(config: SiteConfig) -> impl IntoView {
    RevealHost::provide(
        RevealController::new(DomIntersectionSource::new()).with_defaults(config.reveal),
    );

    view! {
        <Nav />
        <main>
            <Hero cta=config.cta />
            <TransitionSection />
            <Features />
            <PlatformToggle />
        </main>
        <Footer />
    }
}
