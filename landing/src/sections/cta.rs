use leptos::prelude::*;

use crate::config::CtaConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaVariant {
    Primary,
    Secondary,
}

impl CtaVariant {
    fn class(self) -> &'static str {
        match self {
            CtaVariant::Primary => "btn btn-primary",
            CtaVariant::Secondary => "btn btn-secondary",
        }
    }
}

/// Links leaving the site open in a new tab.
fn is_external(href: &str) -> bool {
    let href = href.trim_start();
    href.starts_with("https://") || href.starts_with("http://") || href.starts_with("//")
}

#[component]
pub fn CtaLink(href: String, label: String, variant: CtaVariant) -> impl IntoView {
    let external = is_external(&href);
    view! {
        <a
            href=href
            class=variant.class()
            target=external.then_some("_blank")
            rel=external.then_some("noopener noreferrer")
        >
            {label}
        </a>
    }
}

#[component]
pub fn CtaButtons(cta: CtaConfig) -> impl IntoView {
    view! {
        <div class="hero-actions">
            <CtaLink href=cta.primary_href label=cta.primary_label variant=CtaVariant::Primary />
            <CtaLink
                href=cta.secondary_href
                label=cta.secondary_label
                variant=CtaVariant::Secondary
            />
        </div>
    }
}
