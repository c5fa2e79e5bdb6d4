// Landing page sections

/// Version string used across the landing page (single source of truth)
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

mod cta;
mod features;
mod footer;
mod hero;
mod nav;
mod platform_toggle;
mod reveal;
mod transition;

pub use cta::CtaButtons;
pub use features::Features;
pub use footer::Footer;
pub use hero::Hero;
pub use nav::Nav;
pub use platform_toggle::PlatformToggle;
pub use reveal::{Reveal, RevealHost};
pub use transition::TransitionSection;
