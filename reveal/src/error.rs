//! Error types for configuration and intersection sources.
//!
//! None of these reach the end user: source errors turn into the fail-open
//! transition and configuration errors fall back to defaults.

use thiserror::Error;

/// Invalid reveal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Root margin shorthand must carry between one and four lengths.
    #[error("root margin takes 1 to 4 lengths, got {0}")]
    MarginArity(usize),

    /// A root margin length that is not `0`, `<n>px` or `<n>%`.
    #[error("invalid root margin length `{0}` (expected px or %)")]
    MarginLength(String),
}

/// Why an intersection source could not take a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The host environment has no intersection facility at all.
    #[error("intersection observation is not supported in this environment")]
    Unsupported,

    /// The facility exists but refused this particular subscription.
    #[error("intersection source rejected the subscription: {0}")]
    Rejected(String),
}
