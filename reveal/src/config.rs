//! Reveal configuration: trigger threshold, root margin, latch and delay.
//!
//! Values are sanitized on read rather than rejected: a threshold outside
//! `[0, 1]` is clamped and a negative delay becomes zero. Only the root margin
//! can fail to parse, since there is no sensible way to guess a broken length.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Minimum visible-area ratio used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Root margin used when none is configured: trigger slightly before the
/// bottom edge of the viewport is reached.
pub const DEFAULT_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(f64),
    Percent(f64),
}

impl MarginLength {
    pub const ZERO: MarginLength = MarginLength::Px(0.0);
}

impl FromStr for MarginLength {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::MarginLength(raw.to_string());

        let (number, percent) = if let Some(n) = raw.strip_suffix("px") {
            (n, false)
        } else if let Some(n) = raw.strip_suffix('%') {
            (n, true)
        } else if raw == "0" {
            return Ok(Self::ZERO);
        } else {
            return Err(invalid());
        };

        let value: f64 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }

        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Px(value)
        })
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Expansion (positive) or contraction (negative) of the viewport used for
/// the intersection test, in CSS margin shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: MarginLength::ZERO,
        right: MarginLength::ZERO,
        bottom: MarginLength::ZERO,
        left: MarginLength::ZERO,
    };
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            bottom: MarginLength::Px(-50.0),
            ..Self::ZERO
        }
    }
}

impl FromStr for RootMargin {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lengths = raw
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<MarginLength>, _>>()?;

        // Same expansion rules as the CSS `margin` shorthand.
        let (top, right, bottom, left) = match lengths.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            other => return Err(ConfigError::MarginArity(other.len())),
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Per-attachment reveal settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Minimum visible-area ratio that counts as "in view".
    pub threshold: f64,
    /// Margin applied to the viewport before intersecting.
    pub root_margin: RootMargin,
    /// Latch visible after the first reveal and stop observing.
    pub once: bool,
    /// Transition delay in milliseconds. Negative values act as zero.
    pub delay_ms: i64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
            once: true,
            delay_ms: 0,
        }
    }
}

impl RevealConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: i64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Threshold clamped to `[0, 1]`; non-finite input counts as zero.
    pub fn effective_threshold(&self) -> f64 {
        if self.threshold.is_finite() {
            self.threshold.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Transition delay with negative input clamped to zero.
    pub fn effective_delay(&self) -> Duration {
        clamp_delay(self.delay_ms)
    }
}

/// Clamp a millisecond delay to a non-negative [`Duration`].
pub fn clamp_delay(delay_ms: i64) -> Duration {
    Duration::from_millis(delay_ms.max(0).unsigned_abs())
}
